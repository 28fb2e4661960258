// src/repo/mod.rs
pub mod model;
mod store;

pub use model::{MonitorMode, NewTarget, RunSummary, Target, TargetStatus};
pub use store::JsonStore;

use async_trait::async_trait;

use crate::error::MonitorResult;

/// Storage seam for monitored targets.
///
/// The monitor runner takes this as an injected dependency and treats it as
/// an opaque store keyed by target id. Implementations are expected to
/// serialize conflicting writes to the same record; overlapping runs then
/// degrade to last-write-wins rather than corruption.
#[async_trait]
pub trait TargetRepository: Send + Sync {
    /// Active targets, least recently checked first with never-checked
    /// targets at the front, so no target starves under rotation.
    async fn list_active(&self) -> MonitorResult<Vec<Target>>;

    /// All targets, most recently updated first.
    async fn list_all(&self) -> MonitorResult<Vec<Target>>;

    async fn get(&self, id: &str) -> MonitorResult<Option<Target>>;

    async fn create(&self, new: NewTarget) -> MonitorResult<Target>;

    /// Hard delete. Ids are uuids and never reused.
    async fn delete(&self, id: &str) -> MonitorResult<bool>;

    async fn set_active(&self, id: &str, active: bool) -> MonitorResult<Option<Target>>;

    /// Record the outcome of one check attempt.
    ///
    /// `fingerprint: None` preserves the stored value (a failed check must
    /// not clobber a prior valid fingerprint). `error` is stored verbatim;
    /// `None` clears any previous message. `last_checked_at` and
    /// `updated_at` are always advanced.
    async fn update_check(
        &self,
        id: &str,
        status: TargetStatus,
        fingerprint: Option<String>,
        error: Option<String>,
    ) -> MonitorResult<Option<Target>>;
}
