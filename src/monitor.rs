// src/monitor.rs
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::detect;
use crate::error::{MonitorError, MonitorResult};
use crate::fetch::ContentFetcher;
use crate::filter;
use crate::fingerprint;
use crate::repo::{RunSummary, Target, TargetRepository, TargetStatus};

/// Outcome of checking one target, before persistence.
///
/// `fingerprint` is `None` exactly when the fetch failed, so passing it
/// straight to the repository preserves the stored hash on failure.
struct CheckOutcome {
    status: TargetStatus,
    fingerprint: Option<String>,
    error: Option<String>,
}

/// Drives monitoring runs: pulls active targets from the repository,
/// fetches and fingerprints each one sequentially, and writes outcomes
/// back. Both collaborators are injected; the runner holds no other state.
pub struct MonitorRunner {
    repo: Arc<dyn TargetRepository>,
    fetcher: Arc<dyn ContentFetcher>,
}

impl MonitorRunner {
    pub fn new(repo: Arc<dyn TargetRepository>, fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self { repo, fetcher }
    }

    /// One pass over all active targets.
    ///
    /// Targets are visited strictly sequentially: this bounds outstanding
    /// connections to one and keeps wall-clock cost capped at target count
    /// times the per-fetch timeout. One bad target never aborts the loop,
    /// and a failed persistence write is logged and skipped. The only
    /// unrecoverable condition is the initial listing call failing.
    pub async fn run_once(&self) -> MonitorResult<RunSummary> {
        let targets = self.repo.list_active().await?;
        info!("Starting monitoring run over {} active targets", targets.len());

        let mut updated = 0;
        let mut unchanged = 0;
        let mut errors = 0;

        for target in &targets {
            info!(
                "Checking {} ({}) [{}]",
                target.name, target.url, target.monitor_mode
            );

            let outcome = self.check_target(target).await;
            match outcome.status {
                TargetStatus::Updated => {
                    updated += 1;
                    info!("Update detected: {}", target.name);
                }
                TargetStatus::Error => {
                    errors += 1;
                    warn!(
                        "Check failed: {} - {}",
                        target.name,
                        outcome.error.as_deref().unwrap_or("unknown error")
                    );
                }
                _ => {
                    unchanged += 1;
                    debug!("No change: {}", target.name);
                }
            }

            if let Err(e) = self
                .repo
                .update_check(&target.id, outcome.status, outcome.fingerprint, outcome.error)
                .await
            {
                warn!("Failed to persist outcome for {}: {}", target.id, e);
            }
        }

        let summary = RunSummary {
            processed: targets.len(),
            updated,
            unchanged,
            errors,
            completed_at: Utc::now(),
        };
        info!(
            "Monitoring run completed: {} processed, {} updated, {} unchanged, {} errors",
            summary.processed, summary.updated, summary.unchanged, summary.errors
        );
        Ok(summary)
    }

    /// Check a single target by id and return the updated record. Used by
    /// interactive "check now" actions; same pipeline and same
    /// baseline-is-unchanged policy as the run loop.
    pub async fn check_one(&self, id: &str) -> MonitorResult<Target> {
        let target = self
            .repo
            .get(id)
            .await?
            .ok_or_else(|| MonitorError::TargetNotFound(id.to_string()))?;

        info!("Checking {} ({})", target.name, target.url);
        let outcome = self.check_target(&target).await;

        self.repo
            .update_check(&target.id, outcome.status, outcome.fingerprint, outcome.error)
            .await?
            .ok_or_else(|| MonitorError::TargetNotFound(id.to_string()))
    }

    /// Run `run_once` on a fixed period until the process is killed. A
    /// failing run is logged and the loop keeps going; overlap with a
    /// manual trigger is resolved by the repository as last-write-wins.
    pub async fn watch(&self, period: Duration) -> MonitorResult<()> {
        info!("Watching targets every {}s", period.as_secs());
        let mut ticker = tokio::time::interval(period);

        loop {
            ticker.tick().await;
            match self.run_once().await {
                Ok(summary) => debug!(
                    "Scheduled run finished at {} ({} processed)",
                    summary.completed_at, summary.processed
                ),
                Err(e) => error!("Scheduled run failed: {}", e),
            }
        }
    }

    async fn check_target(&self, target: &Target) -> CheckOutcome {
        match self.fetcher.fetch(&target.url).await {
            Ok(body) => {
                let content = filter::extract(&body, target.monitor_mode, &target.url);
                let digest = fingerprint::digest(&content);
                let status = detect::decide(target.fingerprint.as_deref(), &digest);
                CheckOutcome {
                    status,
                    fingerprint: Some(digest),
                    error: None,
                }
            }
            Err(err) => CheckOutcome {
                status: TargetStatus::Error,
                fingerprint: None,
                error: Some(err.to_string()),
            },
        }
    }
}
