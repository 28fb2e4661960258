// src/repo/store.rs
use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

use super::model::{NewTarget, Target, TargetStatus};
use super::TargetRepository;
use crate::error::{MonitorError, MonitorResult};

/// File-backed target store: one JSON document per target under
/// `<data_dir>/targets/`, mirrored in memory behind an RwLock.
///
/// Opened once at process start and passed to the runner explicitly; there
/// is no ambient global handle.
pub struct JsonStore {
    targets: RwLock<HashMap<String, Target>>,
    data_dir: PathBuf,
}

impl JsonStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            targets: RwLock::new(HashMap::new()),
            data_dir,
        }
    }

    /// Create the storage directory and load any existing targets.
    pub async fn init(&self) -> Result<()> {
        let targets_dir = self.data_dir.join("targets");
        if !targets_dir.exists() {
            fs::create_dir_all(&targets_dir)
                .await
                .context("Failed to create targets directory")?;
        }
        self.load_all().await
    }

    async fn load_all(&self) -> Result<()> {
        let targets_dir = self.data_dir.join("targets");

        let mut entries = fs::read_dir(&targets_dir).await.context(format!(
            "Failed to read targets directory: {}",
            targets_dir.display()
        ))?;

        let mut loaded = self.targets.write().await;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !path.is_file() || path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }

            let json = fs::read_to_string(&path)
                .await
                .context(format!("Failed to read target file: {}", path.display()))?;
            let target: Target = serde_json::from_str(&json).context(format!(
                "Failed to parse target JSON from {}",
                path.display()
            ))?;
            loaded.insert(target.id.clone(), target);
        }

        info!("Loaded {} targets", loaded.len());
        Ok(())
    }

    async fn save_target(&self, target: &Target) -> Result<()> {
        let path = self.target_path(&target.id);
        let json = serde_json::to_string_pretty(target)?;

        fs::write(&path, json).await.context(format!(
            "Failed to save target {} to {}",
            target.id,
            path.display()
        ))?;

        debug!("Saved target {} to {}", target.id, path.display());
        Ok(())
    }

    fn target_path(&self, id: &str) -> PathBuf {
        self.data_dir.join("targets").join(format!("{}.json", id))
    }

    fn repo_err(error: anyhow::Error) -> MonitorError {
        MonitorError::Repository(error.to_string())
    }
}

#[async_trait]
impl TargetRepository for JsonStore {
    async fn list_active(&self) -> MonitorResult<Vec<Target>> {
        let targets = self.targets.read().await;
        let mut active: Vec<Target> = targets
            .values()
            .filter(|t| t.is_active)
            .cloned()
            .collect();
        // Option sorts None first, which is exactly the never-checked-first
        // rotation we want.
        active.sort_by_key(|t| t.last_checked_at);
        Ok(active)
    }

    async fn list_all(&self) -> MonitorResult<Vec<Target>> {
        let targets = self.targets.read().await;
        let mut all: Vec<Target> = targets.values().cloned().collect();
        all.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(all)
    }

    async fn get(&self, id: &str) -> MonitorResult<Option<Target>> {
        let targets = self.targets.read().await;
        Ok(targets.get(id).cloned())
    }

    async fn create(&self, new: NewTarget) -> MonitorResult<Target> {
        Url::parse(&new.url).map_err(|e| MonitorError::InvalidUrl(format!("{}: {}", new.url, e)))?;

        let id = Uuid::new_v4().to_string();
        let target = Target::new(id.clone(), new.name, new.url, new.monitor_mode);

        self.save_target(&target).await.map_err(Self::repo_err)?;
        self.targets.write().await.insert(id.clone(), target.clone());

        info!("Created new target with ID: {}", id);
        Ok(target)
    }

    async fn delete(&self, id: &str) -> MonitorResult<bool> {
        let removed = self.targets.write().await.remove(id);
        let Some(target) = removed else {
            return Ok(false);
        };

        let path = self.target_path(&target.id);
        if path.exists() {
            fs::remove_file(&path)
                .await
                .context(format!("Failed to delete target file for {}", id))
                .map_err(Self::repo_err)?;
        }

        info!("Deleted target with ID: {}", id);
        Ok(true)
    }

    async fn set_active(&self, id: &str, active: bool) -> MonitorResult<Option<Target>> {
        let updated = {
            let mut targets = self.targets.write().await;
            let Some(target) = targets.get_mut(id) else {
                return Ok(None);
            };
            target.is_active = active;
            target.updated_at = Utc::now();
            target.clone()
        };

        self.save_target(&updated).await.map_err(Self::repo_err)?;
        Ok(Some(updated))
    }

    async fn update_check(
        &self,
        id: &str,
        status: TargetStatus,
        fingerprint: Option<String>,
        error: Option<String>,
    ) -> MonitorResult<Option<Target>> {
        let updated = {
            let mut targets = self.targets.write().await;
            let Some(target) = targets.get_mut(id) else {
                return Ok(None);
            };

            let now = Utc::now();
            target.status = status;
            if let Some(fp) = fingerprint {
                target.fingerprint = Some(fp);
            }
            target.last_error = error;
            target.last_checked_at = Some(now);
            target.updated_at = now;
            target.clone()
        };

        self.save_target(&updated).await.map_err(Self::repo_err)?;
        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MonitorMode;

    async fn store() -> (tempfile::TempDir, JsonStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().to_path_buf());
        store.init().await.unwrap();
        (dir, store)
    }

    fn new_target(name: &str) -> NewTarget {
        NewTarget {
            name: name.to_string(),
            url: format!("https://{}.example.com/", name),
            monitor_mode: MonitorMode::Full,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (_dir, store) = store().await;

        let created = store.create(new_target("a")).await.unwrap();
        assert_eq!(created.status, TargetStatus::Pending);

        let fetched = store.get(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "a");
        assert_eq!(fetched.url, "https://a.example.com/");
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_url() {
        let (_dir, store) = store().await;

        let result = store
            .create(NewTarget {
                name: "bad".to_string(),
                url: "not a url".to_string(),
                monitor_mode: MonitorMode::Full,
            })
            .await;

        assert!(matches!(result, Err(MonitorError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_update_check_preserves_fingerprint_when_omitted() {
        let (_dir, store) = store().await;
        let target = store.create(new_target("a")).await.unwrap();

        store
            .update_check(
                &target.id,
                TargetStatus::Unchanged,
                Some("abc123".to_string()),
                None,
            )
            .await
            .unwrap();

        let after_error = store
            .update_check(
                &target.id,
                TargetStatus::Error,
                None,
                Some("request timed out".to_string()),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(after_error.fingerprint.as_deref(), Some("abc123"));
        assert_eq!(after_error.status, TargetStatus::Error);
        assert_eq!(after_error.last_error.as_deref(), Some("request timed out"));
        assert!(after_error.last_checked_at.is_some());
    }

    #[tokio::test]
    async fn test_update_check_clears_error_on_success() {
        let (_dir, store) = store().await;
        let target = store.create(new_target("a")).await.unwrap();

        store
            .update_check(&target.id, TargetStatus::Error, None, Some("boom".to_string()))
            .await
            .unwrap();

        let recovered = store
            .update_check(
                &target.id,
                TargetStatus::Unchanged,
                Some("def456".to_string()),
                None,
            )
            .await
            .unwrap()
            .unwrap();

        assert!(recovered.last_error.is_none());
        assert_eq!(recovered.fingerprint.as_deref(), Some("def456"));
    }

    #[tokio::test]
    async fn test_list_active_orders_never_checked_first() {
        let (_dir, store) = store().await;

        let a = store.create(new_target("a")).await.unwrap();
        let b = store.create(new_target("b")).await.unwrap();
        let c = store.create(new_target("c")).await.unwrap();

        // a checked, then b; c never checked.
        store
            .update_check(&a.id, TargetStatus::Unchanged, Some("x".to_string()), None)
            .await
            .unwrap();
        store
            .update_check(&b.id, TargetStatus::Unchanged, Some("y".to_string()), None)
            .await
            .unwrap();

        let active = store.list_active().await.unwrap();
        let ids: Vec<&str> = active.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![c.id.as_str(), a.id.as_str(), b.id.as_str()]);
    }

    #[tokio::test]
    async fn test_list_active_skips_inactive() {
        let (_dir, store) = store().await;

        let a = store.create(new_target("a")).await.unwrap();
        store.create(new_target("b")).await.unwrap();

        store.set_active(&a.id, false).await.unwrap();

        let active = store.list_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "b");
    }

    #[tokio::test]
    async fn test_delete_is_hard() {
        let (_dir, store) = store().await;
        let target = store.create(new_target("a")).await.unwrap();

        assert!(store.delete(&target.id).await.unwrap());
        assert!(store.get(&target.id).await.unwrap().is_none());
        assert!(!store.delete(&target.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_targets_survive_reload() {
        let dir = tempfile::tempdir().unwrap();

        let first = JsonStore::new(dir.path().to_path_buf());
        first.init().await.unwrap();
        let created = first.create(new_target("a")).await.unwrap();
        first
            .update_check(
                &created.id,
                TargetStatus::Updated,
                Some("abc".to_string()),
                None,
            )
            .await
            .unwrap();

        let second = JsonStore::new(dir.path().to_path_buf());
        second.init().await.unwrap();
        let reloaded = second.get(&created.id).await.unwrap().unwrap();
        assert_eq!(reloaded.fingerprint.as_deref(), Some("abc"));
        assert_eq!(reloaded.status, TargetStatus::Updated);
    }
}
