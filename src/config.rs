// src/config.rs
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application configuration, loaded from a TOML file with per-field
/// defaults so a partial (or absent) file still works.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root directory for stored target records.
    pub data_dir: PathBuf,
    /// Client signature sent with every fetch.
    pub user_agent: String,
    /// Per-request wait ceiling. Keep this below any outer invocation
    /// limit; a run fetches targets one at a time within it.
    pub fetch_timeout_secs: u64,
    /// Period between scheduled runs in watch mode.
    pub check_interval_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let home_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

        Self {
            data_dir: home_dir.join(".sitewatch"),
            user_agent: format!("sitewatch/{}", env!("CARGO_PKG_VERSION")),
            fetch_timeout_secs: 25,
            check_interval_secs: 3600,
        }
    }
}

impl AppConfig {
    /// Load configuration from the given path, or the default location.
    /// A missing file yields the defaults.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path);

        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration, creating parent directories as needed.
    pub fn save(&self, config_path: Option<&Path>) -> Result<PathBuf> {
        let path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(path)
    }

    fn default_path() -> PathBuf {
        let home_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home_dir.join(".sitewatch").join("config.toml")
    }
}
