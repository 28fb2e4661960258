// src/repo/model.rs
use std::fmt;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// What part of a page feeds the fingerprint.
///
/// `Full` hashes the body byte-for-byte. `Content` strips ad, tracking and
/// timestamp noise first, so rotating banners do not read as page changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MonitorMode {
    #[default]
    Full,
    Content,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetStatus {
    #[default]
    Pending,
    Unchanged,
    Updated,
    Error,
}

impl fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TargetStatus::Pending => "pending",
            TargetStatus::Unchanged => "unchanged",
            TargetStatus::Updated => "updated",
            TargetStatus::Error => "error",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for MonitorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MonitorMode::Full => "full",
            MonitorMode::Content => "content",
        };
        write!(f, "{}", s)
    }
}

/// A monitored page plus its last-known state.
///
/// `fingerprint` is only ever written by a check that successfully fetched
/// and hashed content; a failed check updates `status`, `last_error` and
/// `last_checked_at` but must leave a prior valid fingerprint intact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub monitor_mode: MonitorMode,
    pub fingerprint: Option<String>,
    #[serde(default)]
    pub status: TargetStatus,
    pub last_checked_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Target {
    pub fn new(id: String, name: String, url: String, monitor_mode: MonitorMode) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            url,
            monitor_mode,
            fingerprint: None,
            status: TargetStatus::Pending,
            last_checked_at: None,
            last_error: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Creation request for a target.
#[derive(Debug, Clone)]
pub struct NewTarget {
    pub name: String,
    pub url: String,
    pub monitor_mode: MonitorMode,
}

/// Aggregate result of one monitoring run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub processed: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub errors: usize,
    pub completed_at: DateTime<Utc>,
}
