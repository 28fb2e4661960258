pub mod app;
pub mod config;
pub mod detect;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod fingerprint;
pub mod monitor;
pub mod repo;

// Re-export main types for easier access
pub use app::App;
pub use config::AppConfig;
pub use error::{MonitorError, MonitorResult};
pub use fetch::{ContentFetcher, FetchError, Fetcher};
pub use monitor::MonitorRunner;
pub use repo::{
    JsonStore,
    MonitorMode,
    RunSummary,
    Target,
    TargetRepository,
    TargetStatus,
};
