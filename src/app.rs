// src/app.rs
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use tracing::info;

use crate::config::AppConfig;
use crate::fetch::Fetcher;
use crate::monitor::MonitorRunner;
use crate::repo::{JsonStore, MonitorMode, NewTarget, Target, TargetRepository};

/// Commands the application can execute, decoupled from the CLI parser.
pub enum Command {
    Add {
        name: String,
        url: String,
        mode: MonitorMode,
    },
    List {
        all: bool,
    },
    Show {
        id: String,
    },
    Delete {
        id: String,
    },
    Enable {
        id: String,
    },
    Disable {
        id: String,
    },
    Check {
        id: String,
    },
    Run,
    Watch {
        interval_secs: Option<u64>,
    },
}

/// Main application struct wiring config, store, fetcher and runner.
pub struct App {
    config: AppConfig,
    store: Arc<JsonStore>,
    runner: MonitorRunner,
}

impl App {
    /// Load configuration, open the target store and build the runner. The
    /// store is opened once here and handed to the runner explicitly.
    pub async fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = AppConfig::load(config_path)?;

        let store = Arc::new(JsonStore::new(config.data_dir.clone()));
        store.init().await?;

        let fetcher = Arc::new(Fetcher::new(&config.user_agent, config.fetch_timeout_secs)?);
        let runner = MonitorRunner::new(store.clone(), fetcher);

        info!("Application initialized");
        Ok(Self {
            config,
            store,
            runner,
        })
    }

    pub async fn run_command(&self, command: Command) -> Result<()> {
        match command {
            Command::Add { name, url, mode } => {
                let target = self
                    .store
                    .create(NewTarget {
                        name,
                        url,
                        monitor_mode: mode,
                    })
                    .await?;
                println!("Added target: {} (ID: {})", target.name, target.id);
                println!("URL: {}", target.url);
                println!("Mode: {}", target.monitor_mode);
                Ok(())
            }

            Command::List { all } => {
                let targets = if all {
                    self.store.list_all().await?
                } else {
                    self.store.list_active().await?
                };

                if targets.is_empty() {
                    println!("No targets configured.");
                    return Ok(());
                }

                for target in &targets {
                    println!(
                        "{}  [{}] {} ({}) - {}",
                        target.id, target.status, target.name, target.url, target.monitor_mode
                    );
                }
                println!("{} target(s)", targets.len());
                Ok(())
            }

            Command::Show { id } => {
                match self.store.get(&id).await? {
                    Some(target) => print_target(&target),
                    None => bail!("Target not found: {}", id),
                }
                Ok(())
            }

            Command::Delete { id } => {
                if !self.store.delete(&id).await? {
                    bail!("Target not found: {}", id);
                }
                println!("Target deleted successfully");
                Ok(())
            }

            Command::Enable { id } => {
                match self.store.set_active(&id, true).await? {
                    Some(target) => println!("Target enabled: {}", target.name),
                    None => bail!("Target not found: {}", id),
                }
                Ok(())
            }

            Command::Disable { id } => {
                match self.store.set_active(&id, false).await? {
                    Some(target) => println!("Target disabled: {}", target.name),
                    None => bail!("Target not found: {}", id),
                }
                Ok(())
            }

            Command::Check { id } => {
                let target = self.runner.check_one(&id).await?;
                print_target(&target);
                Ok(())
            }

            Command::Run => {
                let summary = self.runner.run_once().await?;
                println!(
                    "Run completed: {} processed, {} updated, {} unchanged, {} errors",
                    summary.processed, summary.updated, summary.unchanged, summary.errors
                );
                Ok(())
            }

            Command::Watch { interval_secs } => {
                let period =
                    Duration::from_secs(interval_secs.unwrap_or(self.config.check_interval_secs));
                self.runner.watch(period).await?;
                Ok(())
            }
        }
    }
}

fn print_target(target: &Target) {
    println!("Target: {} (ID: {})", target.name, target.id);
    println!("URL: {}", target.url);
    println!("Mode: {}", target.monitor_mode);
    println!("Status: {}", target.status);
    println!("Active: {}", target.is_active);
    if let Some(fingerprint) = &target.fingerprint {
        println!("Fingerprint: {}", fingerprint);
    }
    if let Some(checked) = &target.last_checked_at {
        println!("Last checked: {}", checked);
    }
    if let Some(error) = &target.last_error {
        println!("Last error: {}", error);
    }
}
