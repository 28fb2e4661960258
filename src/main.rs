// src/main.rs
use std::path::PathBuf;
use std::process::exit;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;

use sitewatch::app::{App, Command};
use sitewatch::repo::MonitorMode;

#[derive(Parser)]
#[command(name = "sitewatch")]
#[command(about = "Track web pages and detect content changes")]
struct Args {
    #[command(subcommand)]
    command: Cli,

    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Cli {
    /// Add a page to monitor
    Add {
        #[arg(help = "Target name")]
        name: String,

        #[arg(help = "Absolute URL to monitor")]
        url: String,

        #[arg(long, value_enum, default_value_t = MonitorMode::Full,
              help = "Hash the full body, or filtered content only")]
        mode: MonitorMode,
    },

    /// List monitored targets
    List {
        #[arg(long, help = "Include inactive targets")]
        all: bool,
    },

    /// Show target details
    Show {
        #[arg(help = "Target ID")]
        id: String,
    },

    /// Delete a target
    Delete {
        #[arg(help = "Target ID")]
        id: String,
    },

    /// Include a target in scheduled runs again
    Enable {
        #[arg(help = "Target ID")]
        id: String,
    },

    /// Exclude a target from scheduled runs
    Disable {
        #[arg(help = "Target ID")]
        id: String,
    },

    /// Check a single target now
    Check {
        #[arg(help = "Target ID")]
        id: String,
    },

    /// Run one monitoring pass over all active targets
    Run,

    /// Run monitoring passes on a fixed interval
    Watch {
        #[arg(long, help = "Seconds between runs (defaults to config)")]
        interval: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let app = match App::new(args.config.as_deref()).await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            exit(1);
        }
    };

    let command = match args.command {
        Cli::Add { name, url, mode } => Command::Add { name, url, mode },
        Cli::List { all } => Command::List { all },
        Cli::Show { id } => Command::Show { id },
        Cli::Delete { id } => Command::Delete { id },
        Cli::Enable { id } => Command::Enable { id },
        Cli::Disable { id } => Command::Disable { id },
        Cli::Check { id } => Command::Check { id },
        Cli::Run => Command::Run,
        Cli::Watch { interval } => Command::Watch {
            interval_secs: interval,
        },
    };

    if let Err(e) = app.run_command(command).await {
        error!("Command execution failed: {}", e);
        exit(1);
    }

    Ok(())
}
