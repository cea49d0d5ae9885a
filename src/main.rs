//! Worker Process Host (v1)
//!
//! A host-module runtime driving graceful worker shutdown, built with Tokio.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────┐
//!                      │                  WORKER HOST                      │
//!                      │                                                   │
//!     OS signal        │  ┌──────────┐    ┌──────────────┐                │
//!     ─────────────────┼─▶│lifecycle │───▶│    module    │                │
//!                      │  │ signals  │    │ GlobalModule │                │
//!                      │  └──────────┘    └──────┬───────┘                │
//!                      │                         │                         │
//!     Config edit      │  ┌──────────┐           ▼                         │
//!     ─────────────────┼─▶│  config  │    ┌──────────────┐                │
//!                      │  │ watcher  │    │  lifecycle   │                │
//!                      │  └──────────┘    │ Shutdown-    │                │
//!                      │                  │ Coordinator  │                │
//!                      │                  └──────┬───────┘                │
//!                      │                         │                         │
//!                      │                         ▼                         │
//!                      │                  ┌──────────────┐                │
//!                      │                  │ application  │                │
//!                      │                  │   manager    │                │
//!                      │                  └──────────────┘                │
//!                      │                                                   │
//!                      │  ┌────────────────────────────────────────────┐  │
//!                      │  │           Cross-Cutting Concerns            │  │
//!                      │  │     ┌─────────┐       ┌──────────────┐     │  │
//!                      │  │     │ config  │       │observability │     │  │
//!                      │  │     └─────────┘       └──────────────┘     │  │
//!                      │  └────────────────────────────────────────────┘  │
//!                      └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use worker_host::application::ApplicationManager;
use worker_host::config::{load_config, ConfigWatcher};
use worker_host::lifecycle::{HostSignal, SignalListener};
use worker_host::module::{ConfigurationChange, GlobalModule};
use worker_host::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "worker-host")]
#[command(about = "Worker process host module runtime", long_about = None)]
struct Cli {
    /// Path to the host configuration file
    #[arg(short, long, default_value = "worker-host.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the configuration file and print it as JSON
    Check,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;

    if let Some(Command::Check) = cli.command {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    logging::init(&config.observability.log_level);

    tracing::info!(config_path = %cli.config.display(), "worker-host v0.1.0 starting");

    tracing::info!(
        shutdown_delay_ms = config.module.shutdown_delay_ms,
        stop_timeout_ms = config.module.stop_timeout_ms,
        applications = config.applications.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let manager = Arc::new(ApplicationManager::new(config.clone()));
    for app in &config.applications {
        manager.get_or_create(&app.name, &app.path)?;
    }

    let module = GlobalModule::new(manager.clone());

    // Keep the watcher handle alive for the process lifetime
    let (watcher, mut updates) = ConfigWatcher::new(&cli.config);
    let _watcher = watcher.run()?;

    let mut signals = SignalListener::new()?;
    let mut current_config = config;

    loop {
        tokio::select! {
            signal = signals.recv() => match signal {
                Some(HostSignal::StopListening) => {
                    module.on_global_stop_listening().await;
                    break;
                }
                Some(HostSignal::ApplicationStop) => {
                    module.on_global_application_stop().await;
                    break;
                }
                None => break,
            },
            update = updates.recv() => match update {
                Some(new_config) => {
                    let change = ConfigurationChange::between(&current_config, &new_config);
                    current_config = new_config;
                    module.on_global_configuration_change(change).await;
                }
                None => break,
            },
        }
    }

    module.terminate().await;

    tracing::info!("Shutdown complete");
    Ok(())
}
