//! Application registry and shutdown.
//!
//! # Responsibilities
//! - Maintain the table of applications keyed by configuration path
//! - Serve the currently active configuration (hot-swapped on reload)
//! - Stop every application on shutdown, draining within the stop timeout
//! - Recycle application subtrees when their configuration path changes

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use async_trait::async_trait;
use dashmap::DashMap;

use crate::application::instance::Application;
use crate::application::{ApplicationHost, ManagerError};
use crate::config::schema::HostConfig;
use crate::observability::metrics;

/// Owns every application the host has registered.
///
/// Shared via `Arc` between the host harness, the global module and the
/// shutdown coordinator; the coordinator is the only caller of `shut_down`.
pub struct ApplicationManager {
    /// Applications keyed by configuration path.
    applications: DashMap<String, Arc<Application>>,
    /// Currently active configuration.
    config: ArcSwap<HostConfig>,
    /// Set once shutdown has begun; new registrations are refused after.
    shutting_down: AtomicBool,
}

impl ApplicationManager {
    /// Create a manager with the given starting configuration.
    pub fn new(config: HostConfig) -> Self {
        Self {
            applications: DashMap::new(),
            config: ArcSwap::from_pointee(config),
            shutting_down: AtomicBool::new(false),
        }
    }

    /// Return the application registered under `path`, creating it if
    /// needed.
    ///
    /// Refused once shutdown has begun.
    pub fn get_or_create(&self, name: &str, path: &str) -> Result<Arc<Application>, ManagerError> {
        if self.shutting_down.load(Ordering::Acquire) {
            return Err(ManagerError::ShuttingDown);
        }

        let application = self
            .applications
            .entry(path.to_string())
            .or_insert_with(|| {
                let application = Arc::new(Application::new(name, path));
                tracing::info!(
                    name = %application.name,
                    path = %application.path,
                    id = %application.id,
                    "Application registered"
                );
                application
            })
            .clone();

        metrics::record_running_applications(self.applications.len());
        Ok(application)
    }

    /// Number of currently registered applications.
    pub fn application_count(&self) -> usize {
        self.applications.len()
    }

    /// The currently active configuration.
    pub fn current_config(&self) -> Arc<HostConfig> {
        self.config.load_full()
    }
}

#[async_trait]
impl ApplicationHost for ApplicationManager {
    fn shutdown_delay(&self) -> Duration {
        self.config.load().module.shutdown_delay()
    }

    async fn shut_down(&self) -> Result<(), ManagerError> {
        if self.shutting_down.swap(true, Ordering::AcqRel) {
            tracing::debug!("Application manager shutdown already requested");
        }

        let stop_timeout = self.config.load().module.stop_timeout();
        let applications: Vec<Arc<Application>> = self
            .applications
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        self.applications.clear();

        tracing::info!(count = applications.len(), "Stopping all applications");

        let mut first_error = None;
        for application in applications {
            if let Err(error) = application.stop(stop_timeout).await {
                tracing::warn!(%error, "Application did not drain cleanly");
                if first_error.is_none() {
                    first_error = Some(error);
                }
            }
        }

        metrics::record_running_applications(0);

        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn apply_config(&self, config: HostConfig) {
        tracing::info!(
            shutdown_delay_ms = config.module.shutdown_delay_ms,
            stop_timeout_ms = config.module.stop_timeout_ms,
            "Configuration applied"
        );
        self.config.store(Arc::new(config));
    }

    async fn recycle_applications(&self, path: &str) -> usize {
        let stop_timeout = self.config.load().module.stop_timeout();
        let recycled: Vec<Arc<Application>> = self
            .applications
            .iter()
            .filter(|entry| path_covers(path, entry.key()))
            .map(|entry| entry.value().clone())
            .collect();

        for application in &recycled {
            self.applications.remove(&application.path);
            tracing::info!(
                name = %application.name,
                path = %application.path,
                id = %application.id,
                "Recycling application"
            );
            if let Err(error) = application.stop(stop_timeout).await {
                tracing::warn!(%error, "Recycled application did not drain cleanly");
            }
        }

        if !recycled.is_empty() {
            metrics::record_running_applications(self.applications.len());
        }
        recycled.len()
    }
}

/// True when `prefix` names `path` itself or a configuration path above it.
fn path_covers(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
