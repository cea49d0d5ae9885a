//! Global notification handler.
//!
//! Receives the host runtime's lifecycle callbacks and drives the shared
//! application manager through the shutdown coordinator. Stop-listening and
//! application-stop both trigger the one-shot shutdown sequence;
//! configuration changes refresh the manager instead.

use std::sync::Arc;

use crate::application::ApplicationHost;
use crate::lifecycle::ShutdownCoordinator;
use crate::module::notifications::{ConfigurationChange, NotificationStatus};
use crate::observability::metrics;

/// The module-level notification handler registered with the host runtime.
pub struct GlobalModule {
    manager: Arc<dyn ApplicationHost>,
    coordinator: Arc<ShutdownCoordinator>,
}

impl GlobalModule {
    /// Build the module around the shared application manager.
    pub fn new(manager: Arc<dyn ApplicationHost>) -> Self {
        let coordinator = Arc::new(ShutdownCoordinator::new(Arc::clone(&manager)));
        Self {
            manager,
            coordinator,
        }
    }

    /// The host has stopped accepting new connections.
    ///
    /// Triggers the shutdown sequence. With a configured delay this returns
    /// as soon as the background task is scheduled.
    pub async fn on_global_stop_listening(&self) -> NotificationStatus {
        tracing::info!("Stop-listening notification received");
        metrics::record_notification("stop_listening");

        self.start_shutdown().await;
        NotificationStatus::Continue
    }

    /// The hosted application has been asked to stop.
    pub async fn on_global_application_stop(&self) -> NotificationStatus {
        tracing::info!("Application-stop notification received");
        metrics::record_notification("application_stop");

        self.start_shutdown().await;
        NotificationStatus::Continue
    }

    /// Host-level configuration changed.
    ///
    /// Never triggers shutdown. Applies the reloaded configuration to the
    /// manager so a later delay read observes it, and recycles the
    /// applications under the changed path when one is named.
    pub async fn on_global_configuration_change(
        &self,
        change: ConfigurationChange,
    ) -> NotificationStatus {
        tracing::info!(path = ?change.path, "Configuration-change notification received");
        metrics::record_notification("configuration_change");

        if let Some(config) = change.config {
            self.manager.apply_config(config);
        }
        if let Some(path) = change.path {
            let recycled = self.manager.recycle_applications(&path).await;
            tracing::info!(%path, recycled, "Applications recycled");
        }

        NotificationStatus::Continue
    }

    /// Teardown entry point, safe to call any number of times.
    ///
    /// Joins any in-flight background shutdown before returning; never runs
    /// shutdown logic itself.
    pub async fn terminate(&self) -> NotificationStatus {
        tracing::info!("Global module terminating");
        self.coordinator.terminate().await;
        NotificationStatus::Continue
    }

    /// Trigger the one-shot shutdown, absorbing any inline manager error so
    /// it never crosses the host boundary.
    async fn start_shutdown(&self) {
        if let Err(error) = self.coordinator.start_shutdown().await {
            tracing::error!(%error, "Application manager shutdown failed");
        }
    }
}
