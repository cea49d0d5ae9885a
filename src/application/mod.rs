//! Application management subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (manager.rs):
//!     Host resolves a config path → get_or_create → Application entry
//!
//! Request tracking (instance.rs):
//!     begin_request → RAII guard → in-flight gauge
//!
//! Shutdown (manager.rs):
//!     shut_down → drain every application within the stop timeout → table empty
//!
//! Recycle (manager.rs):
//!     configuration path changed → stop and remove applications under it
//! ```
//!
//! # Design Decisions
//! - The manager is shared via Arc; the shutdown coordinator is the only
//!   authorized caller of shut_down
//! - Applications are keyed by configuration path
//! - A drain that misses its deadline still marks the application stopped

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::schema::HostConfig;

pub mod instance;
pub mod manager;

pub use instance::Application;
pub use instance::AppState;
pub use instance::RequestGuard;
pub use manager::ApplicationManager;

/// Errors surfaced by the application manager.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// The manager has begun shutting down and refuses new registrations.
    #[error("application manager is shutting down")]
    ShuttingDown,

    /// An application still had in-flight requests at its drain deadline.
    #[error("application {name} had {remaining} in-flight request(s) at the drain deadline")]
    DrainTimeout { name: String, remaining: usize },
}

/// Manager surface consumed by the worker-host module.
///
/// The concrete implementation is [`ApplicationManager`]; tests substitute
/// recording doubles.
#[async_trait]
pub trait ApplicationHost: Send + Sync {
    /// Currently configured delay between a stop notification and shutdown.
    ///
    /// Read at shutdown-start time, never cached earlier.
    fn shutdown_delay(&self) -> Duration;

    /// Stop every managed application.
    ///
    /// May take significant wall-clock time; runs to completion or not at
    /// all, with no partial-progress signaling.
    async fn shut_down(&self) -> Result<(), ManagerError>;

    /// Swap the active configuration.
    fn apply_config(&self, config: HostConfig);

    /// Stop and remove the applications registered under a configuration
    /// path, returning how many were recycled.
    async fn recycle_applications(&self, path: &str) -> usize;
}
