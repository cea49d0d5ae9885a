//! Worker process host module.
//!
//! The core is a graceful-shutdown coordinator embedded in a server host
//! module: lifecycle notifications from the hosting server drive an
//! at-most-once, optionally delayed shutdown of the shared application
//! manager. Around it sit the application registry, configuration loading
//! with hot reload, the host-facing notification handler and the
//! observability wiring. The `worker-host` binary is a small host runtime
//! harness driving the module the way the real host would.

pub mod application;
pub mod config;
pub mod lifecycle;
pub mod module;
pub mod observability;

pub use application::ApplicationHost;
pub use application::ApplicationManager;
pub use config::schema::HostConfig;
pub use lifecycle::ShutdownCoordinator;
pub use module::GlobalModule;
