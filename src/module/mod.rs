//! Host-facing global module.
//!
//! # Data Flow
//! ```text
//! Host runtime notification
//!     → GlobalModule handler (global.rs)
//!     → stop-listening / application-stop: ShutdownCoordinator::start_shutdown()
//!     → configuration-change: manager.apply_config() + recycle_applications()
//!     → NotificationStatus back to the host
//!
//! Host teardown
//!     → GlobalModule::terminate()
//!     → ShutdownCoordinator::terminate() (joins background shutdown)
//! ```
//!
//! # Design Decisions
//! - Handlers never panic across the host boundary: failures are logged and
//!   a status is still returned
//! - Configuration changes refresh shutdown timing but never trigger
//!   shutdown themselves
//! - All handlers return `NotificationStatus::Continue` so the host keeps
//!   delivering to other modules

pub mod global;
pub mod notifications;

pub use global::GlobalModule;
pub use notifications::{ConfigurationChange, NotificationStatus};
