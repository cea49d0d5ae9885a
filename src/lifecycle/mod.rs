//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Stop notification → one-shot guard → inline or delayed shutdown
//!     Teardown → join background task → release
//!
//! Signals (signals.rs):
//!     SIGINT  → stop-listening notification
//!     SIGTERM → application-stop notification
//! ```
//!
//! # Design Decisions
//! - Shutdown runs at most once regardless of notification interleaving
//! - A non-zero delay moves shutdown off the notification path entirely
//! - Teardown blocks until the background task has fully completed

pub mod shutdown;
pub mod signals;

pub use shutdown::ShutdownCoordinator;
pub use shutdown::ShutdownState;
pub use signals::HostSignal;
pub use signals::SignalListener;
