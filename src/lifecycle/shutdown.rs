//! One-shot shutdown sequencing for the application manager.
//!
//! # State Machine
//! ```text
//! Idle → Running (inline, delay == 0)           → Done
//!      → Running (delayed: sleep → shut down)   → Done
//!
//! start_shutdown() while Running or Done: no-op
//! terminate(): safe in any state, any number of times
//! ```
//!
//! # Design Decisions
//! - The one-shot guard is an explicit atomic state, not task-handle liveness
//! - Zero delay reproduces the legacy inline behavior on the notifying task
//! - Non-zero delay moves shutdown to a spawned task so the notification
//!   returns promptly and the host queues new requests for a replacement
//!   instance instead of sending them to a dying one
//! - The manager reference is dropped as soon as shutdown has run

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;

use crate::application::{ApplicationHost, ManagerError};
use crate::observability::metrics;

/// Progress of the one-shot shutdown sequence.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownState {
    /// No shutdown has been requested yet.
    Idle = 0,
    /// Shutdown is executing, inline or on the background task.
    Running = 1,
    /// The application manager has been shut down and released.
    Done = 2,
}

impl From<u8> for ShutdownState {
    fn from(val: u8) -> Self {
        match val {
            1 => ShutdownState::Running,
            2 => ShutdownState::Done,
            _ => ShutdownState::Idle,
        }
    }
}

/// Sequences the one-shot, optionally delayed shutdown of the application
/// manager.
///
/// Created alongside the manager when the host module initializes. The
/// holder must call [`terminate`](Self::terminate) before dropping the
/// coordinator so no background work outlives it.
pub struct ShutdownCoordinator {
    /// Shared manager reference; cleared once shutdown has run.
    manager: Mutex<Option<Arc<dyn ApplicationHost>>>,
    /// Handle of the delayed-shutdown task, present once one was spawned.
    task: Mutex<Option<JoinHandle<()>>>,
    /// One-shot guard.
    state: AtomicU8,
}

impl ShutdownCoordinator {
    /// Create a coordinator over the shared application manager.
    pub fn new(manager: Arc<dyn ApplicationHost>) -> Self {
        Self {
            manager: Mutex::new(Some(manager)),
            task: Mutex::new(None),
            state: AtomicU8::new(ShutdownState::Idle as u8),
        }
    }

    /// Current position in the shutdown state machine.
    pub fn state(&self) -> ShutdownState {
        ShutdownState::from(self.state.load(Ordering::Acquire))
    }

    /// Begin the one-shot shutdown sequence.
    ///
    /// The first caller wins; every later call returns immediately as a
    /// no-op. With a zero configured delay the manager is shut down before
    /// this returns and any manager error is handed back untranslated. With
    /// a non-zero delay the work moves to a background task and this
    /// returns at once.
    pub async fn start_shutdown(self: &Arc<Self>) -> Result<(), ManagerError> {
        if self
            .state
            .compare_exchange(
                ShutdownState::Idle as u8,
                ShutdownState::Running as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            // Shutdown has already been started
            return Ok(());
        }

        let manager = match self
            .manager
            .lock()
            .expect("shutdown manager mutex poisoned")
            .clone()
        {
            Some(manager) => manager,
            None => {
                // The slot is only ever empty after shutdown has run
                self.state
                    .store(ShutdownState::Done as u8, Ordering::Release);
                return Ok(());
            }
        };

        // Read at shutdown-start time, never cached earlier
        let delay = manager.shutdown_delay();

        if delay.is_zero() {
            tracing::info!("Shutdown starting");
            metrics::record_shutdown_started("inline");
            let result = manager.shut_down().await;
            self.release_manager();
            result
        } else {
            metrics::record_shutdown_started("delayed");
            let coordinator = Arc::clone(self);
            let handle = tokio::spawn(async move {
                tracing::info!(delay_ms = delay.as_millis() as u64, "Shutdown starting after delay");
                // Let requests accepted while the stop notification returns
                // drain before the manager goes away
                tokio::time::sleep(delay).await;
                if let Err(error) = manager.shut_down().await {
                    tracing::error!(%error, "Application manager shutdown failed");
                }
                coordinator.release_manager();
            });
            *self.task.lock().expect("shutdown task mutex poisoned") = Some(handle);
            Ok(())
        }
    }

    /// Wait for any in-flight background shutdown to complete.
    ///
    /// Idempotent: waiting on an already-completed or never-started task is
    /// a no-op. A panic inside the task is contained by the task boundary
    /// and logged here, never propagated to the caller.
    pub async fn terminate(&self) {
        tracing::info!("Shutdown coordinator terminating");

        let task = self.task.lock().expect("shutdown task mutex poisoned").take();
        if let Some(task) = task {
            if let Err(error) = task.await {
                tracing::error!(%error, "Background shutdown task failed");
            }
        }
    }

    /// Drop the manager reference and mark the sequence finished.
    fn release_manager(&self) {
        self.manager
            .lock()
            .expect("shutdown manager mutex poisoned")
            .take();
        self.state
            .store(ShutdownState::Done as u8, Ordering::Release);
    }
}
