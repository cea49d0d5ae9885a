//! A single managed application.
//!
//! # Responsibilities
//! - Represent one application registered under a configuration path
//! - Track in-flight requests (for draining)
//! - Drive the Running → Draining → Stopped transition

use std::ops::Deref;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::application::ManagerError;

/// How often a draining application re-checks its in-flight gauge.
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Application state enum.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Running = 0,
    Draining = 1,
    Stopped = 2,
}

impl From<u8> for AppState {
    fn from(val: u8) -> Self {
        match val {
            1 => AppState::Draining,
            2 => AppState::Stopped,
            _ => AppState::Running,
        }
    }
}

/// One application managed by the host.
#[derive(Debug)]
pub struct Application {
    /// Display name used in logs.
    pub name: String,
    /// Configuration path the application is registered under.
    pub path: String,
    /// Runtime instance id.
    pub id: Uuid,
    /// Current state (0=Running, 1=Draining, 2=Stopped).
    state: AtomicU8,
    /// Number of requests currently being handled.
    in_flight: AtomicUsize,
}

impl Application {
    /// Create a new application in the `Running` state.
    pub fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            id: Uuid::new_v4(),
            state: AtomicU8::new(AppState::Running as u8),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Get the current state.
    pub fn state(&self) -> AppState {
        AppState::from(self.state.load(Ordering::Acquire))
    }

    /// Get the current number of in-flight requests.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Begin handling a request.
    ///
    /// Returns a guard that releases the slot on drop, or `None` unless the
    /// application is `Running`.
    pub fn begin_request(self: &Arc<Self>) -> Option<RequestGuard> {
        if self.state() != AppState::Running {
            return None;
        }
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        Some(RequestGuard {
            application: Arc::clone(self),
        })
    }

    /// Stop the application, waiting up to `drain_timeout` for in-flight
    /// requests to finish.
    ///
    /// Stopping an application that is already draining or stopped is a
    /// no-op. When the deadline passes with requests still in flight the
    /// application is marked stopped anyway and the remainder is reported.
    pub async fn stop(&self, drain_timeout: Duration) -> Result<(), ManagerError> {
        if self
            .state
            .compare_exchange(
                AppState::Running as u8,
                AppState::Draining as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return Ok(());
        }

        tracing::info!(name = %self.name, path = %self.path, id = %self.id, "Draining application");

        let deadline = Instant::now() + drain_timeout;
        loop {
            let remaining = self.in_flight.load(Ordering::Acquire);
            if remaining == 0 {
                break;
            }
            if Instant::now() >= deadline {
                self.state.store(AppState::Stopped as u8, Ordering::Release);
                tracing::warn!(name = %self.name, remaining, "Application drain deadline passed");
                return Err(ManagerError::DrainTimeout {
                    name: self.name.clone(),
                    remaining,
                });
            }
            tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
        }

        self.state.store(AppState::Stopped as u8, Ordering::Release);
        tracing::info!(name = %self.name, path = %self.path, "Application stopped");
        Ok(())
    }
}

/// A RAII guard that tracks one in-flight request.
#[derive(Debug)]
pub struct RequestGuard {
    application: Arc<Application>,
}

impl Deref for RequestGuard {
    type Target = Application;
    fn deref(&self) -> &Self::Target {
        &self.application
    }
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        self.application.in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}
