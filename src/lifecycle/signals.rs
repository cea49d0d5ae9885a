//! OS signal handling.
//!
//! # Responsibilities
//! - Register signal handlers (SIGINT, SIGTERM)
//! - Translate signals to host notifications
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - SIGINT maps to the stop-listening notification, SIGTERM to the
//!   application-stop notification
//! - On non-Unix targets only Ctrl-C is available and maps to
//!   stop-listening

/// Host-level event decoded from an OS signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSignal {
    /// The server has stopped accepting new connections.
    StopListening,
    /// The worker process has been asked to stop.
    ApplicationStop,
}

/// Listens for process signals and yields [`HostSignal`] events.
pub struct SignalListener {
    #[cfg(unix)]
    interrupt: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl SignalListener {
    /// Register the signal handlers.
    pub fn new() -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    /// Wait for the next signal.
    ///
    /// Returns `None` if every handler stream has closed.
    pub async fn recv(&mut self) -> Option<HostSignal> {
        tokio::select! {
            sig = self.interrupt.recv() => sig.map(|_| HostSignal::StopListening),
            sig = self.terminate.recv() => sig.map(|_| HostSignal::ApplicationStop),
        }
    }
}

#[cfg(not(unix))]
impl SignalListener {
    /// Register the signal handlers.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {})
    }

    /// Wait for the next signal.
    pub async fn recv(&mut self) -> Option<HostSignal> {
        match tokio::signal::ctrl_c().await {
            Ok(()) => Some(HostSignal::StopListening),
            Err(error) => {
                tracing::error!(%error, "Signal handler failed");
                None
            }
        }
    }
}
