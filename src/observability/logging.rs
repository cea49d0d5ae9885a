//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for the host binary
//! - Configure log level from config, overridable via `RUST_LOG`
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins over the configured level so operators can raise
//!   verbosity without touching the config file

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// `default_level` is the configured level used when `RUST_LOG` is unset.
/// Must be called at most once per process.
pub fn init(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("worker_host={default_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
