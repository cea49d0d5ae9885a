//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check application entries (non-empty names, rooted unique paths)
//! - Validate observability settings before they reach the subscriber
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HostConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::HostConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic violation found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An application entry has an empty name.
    #[error("application at path {path:?} has an empty name")]
    EmptyApplicationName { path: String },

    /// An application path is not rooted at '/'.
    #[error("application {name:?} has invalid path {path:?}: paths start with '/'")]
    InvalidApplicationPath { name: String, path: String },

    /// Two applications share the same configuration path.
    #[error("duplicate application path {path:?}")]
    DuplicateApplicationPath { path: String },

    /// The log level is not one of the supported names.
    #[error("unknown log level {level:?}")]
    UnknownLogLevel { level: String },

    /// The metrics address cannot be parsed as a socket address.
    #[error("invalid metrics address {address:?}")]
    InvalidMetricsAddress { address: String },
}

/// Validate a configuration, collecting every violation found.
pub fn validate_config(config: &HostConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen_paths = HashSet::new();

    for application in &config.applications {
        if application.name.trim().is_empty() {
            errors.push(ValidationError::EmptyApplicationName {
                path: application.path.clone(),
            });
        }
        if !application.path.starts_with('/') {
            errors.push(ValidationError::InvalidApplicationPath {
                name: application.name.clone(),
                path: application.path.clone(),
            });
        }
        if !seen_paths.insert(application.path.clone()) {
            errors.push(ValidationError::DuplicateApplicationPath {
                path: application.path.clone(),
            });
        }
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel {
            level: config.observability.log_level.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress {
            address: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
