//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the worker
//! host. All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the worker host.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct HostConfig {
    /// Module lifecycle settings (shutdown delay, drain window).
    pub module: ModuleConfig,

    /// Applications registered when the host starts.
    pub applications: Vec<ApplicationConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Lifecycle settings for the worker-host module.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ModuleConfig {
    /// Delay between a stop notification and manager shutdown, in milliseconds.
    ///
    /// Zero disables the background path and shuts the manager down inline
    /// on the notification itself.
    pub shutdown_delay_ms: u64,

    /// Per-application drain window during shutdown, in milliseconds.
    pub stop_timeout_ms: u64,
}

impl ModuleConfig {
    /// Configured shutdown delay.
    pub fn shutdown_delay(&self) -> Duration {
        Duration::from_millis(self.shutdown_delay_ms)
    }

    /// Configured per-application drain window.
    pub fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            shutdown_delay_ms: 1_000,
            stop_timeout_ms: 10_000,
        }
    }
}

/// One application managed by the host.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ApplicationConfig {
    /// Display name used in logs.
    pub name: String,

    /// Configuration path the application is registered under
    /// (e.g. "/site1/app").
    pub path: String,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HostConfig::default();
        assert_eq!(config.module.shutdown_delay_ms, 1_000);
        assert_eq!(config.module.stop_timeout_ms, 10_000);
        assert!(config.applications.is_empty());
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_duration_helpers() {
        let module = ModuleConfig {
            shutdown_delay_ms: 0,
            stop_timeout_ms: 250,
        };
        assert!(module.shutdown_delay().is_zero());
        assert_eq!(module.stop_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_minimal_toml() {
        let config: HostConfig = toml::from_str(
            r#"
            [module]
            shutdown_delay_ms = 0

            [[applications]]
            name = "site1"
            path = "/site1"
            "#,
        )
        .unwrap();

        assert_eq!(config.module.shutdown_delay_ms, 0);
        // Unset fields fall back to defaults
        assert_eq!(config.module.stop_timeout_ms, 10_000);
        assert_eq!(config.applications.len(), 1);
        assert_eq!(config.applications[0].path, "/site1");
    }
}
