//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → HostConfig (validated, immutable)
//!     → applied to the application manager via arc-swap
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → delivered to the module as a configuration-change notification
//!     → manager swaps its current config, affected applications recycle
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - A change that fails to load or validate is logged and ignored

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::load_config;
pub use loader::ConfigError;
pub use schema::ApplicationConfig;
pub use schema::HostConfig;
pub use schema::ModuleConfig;
pub use schema::ObservabilityConfig;
pub use validation::validate_config;
pub use validation::ValidationError;
pub use watcher::ConfigWatcher;
