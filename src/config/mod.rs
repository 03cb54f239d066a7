//! Configuration module
//!
//! Types, serde defaults, loading (file, environment, created default) and
//! validation for the monitor.

pub mod defaults;
mod loading;
mod types;
mod validation;

pub use loading::{
    ConfigSource, create_default_config, has_env_overrides, load_config, load_config_from_env,
    load_config_with_fallback,
};
pub use types::{Config, CoreConfig, CoreService, MonitorConfig, ServerConfig};
