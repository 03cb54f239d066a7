//! Configuration loading from files and environment variables
//!
//! This module handles loading configuration from TOML files and environment variables,
//! with environment variables taking precedence for container deployments:
//!
//! - `GNB_MONITOR_LOG_FILE` - monitored log path
//! - `GNB_MONITOR_POLL_INTERVAL` - poll interval in seconds (fractions allowed)
//! - `GNB_MONITOR_HOST` - HTTP listen host
//! - `GNB_MONITOR_PORT` - HTTP listen port

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::types::Config;
use crate::types::{HostName, Port};

pub const ENV_LOG_FILE: &str = "GNB_MONITOR_LOG_FILE";
pub const ENV_POLL_INTERVAL: &str = "GNB_MONITOR_POLL_INTERVAL";
pub const ENV_HOST: &str = "GNB_MONITOR_HOST";
pub const ENV_PORT: &str = "GNB_MONITOR_PORT";

const ENV_KEYS: [&str; 4] = [ENV_LOG_FILE, ENV_POLL_INTERVAL, ENV_HOST, ENV_PORT];

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from an existing TOML file
    File(PathBuf),
    /// No file; built from defaults plus environment overrides
    Environment,
    /// No file and no overrides; a default file was written
    DefaultCreated(PathBuf),
}

impl ConfigSource {
    /// Human-readable origin for the startup log
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::File(path) => format!("file '{}'", path.display()),
            Self::Environment => "environment variables".to_string(),
            Self::DefaultCreated(path) => {
                format!("newly created default file '{}'", path.display())
            }
        }
    }
}

/// Apply overrides from `lookup` (normally `std::env::var`) onto `config`
fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup(ENV_LOG_FILE) {
        config.monitor.log_file = PathBuf::from(path);
    }

    if let Some(raw) = lookup(ENV_POLL_INTERVAL) {
        let secs: f64 = raw
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {} '{}': {}", ENV_POLL_INTERVAL, raw, e))?;
        config.monitor.poll_interval = Duration::try_from_secs_f64(secs)
            .map_err(|e| anyhow::anyhow!("Invalid {} '{}': {}", ENV_POLL_INTERVAL, raw, e))?;
    }

    if let Some(host) = lookup(ENV_HOST) {
        config.server.host =
            HostName::new(host).map_err(|e| anyhow::anyhow!("Invalid {}: {}", ENV_HOST, e))?;
    }

    if let Some(raw) = lookup(ENV_PORT) {
        config.server.port = raw
            .parse::<Port>()
            .map_err(|e| anyhow::anyhow!("Invalid {}: {}", ENV_PORT, e))?;
    }

    Ok(())
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Whether any monitor override is set in the environment
#[must_use]
pub fn has_env_overrides() -> bool {
    ENV_KEYS.iter().any(|key| std::env::var_os(key).is_some())
}

/// Parse a TOML config string and apply overrides from `lookup`
pub(crate) fn parse_config<F>(content: &str, origin: &str, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config: Config = toml::from_str(content)
        .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", origin, e))?;
    apply_overrides(&mut config, lookup)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from a TOML file, with environment variable overrides
pub fn load_config(config_path: &str) -> Result<Config> {
    let config_content = std::fs::read_to_string(config_path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", config_path, e))?;

    parse_config(&config_content, config_path, env_lookup)
}

/// Build configuration from defaults and environment variables alone
pub fn load_config_from_env() -> Result<Config> {
    let mut config = Config::default();
    apply_overrides(&mut config, env_lookup)?;
    config.validate()?;
    Ok(config)
}

/// Create a default configuration for examples/testing
#[must_use]
pub fn create_default_config() -> Config {
    Config::default()
}

/// Load configuration, falling back when the file does not exist
///
/// 1. `config_path` exists: load it (plus env overrides)
/// 2. Any `GNB_MONITOR_*` variable is set: defaults plus env
/// 3. Otherwise write a default config to `config_path` and use it
pub fn load_config_with_fallback(config_path: &str) -> Result<(Config, ConfigSource)> {
    let path = Path::new(config_path);

    if path.exists() {
        let config = load_config(config_path)?;
        return Ok((config, ConfigSource::File(path.to_path_buf())));
    }

    if has_env_overrides() {
        tracing::info!(
            "Config file '{}' not found, using environment variables",
            config_path
        );
        return Ok((load_config_from_env()?, ConfigSource::Environment));
    }

    let config = create_default_config();
    let content = toml::to_string_pretty(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize default config: {}", e))?;
    std::fs::write(path, content)
        .map_err(|e| anyhow::anyhow!("Failed to write default config '{}': {}", config_path, e))?;
    tracing::info!("Created default config file '{}'", config_path);

    Ok((config, ConfigSource::DefaultCreated(path.to_path_buf())))
}
