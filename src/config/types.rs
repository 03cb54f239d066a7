//! Configuration types
//!
//! Every field has a serde default, so an empty file is a valid config.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::defaults;
use crate::store::StoreCapacity;
use crate::types::{HostName, Port, RingCapacity, ServiceName, TailLines, UnitName, duration_serde};

/// Main monitor configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Monitored log file and polling
    #[serde(default)]
    pub monitor: MonitorConfig,
    /// HTTP listener
    #[serde(default)]
    pub server: ServerConfig,
    /// 5G core services to probe
    #[serde(default)]
    pub core: CoreConfig,
}

/// Log source and poll loop settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "defaults::log_file")]
    pub log_file: PathBuf,
    /// Time between poll cycles, in seconds
    #[serde(with = "duration_serde", default = "defaults::poll_interval")]
    pub poll_interval: Duration,
    /// Trailing lines read per tail pass
    #[serde(default = "defaults::tail_lines")]
    pub tail_lines: TailLines,
    #[serde(default = "defaults::recent_events")]
    pub recent_events: RingCapacity,
    #[serde(default = "defaults::history_points")]
    pub history_points: RingCapacity,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            log_file: defaults::log_file(),
            poll_interval: defaults::poll_interval(),
            tail_lines: defaults::tail_lines(),
            recent_events: defaults::recent_events(),
            history_points: defaults::history_points(),
        }
    }
}

impl MonitorConfig {
    /// Ring sizes for the aggregation store
    #[must_use]
    pub fn store_capacity(&self) -> StoreCapacity {
        StoreCapacity {
            events: self.recent_events,
            history: self.history_points,
            ..StoreCapacity::default()
        }
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "defaults::host")]
    pub host: HostName,
    #[serde(default = "defaults::port")]
    pub port: Port,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::host(),
            port: defaults::port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Core service probing settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Timeout for each `systemctl is-active` call, in seconds
    #[serde(with = "duration_serde", default = "defaults::probe_timeout")]
    pub probe_timeout: Duration,
    #[serde(default = "defaults::core_services")]
    pub services: Vec<CoreService>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            probe_timeout: defaults::probe_timeout(),
            services: defaults::core_services(),
        }
    }
}

/// One probed network function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreService {
    /// Key used in the status report (e.g. `amf`)
    pub name: ServiceName,
    /// systemd unit (e.g. `open5gs-amfd`)
    pub unit: UnitName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = toml::from_str(
            r#"
            [monitor]
            log_file = "/var/log/gnb.log"
            poll_interval = 0.5

            [server]
            port = 8080
            "#,
        )
        .unwrap();

        assert_eq!(config.monitor.log_file, PathBuf::from("/var/log/gnb.log"));
        assert_eq!(config.monitor.poll_interval, Duration::from_millis(500));
        assert_eq!(config.monitor.tail_lines.get(), 100);
        assert_eq!(config.server.port.get(), 8080);
        assert_eq!(config.server.host.as_str(), "0.0.0.0");
        assert_eq!(config.core.services.len(), 8);
    }

    #[test]
    fn test_custom_services() {
        let config: Config = toml::from_str(
            r#"
            [core]
            probe_timeout = 1
            [[core.services]]
            name = "amf"
            unit = "open5gs-amfd"
            "#,
        )
        .unwrap();
        assert_eq!(config.core.probe_timeout, Duration::from_secs(1));
        assert_eq!(config.core.services.len(), 1);
        assert_eq!(config.core.services[0].unit.as_str(), "open5gs-amfd");
    }

    #[test]
    fn test_invalid_unit_rejected() {
        let result: Result<Config, _> = toml::from_str(
            r#"
            [[core.services]]
            name = "amf"
            unit = "--now"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_tail_lines_rejected() {
        let result: Result<Config, _> = toml::from_str("[monitor]\ntail_lines = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_round_trip_default() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_listen_addr() {
        assert_eq!(ServerConfig::default().listen_addr(), "0.0.0.0:5000");
    }
}
