//! Command-line arguments for the monitor binary
//!
//! Every flag can also be set through the environment; CLI values beat the
//! config file.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::types::{HostName, Port, ThreadCount};

/// Parse port from command line argument
fn parse_port(s: &str) -> Result<Port, String> {
    s.parse::<Port>().map_err(|e| e.to_string())
}

/// Parse a host, rejecting empty values
fn parse_host(s: &str) -> Result<HostName, String> {
    HostName::new(s.to_string()).map_err(|e| e.to_string())
}

/// Parse a poll interval in (possibly fractional) seconds
fn parse_interval(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .parse()
        .map_err(|e| format!("Invalid interval: {}", e))?;
    let interval =
        Duration::try_from_secs_f64(secs).map_err(|e| format!("Invalid interval: {}", e))?;
    if interval.is_zero() {
        return Err("Interval must be greater than 0".to_string());
    }
    Ok(interval)
}

/// Arguments shared by the monitor binaries
#[derive(Parser, Debug, Clone)]
pub struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", env = "GNB_MONITOR_CONFIG")]
    pub config: String,

    /// gNB log file to monitor (overrides config file)
    #[arg(short, long, env = "GNB_MONITOR_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Poll interval in seconds (overrides config file)
    #[arg(short, long, env = "GNB_MONITOR_POLL_INTERVAL", value_parser = parse_interval)]
    pub interval: Option<Duration>,

    /// Host to bind the HTTP API to (overrides config file)
    #[arg(long, env = "GNB_MONITOR_HOST", value_parser = parse_host)]
    pub host: Option<HostName>,

    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "GNB_MONITOR_PORT", value_parser = parse_port)]
    pub port: Option<Port>,

    /// Number of worker threads (default: 1, use 0 for CPU cores)
    #[arg(short, long, env = "GNB_MONITOR_THREADS")]
    pub threads: Option<ThreadCount>,
}

impl CommonArgs {
    /// Overlay the CLI values onto a loaded config
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(path) = &self.log_file {
            config.monitor.log_file = path.clone();
        }
        if let Some(interval) = self.interval {
            config.monitor.poll_interval = interval;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
