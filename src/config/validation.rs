//! Configuration validation
//!
//! This module provides validation logic for the configuration to ensure
//! all settings are valid before the monitor starts.

use anyhow::Result;
use std::collections::HashSet;

use super::types::{Config, CoreConfig, MonitorConfig};
use crate::constants::poll::MIN_RECOMMENDED_INTERVAL;

impl Config {
    /// Validate configuration for correctness
    ///
    /// Non-zero limits, ports and names are enforced by their types. This
    /// checks what remains:
    /// - a non-empty log path and a non-zero poll interval
    /// - a non-zero probe timeout
    /// - at least one core service, with unique names
    pub fn validate(&self) -> Result<()> {
        validate_monitor(&self.monitor)?;
        validate_core(&self.core)?;
        Ok(())
    }
}

fn validate_monitor(monitor: &MonitorConfig) -> Result<()> {
    if monitor.log_file.as_os_str().is_empty() {
        return Err(anyhow::anyhow!("monitor.log_file cannot be empty"));
    }

    if monitor.poll_interval.is_zero() {
        return Err(anyhow::anyhow!("monitor.poll_interval must be greater than 0"));
    }

    if monitor.poll_interval < MIN_RECOMMENDED_INTERVAL {
        tracing::warn!(
            "monitor.poll_interval is {:?} (< {:?}). Each cycle also probes every core \
             service, so short intervals add noticeable systemd load.",
            monitor.poll_interval,
            MIN_RECOMMENDED_INTERVAL
        );
    }

    Ok(())
}

fn validate_core(core: &CoreConfig) -> Result<()> {
    if core.probe_timeout.is_zero() {
        return Err(anyhow::anyhow!("core.probe_timeout must be greater than 0"));
    }

    if core.services.is_empty() {
        return Err(anyhow::anyhow!(
            "Configuration must have at least one core service"
        ));
    }

    let mut seen = HashSet::with_capacity(core.services.len());
    for service in &core.services {
        if !seen.insert(service.name.as_str()) {
            return Err(anyhow::anyhow!(
                "Duplicate core service name '{}'",
                service.name
            ));
        }
    }

    Ok(())
}
