//! Default values for configuration fields
//!
//! This module centralizes all default value functions used in serde deserialization.

use std::path::PathBuf;
use std::time::Duration;

use super::types::CoreService;
use crate::constants;
use crate::types::{HostName, Port, RingCapacity, ServiceName, TailLines, UnitName};

/// Log file written by the gNB
#[inline]
pub fn log_file() -> PathBuf {
    PathBuf::from(constants::defaults::LOG_FILE)
}

#[inline]
pub fn poll_interval() -> Duration {
    constants::poll::DEFAULT_INTERVAL
}

#[inline]
pub fn tail_lines() -> TailLines {
    TailLines::DEFAULT
}

#[inline]
pub fn recent_events() -> RingCapacity {
    RingCapacity::EVENTS
}

#[inline]
pub fn history_points() -> RingCapacity {
    RingCapacity::HISTORY
}

/// Dashboard listen host (all interfaces)
#[inline]
pub fn host() -> HostName {
    HostName::new(constants::defaults::HOST.to_string()).expect("default host is non-empty")
}

#[inline]
pub fn port() -> Port {
    Port::DEFAULT
}

#[inline]
pub fn probe_timeout() -> Duration {
    constants::probe::DEFAULT_TIMEOUT
}

/// The Open5GS network functions run by a standard install
pub fn core_services() -> Vec<CoreService> {
    constants::probe::DEFAULT_SERVICES
        .iter()
        .map(|(name, unit)| CoreService {
            name: ServiceName::new((*name).to_string()).expect("default service names are valid"),
            unit: UnitName::new((*unit).to_string()).expect("default unit names are valid"),
        })
        .collect()
}
