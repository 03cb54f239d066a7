//! Constants used throughout the monitor
//!
//! This module centralizes limits and default values so the bounded
//! structures and their tests agree on the same numbers.

use std::time::Duration;

/// Log tailing limits
pub mod tail {
    /// Number of trailing lines read per pass
    pub const DEFAULT_LINES: usize = 100;

    /// Backward read chunk size when searching for line starts (8KB)
    pub const CHUNK_SIZE: usize = 8 * 1024;

    /// Hard ceiling on bytes read in one pass (4MB)
    /// Guards against a single pathological line with no newlines
    pub const MAX_WINDOW_BYTES: u64 = 4 * 1024 * 1024;
}

/// Extraction state limits
pub mod state {
    /// Maximum entries kept in each of the error and warning logs
    pub const MAX_LOG_ENTRIES: usize = 100;

    /// Timestamp recorded when a line carries none
    pub const UNKNOWN_TIMESTAMP: &str = "unknown";
}

/// Aggregation store ring sizes
pub mod store {
    /// Number of recent events retained for the events endpoint
    pub const RECENT_EVENTS: usize = 50;

    /// Number of time-series points retained for charts
    pub const HISTORY_POINTS: usize = 50;

    /// Number of call-flow messages retained
    pub const CALL_FLOW_MESSAGES: usize = 20;
}

/// Poll loop timing
pub mod poll {
    use super::Duration;

    /// Interval between poll cycles
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

    /// Intervals below this are accepted but logged as a warning
    pub const MIN_RECOMMENDED_INTERVAL: Duration = Duration::from_secs(1);
}

/// Core network service probing
pub mod probe {
    use super::Duration;

    /// Timeout applied to each individual service probe
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

    /// Service manager binary used for probing
    pub const SYSTEMCTL: &str = "systemctl";

    /// Output of `systemctl is-active` for a running unit
    pub const ACTIVE: &str = "active";

    /// Default Open5GS network functions: (display name, systemd unit)
    pub const DEFAULT_SERVICES: &[(&str, &str)] = &[
        ("amf", "open5gs-amfd"),
        ("smf", "open5gs-smfd"),
        ("upf", "open5gs-upfd"),
        ("nrf", "open5gs-nrfd"),
        ("ausf", "open5gs-ausfd"),
        ("udm", "open5gs-udmd"),
        ("pcf", "open5gs-pcfd"),
        ("bsf", "open5gs-bsfd"),
    ];
}

/// Defaults for the monitored source and HTTP listener
pub mod defaults {
    /// Log file written by the gNB
    pub const LOG_FILE: &str = "/tmp/gnb.log";

    /// HTTP listen host
    pub const HOST: &str = "0.0.0.0";

    /// HTTP listen port
    pub const PORT: u16 = 5000;

    /// Reported by the config endpoint
    pub const PARSER_VERSION: &str = "1.0.0";
}
