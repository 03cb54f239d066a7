//! Extraction state: the running picture of the gNB built from its log
//!
//! Field names serialize to the keys the dashboard frontend reads
//! (`ngap_status`, `ue_connections`, `zmq_status`, ...).

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;

use crate::ring::RingBuffer;
use crate::types::RingCapacity;

/// Overall gNB status as seen through its log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GnbStatus {
    /// No poll has completed yet
    #[default]
    Unknown,
    /// The log exists but no cell has started
    WaitingForSource,
    /// A cell-start line has been observed
    Running,
    /// The log file did not exist at the last poll
    SourceNotFound,
    /// The last read of the log failed
    Error,
}

impl GnbStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::WaitingForSource => "waiting_for_source",
            Self::Running => "running",
            Self::SourceNotFound => "source_not_found",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for GnbStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// NGAP link between the gNB and the AMF
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreLinkStatus {
    #[default]
    Disconnected,
    Connected,
    Failed,
}

impl CoreLinkStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connected => "connected",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for CoreLinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Radio front-end (ZMQ sample stream) activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RadioLinkStatus {
    #[default]
    Unknown,
    Active,
}

/// Cell configuration announced by a cell-start line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellInfo {
    #[serde(rename = "pci")]
    pub physical_cell_id: u16,
    pub bandwidth_mhz: u32,
    pub tx_antennas: u8,
    pub rx_antennas: u8,
    #[serde(rename = "dl_arfcn")]
    pub downlink_arfcn: u32,
    pub band: u16,
    #[serde(rename = "dl_freq_mhz")]
    pub downlink_freq_mhz: f64,
}

impl fmt::Display for CellInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PCI={}, BW={}MHz, Band n{}",
            self.physical_cell_id, self.bandwidth_mhz, self.band
        )
    }
}

/// One error or warning line kept for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub message: String,
}

/// Error/warning log bounded to the most recent entries
pub type BoundedLog = RingBuffer<LogEntry>;

fn bounded_log() -> BoundedLog {
    RingBuffer::new(RingCapacity::LOG_ENTRIES)
}

/// Metrics extracted from the gNB log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionState {
    pub status: GnbStatus,
    #[serde(rename = "cell_info")]
    pub cell_info: Option<CellInfo>,
    #[serde(rename = "ngap_status")]
    pub core_link_status: CoreLinkStatus,
    #[serde(rename = "ue_connections")]
    pub connection_count: u64,
    #[serde(rename = "errors")]
    pub error_log: BoundedLog,
    #[serde(rename = "warnings")]
    pub warning_log: BoundedLog,
    #[serde(rename = "zmq_status")]
    pub radio_link: RadioLinkStatus,
    pub last_update: Option<DateTime<Local>>,
}

impl Default for ExtractionState {
    fn default() -> Self {
        Self {
            status: GnbStatus::Unknown,
            cell_info: None,
            core_link_status: CoreLinkStatus::Disconnected,
            connection_count: 0,
            error_log: bounded_log(),
            warning_log: bounded_log(),
            radio_link: RadioLinkStatus::Unknown,
            last_update: None,
        }
    }
}

impl ExtractionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the error log, evicting the oldest entry when full
    pub fn record_error(&mut self, timestamp: impl Into<String>, message: impl Into<String>) {
        self.error_log.push(LogEntry {
            timestamp: timestamp.into(),
            message: message.into(),
        });
    }

    /// Append to the warning log, evicting the oldest entry when full
    pub fn record_warning(&mut self, timestamp: impl Into<String>, message: impl Into<String>) {
        self.warning_log.push(LogEntry {
            timestamp: timestamp.into(),
            message: message.into(),
        });
    }

    /// Mark a completed pass over an existing log file
    ///
    /// Supersedes `source_not_found`, `error` and `unknown`.
    pub fn complete_pass(&mut self, at: DateTime<Local>) {
        self.status = if self.cell_info.is_some() {
            GnbStatus::Running
        } else {
            GnbStatus::WaitingForSource
        };
        self.last_update = Some(at);
    }

    /// Mark the log file as absent
    pub fn mark_source_missing(&mut self) {
        self.status = GnbStatus::SourceNotFound;
    }

    /// Mark a failed read and record it as a synthetic error entry
    pub fn mark_read_failure(&mut self, at: DateTime<Local>, cause: &dyn fmt::Display) {
        self.status = GnbStatus::Error;
        self.record_error(at.to_rfc3339(), format!("Parser error: {cause}"));
    }

    #[must_use]
    #[inline]
    pub fn error_count(&self) -> usize {
        self.error_log.len()
    }

    #[must_use]
    #[inline]
    pub fn warning_count(&self) -> usize {
        self.warning_log.len()
    }

    #[must_use]
    #[inline]
    pub fn is_running(&self) -> bool {
        self.status == GnbStatus::Running
    }

    #[must_use]
    #[inline]
    pub fn core_link_connected(&self) -> bool {
        self.core_link_status == CoreLinkStatus::Connected
    }

    /// Pipe-delimited one-line summary in a fixed field order
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = vec![
            format!("Status: {}", self.status),
            format!("NGAP: {}", self.core_link_status),
            format!("Connected UEs: {}", self.connection_count),
        ];
        if let Some(cell) = &self.cell_info {
            parts.push(format!("Cell: {cell}"));
        }
        parts.push(format!("Errors: {}", self.error_count()));
        parts.push(format!("Warnings: {}", self.warning_count()));
        parts.join(" | ")
    }
}
