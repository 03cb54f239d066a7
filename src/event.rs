//! Structured events extracted from gNB log lines
//!
//! Serialized as `{"timestamp": ..., "type": ..., "data": {...}}`, the shape
//! the dashboard's event feed consumes.

use serde::Serialize;
use std::net::Ipv4Addr;

use crate::constants::state::UNKNOWN_TIMESTAMP;
use crate::state::CellInfo;

/// Kind-specific payload of an [`Event`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum EventKind {
    /// The radio cell came up with this configuration
    CellStart(CellInfo),
    /// NGAP association with the AMF completed
    #[serde(rename = "ngap_connected")]
    CoreLinkConnected { amf_ip: Ipv4Addr, amf_port: u16 },
    /// The CU-CP gave up connecting to the AMF
    #[serde(rename = "ngap_failed")]
    CoreLinkFailed,
    /// The ZMQ radio front-end is exchanging samples
    #[serde(rename = "zmq_activity")]
    RadioActivity,
    /// A UE attached; carries the running total
    UeAttached { total_ues: u64 },
    #[serde(rename = "error")]
    ErrorDetected { message: String },
    #[serde(rename = "warning")]
    WarningDetected { message: String },
}

impl EventKind {
    /// Wire name of the variant
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CellStart(_) => "cell_start",
            Self::CoreLinkConnected { .. } => "ngap_connected",
            Self::CoreLinkFailed => "ngap_failed",
            Self::RadioActivity => "zmq_activity",
            Self::UeAttached { .. } => "ue_attached",
            Self::ErrorDetected { .. } => "error",
            Self::WarningDetected { .. } => "warning",
        }
    }
}

/// One classified log line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// Timestamp taken from the line, or `"unknown"`
    pub timestamp: String,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl Event {
    #[must_use]
    pub fn new(timestamp: Option<&str>, kind: EventKind) -> Self {
        Self {
            timestamp: timestamp.unwrap_or(UNKNOWN_TIMESTAMP).to_string(),
            kind,
        }
    }

    #[must_use]
    #[inline]
    pub fn has_timestamp(&self) -> bool {
        self.timestamp != UNKNOWN_TIMESTAMP
    }
}
