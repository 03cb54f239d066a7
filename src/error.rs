//! Error types for the monitoring core
//!
//! None of these terminate the poll loop. Each is converted into extraction
//! state (status, synthetic error entries) or a degraded reading (`unknown`)
//! at the point where it occurs.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// A line matched an extraction pattern but its captured fields were unusable
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClassifyError {
    /// A numeric field of the cell-start line did not fit its type
    #[error("malformed cell field {field}: {value:?}")]
    MalformedCellField { field: &'static str, value: String },

    /// The AMF endpoint of an N2 connection line could not be parsed
    #[error("malformed AMF endpoint {ip}:{port}")]
    MalformedAmfEndpoint { ip: String, port: String },
}

/// Failures the monitoring core handles
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MonitorError {
    /// The monitored log file does not exist
    #[error("log file not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// I/O failure while reading the log file
    #[error("failed to read {}: {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single line could not be classified
    #[error("line {line_number}: {source}")]
    ClassifierFailure {
        line_number: usize,
        #[source]
        source: ClassifyError,
    },

    /// A health probe did not answer in time
    #[error("probe for {unit} timed out after {timeout:?}")]
    DependencyProbeTimeout { unit: String, timeout: Duration },
}
