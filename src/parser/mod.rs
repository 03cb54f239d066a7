//! Line classifier
//!
//! Turns one gNB log line into at most one [`Event`], mutating the
//! [`ExtractionState`] as a side effect. Rules are tried in a fixed order and
//! the first terminal match wins:
//!
//! 1. cell start
//! 2. N2 connection to the AMF completed
//! 3. CU-CP failed to connect to the AMF
//! 4. ZMQ radio activity (not terminal, see [`LineClassifier::classify`])
//! 5. UE attached
//! 6. `error`, any case
//! 7. `warn`, any case
//!
//! No I/O happens here.

pub mod patterns;

use regex::Captures;
use std::net::Ipv4Addr;
use std::str::FromStr;
use tracing::warn;

use crate::constants::state::UNKNOWN_TIMESTAMP;
use crate::error::{ClassifyError, MonitorError};
use crate::event::{Event, EventKind};
use crate::state::{CellInfo, CoreLinkStatus, ExtractionState, GnbStatus, RadioLinkStatus};

pub use patterns::find_timestamp;

/// Stateless rule engine over the compiled patterns
#[derive(Debug, Clone, Copy, Default)]
pub struct LineClassifier;

impl LineClassifier {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Classify one line
    ///
    /// A radio-activity line marks the radio link active and then keeps
    /// going: if a UE, error or warning rule also matches, that event is the
    /// result, otherwise a `RadioActivity` event is.
    ///
    /// On `Err` the state has not been touched.
    pub fn classify(
        &self,
        line: &str,
        state: &mut ExtractionState,
    ) -> Result<Option<Event>, ClassifyError> {
        let timestamp = find_timestamp(line);

        if let Some(caps) = patterns::CELL_START.captures(line) {
            let cell = parse_cell(&caps)?;
            state.cell_info = Some(cell.clone());
            state.status = GnbStatus::Running;
            return Ok(Some(Event::new(timestamp, EventKind::CellStart(cell))));
        }

        if let Some(caps) = patterns::CORE_LINK_CONNECTED.captures(line) {
            let (amf_ip, amf_port) = parse_amf_endpoint(&caps)?;
            state.core_link_status = CoreLinkStatus::Connected;
            return Ok(Some(Event::new(
                timestamp,
                EventKind::CoreLinkConnected { amf_ip, amf_port },
            )));
        }

        if patterns::CORE_LINK_FAILED.is_match(line) {
            state.core_link_status = CoreLinkStatus::Failed;
            return Ok(Some(Event::new(timestamp, EventKind::CoreLinkFailed)));
        }

        let radio_active = patterns::RADIO_ACTIVITY.is_match(line);
        if radio_active {
            state.radio_link = RadioLinkStatus::Active;
        }

        if patterns::UE_ATTACHED.is_match(line) {
            state.connection_count += 1;
            return Ok(Some(Event::new(
                timestamp,
                EventKind::UeAttached {
                    total_ues: state.connection_count,
                },
            )));
        }

        if patterns::ERROR.is_match(line) {
            let message = line.trim().to_string();
            state.record_error(timestamp.unwrap_or(UNKNOWN_TIMESTAMP), message.clone());
            return Ok(Some(Event::new(
                timestamp,
                EventKind::ErrorDetected { message },
            )));
        }

        if patterns::WARNING.is_match(line) {
            let message = line.trim().to_string();
            state.record_warning(timestamp.unwrap_or(UNKNOWN_TIMESTAMP), message.clone());
            return Ok(Some(Event::new(
                timestamp,
                EventKind::WarningDetected { message },
            )));
        }

        Ok(radio_active.then(|| Event::new(timestamp, EventKind::RadioActivity)))
    }

    /// Classify lines in order, collecting the events they produce
    ///
    /// A line that fails classification is recorded in the error log as
    /// `Parser error: <cause>` (stamped with the line's own timestamp) and the
    /// batch continues.
    pub fn classify_lines<'a, I>(&self, lines: I, state: &mut ExtractionState) -> Vec<Event>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut events = Vec::new();
        for (index, line) in lines.into_iter().enumerate() {
            match self.classify(line, state) {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                Err(source) => {
                    let timestamp = find_timestamp(line).unwrap_or(UNKNOWN_TIMESTAMP);
                    state.record_error(timestamp, format!("Parser error: {source}"));
                    let err = MonitorError::ClassifierFailure {
                        line_number: index + 1,
                        source,
                    };
                    warn!(error = %err, "Skipping unclassifiable log line");
                }
            }
        }
        events
    }
}

fn parse_field<T: FromStr>(
    caps: &Captures<'_>,
    group: usize,
    field: &'static str,
) -> Result<T, ClassifyError> {
    let raw = caps.get(group).map_or("", |m| m.as_str());
    raw.parse().map_err(|_| ClassifyError::MalformedCellField {
        field,
        value: raw.to_string(),
    })
}

fn parse_cell(caps: &Captures<'_>) -> Result<CellInfo, ClassifyError> {
    Ok(CellInfo {
        physical_cell_id: parse_field(caps, 1, "pci")?,
        bandwidth_mhz: parse_field(caps, 2, "bandwidth_mhz")?,
        tx_antennas: parse_field(caps, 3, "tx_antennas")?,
        rx_antennas: parse_field(caps, 4, "rx_antennas")?,
        downlink_arfcn: parse_field(caps, 5, "dl_arfcn")?,
        band: parse_field(caps, 6, "band")?,
        downlink_freq_mhz: parse_field(caps, 7, "dl_freq_mhz")?,
    })
}

fn parse_amf_endpoint(caps: &Captures<'_>) -> Result<(Ipv4Addr, u16), ClassifyError> {
    let ip = caps.get(1).map_or("", |m| m.as_str());
    let port = caps.get(2).map_or("", |m| m.as_str());
    match (ip.parse(), port.parse()) {
        (Ok(ip), Ok(port)) => Ok((ip, port)),
        _ => Err(ClassifyError::MalformedAmfEndpoint {
            ip: ip.to_string(),
            port: port.to_string(),
        }),
    }
}
