//! Chart history: one sample of the headline numbers per poll cycle

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::health::CoreStatusReport;
use crate::ring::RingBuffer;
use crate::state::ExtractionState;

/// One chart sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSeriesPoint {
    /// Wall clock `HH:MM:SS`
    pub label: String,
    pub ue_count: u64,
    pub error_count: usize,
    pub warning_count: usize,
    pub gnb_active: bool,
    pub core_link_active: bool,
    pub core_running: usize,
}

impl TimeSeriesPoint {
    /// Sample `state` and `core` at `at`
    #[must_use]
    pub fn sample(state: &ExtractionState, core: &CoreStatusReport, at: DateTime<Local>) -> Self {
        Self {
            label: at.format("%H:%M:%S").to_string(),
            ue_count: state.connection_count,
            error_count: state.error_count(),
            warning_count: state.warning_count(),
            gnb_active: state.is_running(),
            core_link_active: state.core_link_connected(),
            core_running: core.running_count(),
        }
    }
}

/// Column-oriented view of the history, the layout Chart.js expects
///
/// Status columns are `1`/`0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub ue_count: Vec<u64>,
    pub errors: Vec<usize>,
    pub warnings: Vec<usize>,
    pub gnb_status: Vec<u8>,
    pub ngap_status: Vec<u8>,
    pub core_running: Vec<usize>,
}

impl ChartSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl From<&RingBuffer<TimeSeriesPoint>> for ChartSeries {
    fn from(points: &RingBuffer<TimeSeriesPoint>) -> Self {
        let n = points.len();
        let mut series = Self {
            labels: Vec::with_capacity(n),
            ue_count: Vec::with_capacity(n),
            errors: Vec::with_capacity(n),
            warnings: Vec::with_capacity(n),
            gnb_status: Vec::with_capacity(n),
            ngap_status: Vec::with_capacity(n),
            core_running: Vec::with_capacity(n),
        };
        for point in points.iter() {
            series.labels.push(point.label.clone());
            series.ue_count.push(point.ue_count);
            series.errors.push(point.error_count);
            series.warnings.push(point.warning_count);
            series.gnb_status.push(u8::from(point.gnb_active));
            series.ngap_status.push(u8::from(point.core_link_active));
            series.core_running.push(point.core_running);
        }
        series
    }
}
