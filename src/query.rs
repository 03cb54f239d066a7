//! Query surface
//!
//! Read-only view over the [`AggregationStore`] for the HTTP layer. Every
//! answer is built from one consistent read and stamped with the time it was
//! produced. Nothing here fails: before the first poll the defaults are
//! returned.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::callflow::CallFlowMessage;
use crate::config::Config;
use crate::constants::{defaults::PARSER_VERSION, store::RECENT_EVENTS};
use crate::event::Event;
use crate::health::CoreStatusReport;
use crate::history::ChartSeries;
use crate::state::ExtractionState;
use crate::store::AggregationStore;

#[derive(Debug, Clone, Serialize)]
pub struct MetricsResponse {
    #[serde(flatten)]
    pub state: ExtractionState,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventsResponse {
    pub events: Vec<Event>,
    pub count: usize,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process answers
    pub status: &'static str,
    pub monitoring: bool,
    pub log_file: PathBuf,
    pub log_exists: bool,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigResponse {
    pub log_file: PathBuf,
    /// Poll interval in seconds
    pub update_interval: f64,
    pub parser_version: &'static str,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartResponse {
    pub data: ChartSeries,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoreStatusResponse {
    pub status: CoreStatusReport,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallFlowResponse {
    pub messages: Vec<CallFlowMessage>,
    pub timestamp: DateTime<Local>,
}

/// Handle shared by every request
#[derive(Debug, Clone)]
pub struct Dashboard {
    store: AggregationStore,
    config: Arc<Config>,
}

impl Dashboard {
    #[must_use]
    pub fn new(store: AggregationStore, config: Arc<Config>) -> Self {
        Self { store, config }
    }

    #[must_use]
    pub fn store(&self) -> &AggregationStore {
        &self.store
    }

    #[must_use]
    pub fn get_metrics(&self) -> MetricsResponse {
        MetricsResponse {
            state: self.store.snapshot(),
            timestamp: Local::now(),
        }
    }

    /// The newest recent events, oldest first
    #[must_use]
    pub fn get_events(&self) -> EventsResponse {
        let events = self.store.recent_events(RECENT_EVENTS);
        EventsResponse {
            count: events.len(),
            events,
            timestamp: Local::now(),
        }
    }

    #[must_use]
    pub fn get_summary(&self) -> SummaryResponse {
        SummaryResponse {
            summary: self.store.snapshot().summary(),
            timestamp: Local::now(),
        }
    }

    #[must_use]
    pub fn get_health(&self) -> HealthResponse {
        let log_file = self.config.monitor.log_file.clone();
        HealthResponse {
            status: "ok",
            monitoring: self.store.is_monitoring(),
            log_exists: log_file.exists(),
            log_file,
            timestamp: Local::now(),
        }
    }

    #[must_use]
    pub fn get_config(&self) -> ConfigResponse {
        ConfigResponse {
            log_file: self.config.monitor.log_file.clone(),
            update_interval: self.config.monitor.poll_interval.as_secs_f64(),
            parser_version: PARSER_VERSION,
            timestamp: Local::now(),
        }
    }

    #[must_use]
    pub fn get_chart_data(&self) -> ChartResponse {
        ChartResponse {
            data: self.store.chart_series(),
            timestamp: Local::now(),
        }
    }

    /// Last sampled core status; every service `unknown` before the first
    #[must_use]
    pub fn get_external_core_status(&self) -> CoreStatusResponse {
        let status = self.store.core_status().unwrap_or_else(|| {
            CoreStatusReport::unknown(self.config.core.services.iter().map(|s| &s.name))
        });
        CoreStatusResponse {
            status,
            timestamp: Local::now(),
        }
    }

    #[must_use]
    pub fn get_call_flow(&self) -> CallFlowResponse {
        CallFlowResponse {
            messages: self.store.call_flow(),
            timestamp: Local::now(),
        }
    }
}
