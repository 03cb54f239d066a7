//! gNB monitoring dashboard backend
//!
//! Tails the base station's log file, extracts cell, core link and UE events
//! from it, samples the core network services and keeps the aggregated state
//! in an [`AggregationStore`] that the HTTP layer reads from.
//!
//! The moving parts, leaves first:
//! - [`parser::LineClassifier`] turns one log line into at most one [`Event`]
//! - [`tailer::LogTailer`] reads the trailing window of the file and feeds the classifier
//! - [`store::AggregationStore`] holds state, recent events and chart history under one lock
//! - [`poller::Poller`] drives the tailer and the health provider on a fixed interval
//! - [`query::Dashboard`] answers read requests from the store

pub mod args;
pub mod callflow;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod health;
pub mod history;
pub mod http;
pub mod logging;
pub mod parser;
pub mod poller;
pub mod query;
pub mod ring;
pub mod runtime;
pub mod state;
pub mod store;
pub mod tailer;
pub mod types;

pub use args::CommonArgs;
pub use config::{
    Config, ConfigSource, CoreService, create_default_config, load_config,
    load_config_with_fallback,
};
pub use error::{ClassifyError, MonitorError};
pub use event::{Event, EventKind};
pub use health::{
    CoreStatusReport, OverallStatus, ProbeOutcome, ServiceHealthProvider, ServiceStatus,
    SystemctlProbe,
};
pub use history::{ChartSeries, TimeSeriesPoint};
pub use parser::LineClassifier;
pub use poller::{Poller, PollerHandle};
pub use query::Dashboard;
pub use ring::RingBuffer;
pub use runtime::{RuntimeConfig, shutdown_signal};
pub use state::{CellInfo, CoreLinkStatus, ExtractionState, GnbStatus, RadioLinkStatus};
pub use store::{AggregationStore, StoreCapacity};
pub use tailer::{FileStamp, LogTailer, TailCursor, TailOutcome};
