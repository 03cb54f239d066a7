//! Aggregation store
//!
//! Single-writer, many-reader holder of everything the dashboard shows. One
//! `parking_lot::RwLock` covers the extraction state and every ring, and each
//! write method is one critical section, so a reader always sees the state
//! and the rings from the same poll cycle.

use chrono::{DateTime, Local};
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::callflow::{CallFlowMessage, CallFlowTracker};
use crate::event::Event;
use crate::health::CoreStatusReport;
use crate::history::{ChartSeries, TimeSeriesPoint};
use crate::ring::RingBuffer;
use crate::state::ExtractionState;
use crate::types::RingCapacity;

/// Ring sizes for a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreCapacity {
    pub events: RingCapacity,
    pub history: RingCapacity,
    pub call_flow: RingCapacity,
}

impl Default for StoreCapacity {
    fn default() -> Self {
        Self {
            events: RingCapacity::EVENTS,
            history: RingCapacity::HISTORY,
            call_flow: RingCapacity::CALL_FLOW,
        }
    }
}

#[derive(Debug)]
struct Inner {
    state: ExtractionState,
    events: RingBuffer<Event>,
    history: RingBuffer<TimeSeriesPoint>,
    call_flow: CallFlowTracker,
    core_status: Option<CoreStatusReport>,
}

/// Cheaply cloneable handle to the shared dashboard state
#[derive(Debug, Clone)]
pub struct AggregationStore {
    inner: Arc<RwLock<Inner>>,
    /// Set while a poller is driving this store
    monitoring: Arc<AtomicBool>,
}

impl Default for AggregationStore {
    fn default() -> Self {
        Self::new(StoreCapacity::default())
    }
}

impl AggregationStore {
    #[must_use]
    pub fn new(capacity: StoreCapacity) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                state: ExtractionState::new(),
                events: RingBuffer::new(capacity.events),
                history: RingBuffer::new(capacity.history),
                call_flow: CallFlowTracker::new(capacity.call_flow),
                core_status: None,
            })),
            monitoring: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    #[inline]
    pub fn is_monitoring(&self) -> bool {
        self.monitoring.load(Ordering::Acquire)
    }

    pub(crate) fn set_monitoring(&self, active: bool) {
        self.monitoring.store(active, Ordering::Release);
    }

    /// Copy of the current extraction state
    #[must_use]
    pub fn snapshot(&self) -> ExtractionState {
        self.inner.read().state.clone()
    }

    /// The newest `n` events, oldest first
    #[must_use]
    pub fn recent_events(&self, n: usize) -> Vec<Event> {
        self.inner.read().events.tail(n).cloned().collect()
    }

    /// State and the newest `n` events, read under one lock
    #[must_use]
    pub fn snapshot_with_events(&self, n: usize) -> (ExtractionState, Vec<Event>) {
        let inner = self.inner.read();
        (inner.state.clone(), inner.events.tail(n).cloned().collect())
    }

    /// Publish the result of one tail pass
    ///
    /// Replaces the extraction state, appends the events to the recent-events
    /// ring and feeds the lines to the call-flow tracker.
    pub fn append_poll_result(
        &self,
        state: ExtractionState,
        events: Vec<Event>,
        lines: &[String],
    ) {
        let now = Local::now();
        let mut inner = self.inner.write();
        inner.state = state;
        for event in events {
            inner.events.push(event);
        }
        inner
            .call_flow
            .observe_lines(lines.iter().map(String::as_str), &now);
    }

    pub fn record_time_series_point(&self, point: TimeSeriesPoint) {
        self.inner.write().history.push(point);
    }

    /// Store a core health sample and the chart point derived from it
    pub fn record_sample(&self, core: CoreStatusReport, at: DateTime<Local>) {
        let mut inner = self.inner.write();
        let point = TimeSeriesPoint::sample(&inner.state, &core, at);
        inner.history.push(point);
        inner.core_status = Some(core);
    }

    #[must_use]
    pub fn chart_series(&self) -> ChartSeries {
        ChartSeries::from(&self.inner.read().history)
    }

    /// Latest core health sample, `None` before the first cycle
    #[must_use]
    pub fn core_status(&self) -> Option<CoreStatusReport> {
        self.inner.read().core_status.clone()
    }

    #[must_use]
    pub fn call_flow(&self) -> Vec<CallFlowMessage> {
        self.inner.read().call_flow.messages()
    }
}
