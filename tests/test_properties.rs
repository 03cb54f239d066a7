//! Property-based tests for the classifier and the bounded logs
//!
//! - Feeding lines one at a time or as a batch gives the same result
//! - Error and warning logs never exceed their bound and keep the newest
//! - Chart history keeps the newest points in order

mod common;

use chrono::{Local, TimeZone};
use common::{ACCEPTED_LINE, CELL_LINE, N2_FAILED_LINE, N2_LINE, ZMQ_LINE, error_line, ue_line};
use gnb_monitor::types::ServiceName;
use gnb_monitor::{
    AggregationStore, CoreLinkStatus, CoreStatusReport, ExtractionState, GnbStatus,
    LineClassifier, ServiceStatus,
};
use proptest::prelude::*;

fn log_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(CELL_LINE.to_string()),
        Just(N2_LINE.to_string()),
        Just(N2_FAILED_LINE.to_string()),
        Just(ACCEPTED_LINE.to_string()),
        Just(ZMQ_LINE.to_string()),
        Just("N2: Connection to AMF on 10.0.0.1:70000 completed".to_string()),
        (1u32..1000).prop_map(ue_line),
        (1u32..1000).prop_map(error_line),
        "[a-zA-Z ]{0,40}".prop_map(|s| format!("[PHY] Warning {s}")),
        "[a-z0-9 :.\\[\\]]{0,60}",
    ]
}

proptest! {
    /// Property: one-at-a-time and batch classification agree
    #[test]
    fn prop_batch_matches_single(lines in prop::collection::vec(log_line(), 0..300)) {
        let classifier = LineClassifier::new();

        let mut one_by_one = ExtractionState::new();
        let mut single_events = Vec::new();
        for line in &lines {
            single_events.extend(classifier.classify_lines([line.as_str()], &mut one_by_one));
        }

        let mut batched = ExtractionState::new();
        let batch_events =
            classifier.classify_lines(lines.iter().map(String::as_str), &mut batched);

        prop_assert_eq!(one_by_one, batched);
        prop_assert_eq!(single_events, batch_events);
    }

    /// Property: logs stay within 100 entries whatever the input
    #[test]
    fn prop_logs_bounded(lines in prop::collection::vec(log_line(), 0..400)) {
        let mut state = ExtractionState::new();
        LineClassifier::new().classify_lines(lines.iter().map(String::as_str), &mut state);

        prop_assert!(state.error_count() <= 100);
        prop_assert!(state.warning_count() <= 100);
    }

    /// Property: the connection count equals the number of attach events
    #[test]
    fn prop_connection_count_matches_events(lines in prop::collection::vec(log_line(), 0..200)) {
        let mut state = ExtractionState::new();
        let events =
            LineClassifier::new().classify_lines(lines.iter().map(String::as_str), &mut state);
        let attaches = events.iter().filter(|e| e.kind.name() == "ue_attached").count();
        prop_assert_eq!(state.connection_count, attaches as u64);
    }

    /// Property: history keeps the newest points, oldest first
    #[test]
    fn prop_history_keeps_newest(cycles in 1usize..120) {
        let store = AggregationStore::default();
        let core = CoreStatusReport::new(vec![(
            ServiceName::new("amf".to_string()).unwrap(),
            ServiceStatus::Running,
        )]);
        for cycle in 0..cycles {
            let mut state = ExtractionState::new();
            state.connection_count = cycle as u64;
            store.append_poll_result(state, Vec::new(), &[]);
            store.record_sample(core.clone(), Local::now());
        }

        let series = store.chart_series();
        let expected: Vec<u64> = (cycles.saturating_sub(50)..cycles).map(|c| c as u64).collect();
        prop_assert_eq!(series.ue_count, expected);
    }
}

#[test]
fn test_error_log_keeps_last_hundred() {
    let lines: Vec<String> = (1..=150).map(error_line).collect();
    let mut state = ExtractionState::new();
    LineClassifier::new().classify_lines(lines.iter().map(String::as_str), &mut state);

    let kept: Vec<_> = state.error_log.iter().map(|e| e.message.clone()).collect();
    let expected: Vec<_> = (51..=150).map(error_line).collect();
    assert_eq!(kept, expected);
}

#[test]
fn test_cell_then_failure_sequence() {
    let mut state = ExtractionState::new();
    LineClassifier::new().classify_lines([CELL_LINE, N2_LINE, N2_FAILED_LINE], &mut state);
    assert_eq!(state.status, GnbStatus::Running);
    assert_eq!(state.core_link_status, CoreLinkStatus::Failed);

    let at = Local.with_ymd_and_hms(2025, 12, 26, 16, 0, 0).unwrap();
    state.complete_pass(at);
    assert_eq!(state.last_update, Some(at));
    assert_eq!(state.status, GnbStatus::Running);
}
