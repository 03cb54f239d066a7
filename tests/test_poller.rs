//! Poll loop behaviour with static and failing health providers

mod common;

use common::{CELL_LINE, N2_LINE, StaticHealth, append_lines, ue_line};
use gnb_monitor::types::TailLines;
use gnb_monitor::{
    AggregationStore, CoreLinkStatus, GnbStatus, LogTailer, OverallStatus, Poller, ServiceStatus,
};
use async_trait::async_trait;
use gnb_monitor::config::CoreService;
use gnb_monitor::{CoreStatusReport, ProbeOutcome, ServiceHealthProvider};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

fn poller(path: &Path, store: &AggregationStore, running: &[&'static str]) -> Poller {
    Poller::new(
        LogTailer::new(path, TailLines::default()),
        store.clone(),
        Arc::new(StaticHealth::new(running)),
        Duration::from_millis(10),
    )
}

#[tokio::test]
async fn test_missing_file_until_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gnb.log");
    let store = AggregationStore::default();
    let mut poller = poller(&path, &store, &[]);

    for _ in 0..3 {
        poller.poll_once().await;
        assert_eq!(store.snapshot().status, GnbStatus::SourceNotFound);
    }

    append_lines(&path, &[CELL_LINE, N2_LINE]);
    poller.poll_once().await;

    let state = store.snapshot();
    assert_eq!(state.status, GnbStatus::Running);
    assert_eq!(state.core_link_status, CoreLinkStatus::Connected);
    assert_eq!(store.recent_events(50).len(), 2);
    assert_eq!(store.call_flow().len(), 1);
}

#[tokio::test]
async fn test_chart_keeps_latest_fifty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gnb.log");
    append_lines(&path, &[CELL_LINE]);
    let store = AggregationStore::default();
    let mut poller = poller(&path, &store, &["amf", "smf"]);

    for n in 1..=60 {
        append_lines(&path, &[ue_line(n)]);
        poller.poll_once().await;
    }

    let series = store.chart_series();
    assert_eq!(series.len(), 50);
    assert_eq!(series.ue_count.first(), Some(&11));
    assert_eq!(series.ue_count.last(), Some(&60));
    assert!(series.ue_count.windows(2).all(|w| w[0] < w[1]));
    assert!(series.gnb_status.iter().all(|&s| s == 1));
    assert!(series.core_running.iter().all(|&n| n == 2));
}

#[tokio::test]
async fn test_core_status_from_last_sample() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let store = AggregationStore::default();
    let mut poller = poller(file.path(), &store, &["amf"]);

    assert!(store.core_status().is_none());
    poller.poll_once().await;

    let report = store.core_status().unwrap();
    assert_eq!(report.status_of("amf"), Some(ServiceStatus::Running));
    assert_eq!(report.status_of("upf"), Some(ServiceStatus::Stopped));
    assert_eq!(report.running_count(), 1);
    assert_eq!(report.total_count(), 8);
    assert_eq!(report.overall(), OverallStatus::Partial);
}

#[tokio::test]
async fn test_spawned_loop_picks_up_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gnb.log");
    let store = AggregationStore::default();
    let handle = poller(&path, &store, &[]).spawn();

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(store.snapshot().status, GnbStatus::SourceNotFound);

    append_lines(&path, &[ue_line(1), ue_line(2)]);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(store.snapshot().connection_count, 2);
    assert!(handle.is_running());

    handle.shutdown().await;
    assert!(!store.is_monitoring());
}

/// Provider whose sampling always panics
#[derive(Debug)]
struct PanickingHealth;

#[async_trait]
impl ServiceHealthProvider for PanickingHealth {
    fn services(&self) -> &[CoreService] {
        &[]
    }

    async fn probe(&self, _service: &CoreService) -> ProbeOutcome {
        ProbeOutcome::Active
    }

    async fn sample(&self) -> CoreStatusReport {
        panic!("systemd bus went away")
    }
}

#[tokio::test]
async fn test_loop_survives_panicking_health_provider() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gnb.log");
    append_lines(&path, &[CELL_LINE]);
    let store = AggregationStore::default();
    let handle = Poller::new(
        LogTailer::new(&path, TailLines::default()),
        store.clone(),
        Arc::new(PanickingHealth),
        Duration::from_millis(10),
    )
    .spawn();

    tokio::time::sleep(Duration::from_millis(50)).await;
    append_lines(&path, &[ue_line(1)]);
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(store.snapshot().connection_count, 1);
    assert_eq!(store.snapshot().status, GnbStatus::Running);
    assert!(store.chart_series().is_empty());
    assert!(handle.is_running());
    assert!(store.is_monitoring());

    handle.shutdown().await;
    assert!(!store.is_monitoring());
}
