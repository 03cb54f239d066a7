//! Poll loop
//!
//! The only writer to the [`AggregationStore`]. Every interval it checks the
//! log file, runs a tail pass when the file changed, then samples the core
//! services and records one chart point. Shutdown is cooperative: a cycle
//! already in flight completes before the task exits.

use chrono::Local;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::health::ServiceHealthProvider;
use crate::state::ExtractionState;
use crate::store::AggregationStore;
use crate::tailer::{LogTailer, TailCursor};

/// Periodic driver owning the tail cursor
#[derive(Debug)]
pub struct Poller {
    tailer: LogTailer,
    store: AggregationStore,
    health: Arc<dyn ServiceHealthProvider>,
    interval: Duration,
    cursor: TailCursor,
}

impl Poller {
    #[must_use]
    pub fn new(
        tailer: LogTailer,
        store: AggregationStore,
        health: Arc<dyn ServiceHealthProvider>,
        interval: Duration,
    ) -> Self {
        Self {
            tailer,
            store,
            health,
            interval,
            cursor: TailCursor::new(),
        }
    }

    #[must_use]
    pub fn cursor(&self) -> TailCursor {
        self.cursor
    }

    /// Run one cycle
    ///
    /// Faults are logged and absorbed into the store; nothing here fails.
    pub async fn poll_once(&mut self) {
        let due = match self.tailer.stat() {
            Ok(stamp) => self.cursor.needs_pass(stamp),
            Err(err) => {
                debug!(error = %err, "Could not stat log file");
                true
            }
        };

        if due {
            self.run_tail_pass().await;
        } else {
            debug!(path = %self.tailer.path().display(), "Log file unchanged");
        }

        self.sample_core().await;
    }

    async fn sample_core(&self) {
        let health = Arc::clone(&self.health);
        match tokio::spawn(async move { health.sample().await }).await {
            Ok(core) => self.store.record_sample(core, Local::now()),
            Err(e) => warn!(error = %e, "Core health sample failed, skipping chart point"),
        }
    }

    async fn run_tail_pass(&mut self) {
        let previous = self.store.snapshot();
        let tailer = self.tailer.clone();
        let cursor = self.cursor;
        let mut state = previous.clone();

        let joined = tokio::task::spawn_blocking(move || {
            let outcome = tailer.tail(cursor, &mut state);
            (state, outcome)
        })
        .await;

        match joined {
            Ok((state, outcome)) => {
                log_transitions(&previous, &state);
                self.cursor = outcome.cursor;
                self.store
                    .append_poll_result(state, outcome.events, &outcome.lines);
            }
            Err(e) => warn!(error = %e, "Tail task failed, keeping previous state"),
        }
    }

    /// Start the loop on the current runtime
    ///
    /// The first cycle runs immediately.
    pub fn spawn(mut self) -> PollerHandle {
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);
        let store = self.store.clone();
        let guard = MonitoringGuard::engage(store.clone());

        let task = tokio::spawn(async move {
            let _guard = guard;
            info!(
                path = %self.tailer.path().display(),
                interval_secs = self.interval.as_secs_f64(),
                "Starting log monitor"
            );

            loop {
                self.poll_once().await;

                tokio::select! {
                    _ = sleep(self.interval) => {}
                    _ = shutdown_rx.recv() => {
                        info!("Shutting down log monitor");
                        break;
                    }
                }
            }
        });

        PollerHandle {
            shutdown_tx,
            task,
            store,
        }
    }
}

fn log_transitions(previous: &ExtractionState, current: &ExtractionState) {
    if previous.status != current.status {
        info!(from = %previous.status, to = %current.status, "gNB status changed");
    }
    if previous.cell_info != current.cell_info
        && let Some(cell) = &current.cell_info
    {
        info!(cell = %cell, "Cell started");
    }
    if previous.core_link_status != current.core_link_status {
        info!(
            from = %previous.core_link_status,
            to = %current.core_link_status,
            "NGAP link changed"
        );
    }
}

/// Holds the store's monitoring flag up for the lifetime of the loop task
///
/// Dropped when the task ends, however it ends.
#[derive(Debug)]
struct MonitoringGuard(AggregationStore);

impl MonitoringGuard {
    fn engage(store: AggregationStore) -> Self {
        store.set_monitoring(true);
        Self(store)
    }
}

impl Drop for MonitoringGuard {
    fn drop(&mut self) {
        self.0.set_monitoring(false);
    }
}

/// Handle to a running [`Poller`]
#[derive(Debug)]
pub struct PollerHandle {
    shutdown_tx: broadcast::Sender<()>,
    task: JoinHandle<()>,
    store: AggregationStore,
}

impl PollerHandle {
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.task.is_finished() && self.store.is_monitoring()
    }

    /// Ask the loop to stop after its current cycle
    pub fn signal_shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Stop the loop and wait for it to exit
    pub async fn shutdown(self) {
        self.signal_shutdown();
        if let Err(e) = self.task.await {
            warn!(error = %e, "Log monitor task ended abnormally");
        }
    }
}
