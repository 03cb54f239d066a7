//! Tokio runtime configuration and start-up helpers for the monitor binary
//!
//! This module provides:
//! - Testable runtime configuration and builder logic
//! - Config loading with a start-up summary
//! - Shutdown signal handling

use crate::args::CommonArgs;
use crate::config::{Config, ConfigSource};
use crate::types::ThreadCount;
use anyhow::Result;
use tracing::info;

/// Runtime configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    worker_threads: usize,
}

impl RuntimeConfig {
    /// Create runtime config from optional thread count
    ///
    /// If `threads` is None, defaults to 1 thread.
    /// Single-threaded runtime is used if threads == 1.
    #[must_use]
    pub fn from_args(threads: Option<ThreadCount>) -> Self {
        Self {
            worker_threads: threads.unwrap_or_default().get(),
        }
    }

    #[must_use]
    pub const fn worker_threads(&self) -> usize {
        self.worker_threads
    }

    #[must_use]
    pub const fn is_single_threaded(&self) -> bool {
        self.worker_threads == 1
    }

    /// Build the tokio runtime
    ///
    /// # Errors
    /// Returns error if runtime creation fails
    pub fn build_runtime(self) -> Result<tokio::runtime::Runtime> {
        let rt = if self.is_single_threaded() {
            info!("Starting gNB monitor with single-threaded runtime");
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?
        } else {
            info!(
                "Starting gNB monitor with {} worker threads",
                self.worker_threads
            );
            tokio::runtime::Builder::new_multi_thread()
                .worker_threads(self.worker_threads)
                .enable_all()
                .build()?
        };
        Ok(rt)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::from_args(None)
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM on Unix)
///
/// If a handler cannot be installed that branch never fires and the other
/// one still can.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Load configuration, apply CLI overrides and log what will be monitored
///
/// # Errors
/// Returns error if loading fails or the overridden config is invalid
pub fn load_and_log_config(args: &CommonArgs) -> Result<(Config, ConfigSource)> {
    let (mut config, source) = crate::config::load_config_with_fallback(&args.config)?;
    info!("Loaded configuration from {}", source.description());

    args.apply_to(&mut config);
    config.validate()?;
    log_config(&config);

    Ok((config, source))
}

/// Log the effective settings
fn log_config(config: &Config) {
    info!(
        "Monitoring '{}' every {:.1}s",
        config.monitor.log_file.display(),
        config.monitor.poll_interval.as_secs_f64()
    );
    info!("Probing {} core services:", config.core.services.len());
    for service in &config.core.services {
        info!("  - {} ({})", service.name, service.unit);
    }
}
