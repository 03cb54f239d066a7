//! Core network service health
//!
//! A [`ServiceHealthProvider`] reports whether each configured 5G core
//! function is up. The production provider asks systemd via
//! `systemctl is-active <unit>`, one child process per unit, each bounded by
//! a timeout.

mod types;

pub use types::{CoreStatusReport, OverallStatus, ProbeOutcome, ServiceStatus};

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::task::JoinSet;
use tokio::time;
use tracing::{debug, warn};

use crate::config::CoreService;
use crate::constants::probe::{ACTIVE, DEFAULT_TIMEOUT, SYSTEMCTL};
use crate::error::MonitorError;
use crate::types::UnitName;

/// Source of core service status
#[async_trait]
pub trait ServiceHealthProvider: Send + Sync + std::fmt::Debug {
    /// Services this provider reports on, in display order
    fn services(&self) -> &[CoreService];

    /// Probe a single service
    async fn probe(&self, service: &CoreService) -> ProbeOutcome;

    /// Probe every service and roll the results up
    async fn sample(&self) -> CoreStatusReport {
        let mut statuses = Vec::with_capacity(self.services().len());
        for service in self.services() {
            let outcome = self.probe(service).await;
            statuses.push((service.name.clone(), outcome.status()));
        }
        CoreStatusReport::new(statuses)
    }
}

/// Probes units through `systemctl is-active`
#[derive(Debug, Clone)]
pub struct SystemctlProbe {
    services: Vec<CoreService>,
    timeout: Duration,
    program: String,
    leading_args: Vec<String>,
}

impl SystemctlProbe {
    #[must_use]
    pub fn new(services: Vec<CoreService>, timeout: Duration) -> Self {
        Self {
            services,
            timeout,
            program: SYSTEMCTL.to_string(),
            leading_args: Vec::new(),
        }
    }

    /// Use a different service manager with a `systemctl`-compatible CLI
    ///
    /// `leading_args` go before `is-active <unit>`, e.g. `--user`.
    #[must_use]
    pub fn with_program<I, S>(mut self, program: impl Into<String>, leading_args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.program = program.into();
        self.leading_args = leading_args.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for SystemctlProbe {
    fn default() -> Self {
        Self::new(crate::config::defaults::core_services(), DEFAULT_TIMEOUT)
    }
}

async fn probe_unit(
    program: &str,
    leading_args: &[String],
    unit: &UnitName,
    timeout: Duration,
) -> ProbeOutcome {
    let mut command = Command::new(program);
    command
        .args(leading_args)
        .arg("is-active")
        .arg(unit.as_str())
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    match time::timeout(timeout, command.output()).await {
        Ok(Ok(output)) => {
            let state = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if state == ACTIVE {
                ProbeOutcome::Active
            } else {
                ProbeOutcome::Inactive(state)
            }
        }
        Ok(Err(e)) => {
            debug!(unit = %unit, error = %e, "Service probe could not run");
            ProbeOutcome::Failed(e.to_string())
        }
        Err(_) => {
            let err = MonitorError::DependencyProbeTimeout {
                unit: unit.to_string(),
                timeout,
            };
            warn!(error = %err, "Service probe timed out");
            ProbeOutcome::Timeout
        }
    }
}

#[async_trait]
impl ServiceHealthProvider for SystemctlProbe {
    fn services(&self) -> &[CoreService] {
        &self.services
    }

    async fn probe(&self, service: &CoreService) -> ProbeOutcome {
        probe_unit(&self.program, &self.leading_args, &service.unit, self.timeout).await
    }

    /// Probes run concurrently, so one hung unit costs at most one timeout
    async fn sample(&self) -> CoreStatusReport {
        let mut probes = JoinSet::new();
        for (index, service) in self.services.iter().enumerate() {
            let program = self.program.clone();
            let leading_args = self.leading_args.clone();
            let unit = service.unit.clone();
            let timeout = self.timeout;
            probes.spawn(async move {
                let outcome = probe_unit(&program, &leading_args, &unit, timeout).await;
                (index, outcome)
            });
        }

        let mut statuses = vec![ServiceStatus::Unknown; self.services.len()];
        while let Some(joined) = probes.join_next().await {
            match joined {
                Ok((index, outcome)) => statuses[index] = outcome.status(),
                Err(e) => warn!(error = %e, "Service probe task failed"),
            }
        }

        CoreStatusReport::new(
            self.services
                .iter()
                .map(|service| service.name.clone())
                .zip(statuses)
                .collect(),
        )
    }
}
