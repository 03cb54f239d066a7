//! Health probe results and the aggregated core status report

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

use crate::types::ServiceName;

/// Raw result of probing one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The service manager reported the unit active
    Active,
    /// The service manager answered with another state (`inactive`, `failed`, ...)
    Inactive(String),
    /// No answer within the probe timeout
    Timeout,
    /// The probe itself could not run
    Failed(String),
}

impl ProbeOutcome {
    /// Map onto the three-valued status the dashboard shows
    #[must_use]
    pub const fn status(&self) -> ServiceStatus {
        match self {
            Self::Active => ServiceStatus::Running,
            Self::Inactive(_) => ServiceStatus::Stopped,
            Self::Timeout | Self::Failed(_) => ServiceStatus::Unknown,
        }
    }
}

/// Displayed state of one core network function
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Running,
    Stopped,
    Unknown,
}

/// Roll-up over every probed service
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    /// Every service is running
    Running,
    /// Some but not all services are running
    Partial,
    /// No service is running
    Stopped,
}

impl OverallStatus {
    #[must_use]
    pub const fn from_counts(running: usize, total: usize) -> Self {
        if total > 0 && running == total {
            Self::Running
        } else if running > 0 {
            Self::Partial
        } else {
            Self::Stopped
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Running => "running",
            Self::Partial => "partial",
            Self::Stopped => "stopped",
        })
    }
}

/// Status of every configured core service at one point in time
///
/// Serializes flat, one key per service followed by `overall`,
/// `running_count` and `total_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreStatusReport {
    services: Vec<(ServiceName, ServiceStatus)>,
}

impl CoreStatusReport {
    #[must_use]
    pub fn new(services: Vec<(ServiceName, ServiceStatus)>) -> Self {
        Self { services }
    }

    /// Report with every service `unknown`, used before the first sample
    #[must_use]
    pub fn unknown<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a ServiceName>,
    {
        Self::new(
            names
                .into_iter()
                .map(|name| (name.clone(), ServiceStatus::Unknown))
                .collect(),
        )
    }

    #[must_use]
    pub fn services(&self) -> &[(ServiceName, ServiceStatus)] {
        &self.services
    }

    #[must_use]
    pub fn status_of(&self, name: &str) -> Option<ServiceStatus> {
        self.services
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, status)| *status)
    }

    #[must_use]
    pub fn running_count(&self) -> usize {
        self.services
            .iter()
            .filter(|(_, status)| *status == ServiceStatus::Running)
            .count()
    }

    #[must_use]
    #[inline]
    pub fn total_count(&self) -> usize {
        self.services.len()
    }

    #[must_use]
    pub fn overall(&self) -> OverallStatus {
        OverallStatus::from_counts(self.running_count(), self.total_count())
    }
}

impl Serialize for CoreStatusReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.services.len() + 3))?;
        for (name, status) in &self.services {
            map.serialize_entry(name.as_str(), status)?;
        }
        map.serialize_entry("overall", &self.overall())?;
        map.serialize_entry("running_count", &self.running_count())?;
        map.serialize_entry("total_count", &self.total_count())?;
        map.end()
    }
}
