//! Validated string types and the error shared by every checked value

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Validation errors for string types
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("hostname cannot be empty or whitespace")]
    EmptyHostName,

    #[error("service name cannot be empty or whitespace")]
    EmptyServiceName,

    #[error("invalid systemd unit name: {0}")]
    InvalidUnitName(String),

    #[error("invalid port number: {0}")]
    InvalidPortNumber(String),

    #[error("{0} cannot be 0")]
    Zero(&'static str),
}

/// Declares a `String` newtype checked by `$check` on every construction path
///
/// Serde goes through `TryFrom<String>`, so a config file cannot smuggle in a
/// value `new()` would refuse.
macro_rules! validated_string {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident(String) checked by $check:path;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        $vis struct $name(String);

        impl $name {
            pub fn new(value: String) -> Result<Self, ValidationError> {
                $check(&value)?;
                Ok(Self(value))
            }

            #[must_use]
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            #[inline]
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

fn check_host(s: &str) -> Result<(), ValidationError> {
    if s.trim().is_empty() {
        return Err(ValidationError::EmptyHostName);
    }
    Ok(())
}

fn check_service(s: &str) -> Result<(), ValidationError> {
    if s.trim().is_empty() {
        return Err(ValidationError::EmptyServiceName);
    }
    Ok(())
}

/// Characters systemd accepts in a unit name; a leading `-` would read as a flag
fn check_unit(s: &str) -> Result<(), ValidationError> {
    let allowed =
        |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@' | ':' | '\\');
    if s.is_empty() || s.starts_with('-') || !s.chars().all(allowed) {
        return Err(ValidationError::InvalidUnitName(s.to_string()));
    }
    Ok(())
}

validated_string! {
    /// Listen host for the HTTP API, never empty or whitespace-only
    ///
    /// # Examples
    /// ```
    /// use gnb_monitor::types::HostName;
    ///
    /// let host = HostName::new("0.0.0.0".to_string()).unwrap();
    /// assert_eq!(host.as_str(), "0.0.0.0");
    ///
    /// assert!(HostName::new("   ".to_string()).is_err());
    /// ```
    pub struct HostName(String) checked by check_host;
}

validated_string! {
    /// Display name of a core network function (e.g. `amf`)
    pub struct ServiceName(String) checked by check_service;
}

validated_string! {
    /// A systemd unit name passed to the service manager (e.g. `open5gs-amfd`)
    pub struct UnitName(String) checked by check_unit;
}
