//! Core value types shared across the monitor
//!
//! Non-zero limits, validated names and duration serde helpers used by the
//! configuration layer.

pub mod config;
pub mod validated;

pub use config::{Port, RingCapacity, TailLines, ThreadCount, duration_serde};
pub use validated::{HostName, ServiceName, UnitName, ValidationError};
