//! Compiled log line patterns
//!
//! The literals are fixed, so compilation can only fail on a typo, which the
//! tests below catch.

use regex::Regex;
use std::sync::LazyLock;

/// `Cell pci=1, bw=10 MHz, 1T1R, dl_arfcn=368500 (n3), dl_freq=1842.5 MHz`
pub static CELL_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"Cell pci=(\d+), bw=(\d+) MHz, (\d+)T(\d+)R, dl_arfcn=(\d+) \(n(\d+)\), dl_freq=([\d.]+) MHz",
    )
    .expect("cell start pattern")
});

/// `N2: Connection to AMF on 127.0.0.5:38412 completed`
pub static CORE_LINK_CONNECTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"N2: Connection to AMF on ([\d.]+):(\d+) completed")
        .expect("core link connected pattern")
});

pub static CORE_LINK_FAILED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"CU-CP failed to connect to AMF").expect("core link failed pattern")
});

/// `[zmq:rx:0:0] [I] Waiting for data.`
pub static RADIO_ACTIVITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[zmq:(rx|tx):\d+:\d+\].*Waiting for (data|reading samples)")
        .expect("radio activity pattern")
});

pub static UE_ATTACHED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"UE.*attached").expect("ue attached pattern"));

pub static ERROR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)error").expect("error pattern"));

pub static WARNING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)warn").expect("warning pattern"));

/// `2025-12-26T15:32:21.460668`, found anywhere in the line
pub static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d+)").expect("timestamp pattern")
});

/// Extract the first ISO-8601-like timestamp in `line`
#[must_use]
pub fn find_timestamp(line: &str) -> Option<&str> {
    TIMESTAMP.find(line).map(|m| m.as_str())
}
