//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use gnb_monitor::config::{CoreService, defaults};
use gnb_monitor::{ProbeOutcome, ServiceHealthProvider};
use std::io::Write;
use std::path::Path;

pub const CELL_LINE: &str = "2025-12-26T15:32:21.460668 [GNB] Cell pci=1, bw=10 MHz, 1T1R, \
                             dl_arfcn=368500 (n3), dl_freq=1842.5 MHz";
pub const N2_LINE: &str =
    "2025-12-26T15:32:22.000001 [CU-CP] N2: Connection to AMF on 127.0.0.5:38412 completed";
pub const N2_FAILED_LINE: &str =
    "2025-12-26T15:32:22.500000 [CU-CP] CU-CP failed to connect to AMF";
pub const ACCEPTED_LINE: &str = "2025-12-26T15:32:23.000000 [AMF] gNB-N2 accepted";
pub const ZMQ_LINE: &str = "2025-12-26T15:32:24.000000 [zmq:rx:0:0] [I] Waiting for data.";

pub fn ue_line(n: u32) -> String {
    format!("2025-12-26T15:33:{:02}.000000 [RRC] UE {} attached", n % 60, n)
}

pub fn error_line(n: u32) -> String {
    format!("[PHY] error number {n}")
}

/// Append `lines` to the file at `path`, creating it if needed
pub fn append_lines<S: AsRef<str>>(path: &Path, lines: &[S]) {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .unwrap();
    for line in lines {
        writeln!(file, "{}", line.as_ref()).unwrap();
    }
    file.flush().unwrap();
}

/// Health provider answering from a fixed table
#[derive(Debug)]
pub struct StaticHealth {
    services: Vec<CoreService>,
    running: Vec<&'static str>,
}

impl StaticHealth {
    /// Default core services, with `running` reported active
    pub fn new(running: &[&'static str]) -> Self {
        Self {
            services: defaults::core_services(),
            running: running.to_vec(),
        }
    }
}

#[async_trait]
impl ServiceHealthProvider for StaticHealth {
    fn services(&self) -> &[CoreService] {
        &self.services
    }

    async fn probe(&self, service: &CoreService) -> ProbeOutcome {
        if self.running.contains(&service.name.as_str()) {
            ProbeOutcome::Active
        } else {
            ProbeOutcome::Inactive("inactive".to_string())
        }
    }
}
