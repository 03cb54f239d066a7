//! Signalling call-flow tracker
//!
//! A coarse second extractor over the same tailed lines, producing the
//! message sequence the dashboard draws between gNB, AMF and UPF.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::parser::find_timestamp;
use crate::ring::RingBuffer;
use crate::types::RingCapacity;

/// Network element taking part in a call flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Endpoint {
    #[serde(rename = "gNB")]
    Gnb,
    #[serde(rename = "AMF")]
    Amf,
    #[serde(rename = "UPF")]
    Upf,
}

/// One arrow in the call-flow diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallFlowMessage {
    /// `HH:MM:SS`
    pub time: String,
    pub from: Endpoint,
    pub to: Endpoint,
    pub message: &'static str,
}

fn match_line(line: &str) -> Option<(Endpoint, Endpoint, &'static str)> {
    if line.contains("NGAP") || line.contains("N2:") {
        if line.contains("Setup") || line.contains("completed") {
            return Some((Endpoint::Gnb, Endpoint::Amf, "NGAP Setup Request"));
        }
        return None;
    }
    if line.contains("gNB-N2 accepted") {
        return Some((Endpoint::Amf, Endpoint::Gnb, "NGAP Setup Response"));
    }
    if line.contains("GTP") || line.contains("N3") {
        return Some((Endpoint::Gnb, Endpoint::Upf, "GTP-U Tunnel Setup"));
    }
    None
}

/// Time-of-day label for a line: its own timestamp when present, else `now`
fn time_label(line: &str, now: &DateTime<Local>) -> String {
    find_timestamp(line)
        .and_then(|ts| ts.get(11..19))
        .map_or_else(|| now.format("%H:%M:%S").to_string(), str::to_string)
}

/// Bounded history of recognised signalling messages
#[derive(Debug, Clone)]
pub struct CallFlowTracker {
    messages: RingBuffer<CallFlowMessage>,
}

impl CallFlowTracker {
    #[must_use]
    pub fn new(capacity: RingCapacity) -> Self {
        Self {
            messages: RingBuffer::new(capacity),
        }
    }

    /// Record the message `line` represents, if any
    pub fn observe(&mut self, line: &str, now: &DateTime<Local>) -> bool {
        let Some((from, to, message)) = match_line(line) else {
            return false;
        };
        self.messages.push(CallFlowMessage {
            time: time_label(line, now),
            from,
            to,
            message,
        });
        true
    }

    pub fn observe_lines<'a, I>(&mut self, lines: I, now: &DateTime<Local>)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for line in lines {
            self.observe(line, now);
        }
    }

    /// Messages oldest first
    #[must_use]
    pub fn messages(&self) -> Vec<CallFlowMessage> {
        self.messages.to_vec()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tracker(capacity: usize) -> CallFlowTracker {
        CallFlowTracker::new(RingCapacity::new(capacity).unwrap())
    }

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 12, 26, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_setup_request() {
        let mut t = tracker(20);
        assert!(t.observe(
            "2025-12-26T15:32:21.460680 N2: Connection to AMF on 127.0.0.5:38412 completed",
            &noon()
        ));
        let msgs = t.messages();
        assert_eq!(msgs[0].time, "15:32:21");
        assert_eq!(msgs[0].from, Endpoint::Gnb);
        assert_eq!(msgs[0].to, Endpoint::Amf);
        assert_eq!(msgs[0].message, "NGAP Setup Request");
    }

    #[test]
    fn test_ngap_without_setup_is_ignored() {
        let mut t = tracker(20);
        assert!(!t.observe("[NGAP] PDU received", &noon()));
        assert!(!t.observe("[NGAP] GTP tunnel", &noon()));
        assert!(t.is_empty());
    }

    #[test]
    fn test_setup_response_and_tunnel() {
        let mut t = tracker(20);
        t.observe("gNB-N2 accepted by AMF", &noon());
        t.observe("[GTPU] tunnel created", &noon());
        let msgs = t.messages();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].message, "NGAP Setup Response");
        assert_eq!(msgs[0].from, Endpoint::Amf);
        assert_eq!(msgs[0].time, "12:00:00");
        assert_eq!(msgs[1].message, "GTP-U Tunnel Setup");
        assert_eq!(msgs[1].to, Endpoint::Upf);
    }

    #[test]
    fn test_bounded() {
        let mut t = tracker(20);
        let lines: Vec<String> = (0..30).map(|i| format!("N3 packet {i}")).collect();
        t.observe_lines(lines.iter().map(String::as_str), &noon());
        assert_eq!(t.len(), 20);
    }

    #[test]
    fn test_serialized_endpoint_names() {
        let mut t = tracker(2);
        t.observe("gNB-N2 accepted", &noon());
        let value = serde_json::to_value(t.messages()).unwrap();
        assert_eq!(value[0]["from"], "AMF");
        assert_eq!(value[0]["to"], "gNB");
    }
}
