//! `ping` replies and summary statistics.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use term_json_core::{
    Result, ensure_input, is_false, is_zero, parse_float, parse_int, split_lines,
};
use tracing::trace;

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"PING ([^\s]+) \(([^)]+)\)").expect("static regex must compile")
});
static REPLY_BYTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) bytes from").expect("static regex must compile"));
static REPLY_HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"from ([^\s]+) \(([^)]+)\)").expect("static regex must compile")
});
static ICMP_SEQ: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"icmp_seq=(\d+)").expect("static regex must compile"));
static TTL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ttl=(\d+)").expect("static regex must compile"));
static TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"time=([0-9.]+)").expect("static regex must compile"));
// Linux prints `N received`, BSD `N packets received`; `+N duplicates` and
// the total time are optional.
static SUMMARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\d+) packets transmitted, (\d+) (?:packets )?received,(?: \+\d+ duplicates,)? ([0-9.]+)% packet loss(?:, time (\d+)ms)?",
    )
    .expect("static regex must compile")
});
static RTT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9.]+)/([0-9.]+)/([0-9.]+)/([0-9.]+)").expect("static regex must compile")
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PingEntry {
    /// Always `"ping"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub destination: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub destination_ip: String,
    pub packets: Vec<PingPacket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<PingStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PingPacket {
    pub bytes: u32,
    pub destination: String,
    pub destination_ip: String,
    pub icmp_seq: u32,
    pub ttl: u32,
    pub time_ms: f64,
    #[serde(skip_serializing_if = "is_false")]
    pub duplicate: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PingStats {
    pub packets_transmitted: u32,
    pub packets_received: u32,
    pub packet_loss_percent: f64,
    pub time_ms: u64,
    #[serde(skip_serializing_if = "is_zero")]
    pub rtt_min_ms: f64,
    #[serde(skip_serializing_if = "is_zero")]
    pub rtt_avg_ms: f64,
    #[serde(skip_serializing_if = "is_zero")]
    pub rtt_max_ms: f64,
    #[serde(skip_serializing_if = "is_zero")]
    pub rtt_mdev_ms: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PingParser;

impl PingParser {
    pub fn parse_entry(&self, input: &str) -> Result<PingEntry> {
        let input = ensure_input(input)?;
        let mut entry = PingEntry {
            kind: "ping".to_string(),
            ..PingEntry::default()
        };

        for line in split_lines(input) {
            if line.starts_with("PING ") {
                if let Some(caps) = HEADER.captures(line) {
                    entry.destination = caps[1].to_string();
                    entry.destination_ip = caps[2].to_string();
                }
            } else if line.contains("bytes from") {
                let mut packet = parse_reply(line);
                if packet.destination.is_empty() {
                    packet.destination = entry.destination.clone();
                    packet.destination_ip = entry.destination_ip.clone();
                }
                entry.packets.push(packet);
            } else if line.contains("packets transmitted") {
                entry.statistics = Some(parse_summary(line));
            } else if line.starts_with("rtt") || line.starts_with("round-trip") {
                if let Some(stats) = entry.statistics.as_mut() {
                    parse_rtt(line, stats);
                }
            } else {
                trace!(line, "Ignoring ping line");
            }
        }

        Ok(entry)
    }
}

fn capture<T: std::str::FromStr>(re: &Regex, line: &str) -> Option<T> {
    re.captures(line).and_then(|caps| parse_int(&caps[1]))
}

/// `64 bytes from host (1.2.3.4): icmp_seq=1 ttl=55 time=12.3 ms [(DUP!)]`
fn parse_reply(line: &str) -> PingPacket {
    let mut packet = PingPacket {
        bytes: capture(&REPLY_BYTES, line).unwrap_or_default(),
        icmp_seq: capture(&ICMP_SEQ, line).unwrap_or_default(),
        ttl: capture(&TTL, line).unwrap_or_default(),
        time_ms: TIME
            .captures(line)
            .and_then(|caps| parse_float(&caps[1]))
            .unwrap_or_default(),
        duplicate: line.contains("DUP!"),
        ..PingPacket::default()
    };
    if let Some(caps) = REPLY_HOST.captures(line) {
        packet.destination = caps[1].to_string();
        packet.destination_ip = caps[2].to_string();
    }
    packet
}

fn parse_summary(line: &str) -> PingStats {
    let mut stats = PingStats::default();
    if let Some(caps) = SUMMARY.captures(line) {
        stats.packets_transmitted = parse_int(&caps[1]).unwrap_or_default();
        stats.packets_received = parse_int(&caps[2]).unwrap_or_default();
        stats.packet_loss_percent = parse_float(&caps[3]).unwrap_or_default();
        stats.time_ms = caps
            .get(4)
            .and_then(|m| parse_int(m.as_str()))
            .unwrap_or_default();
    }
    stats
}

fn parse_rtt(line: &str, stats: &mut PingStats) {
    if let Some(caps) = RTT.captures(line) {
        stats.rtt_min_ms = parse_float(&caps[1]).unwrap_or_default();
        stats.rtt_avg_ms = parse_float(&caps[2]).unwrap_or_default();
        stats.rtt_max_ms = parse_float(&caps[3]).unwrap_or_default();
        stats.rtt_mdev_ms = parse_float(&caps[4]).unwrap_or_default();
    }
}

impl CommandParser for PingParser {
    fn name(&self) -> &'static str {
        "ping"
    }

    fn category(&self) -> Category {
        Category::Network
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        self.parse_entry(input).map(ParseOutput::single)
    }
}
