//! `netstat -tunap` socket table.

use serde::{Deserialize, Serialize};
use term_json_core::{Result, ensure_input, is_zero, parse_int, split_fields, split_lines};
use tracing::{debug, trace};

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

/// TCP states netstat prints in the `State` column.
const TCP_STATES: &[&str] = &[
    "ESTABLISHED",
    "SYN_SENT",
    "SYN_RECV",
    "FIN_WAIT1",
    "FIN_WAIT2",
    "TIME_WAIT",
    "CLOSE",
    "CLOSE_WAIT",
    "LAST_ACK",
    "LISTEN",
    "CLOSING",
    "UNKNOWN",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetstatEntry {
    pub protocol: String,
    pub local_address: String,
    pub foreign_address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub pid: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub program: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub recv_q: u64,
    #[serde(skip_serializing_if = "is_zero")]
    pub send_q: u64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NetstatParser;

impl NetstatParser {
    pub fn parse_entries(&self, input: &str) -> Result<Vec<NetstatEntry>> {
        let input = ensure_input(input)?;
        let mut entries = Vec::new();

        // Set by the `Proto ...` header when present.
        let mut has_queues = None;

        for line in split_lines(input) {
            if line.starts_with("Active UNIX") {
                debug!("Reached UNIX socket section, stopping");
                break;
            }
            if line.starts_with("Proto") || line.contains("Local Address") {
                has_queues = Some(line.contains("Recv-Q"));
                continue;
            }
            if line.starts_with("Active") {
                continue;
            }

            let fields = split_fields(line);
            if fields.len() < 4 {
                trace!(line, "Skipping short netstat line");
                continue;
            }
            let queues = has_queues.unwrap_or_else(|| queue_columns_in_row(&fields));
            entries.push(parse_row(&fields, queues));
        }

        Ok(entries)
    }
}

/// Headerless rows: `proto N N local foreign ...` carries queue columns,
/// `proto local foreign ...` does not.
fn queue_columns_in_row(fields: &[&str]) -> bool {
    fields.len() >= 5
        && parse_int::<u64>(fields[1]).is_some()
        && parse_int::<u64>(fields[2]).is_some()
}

fn parse_row(fields: &[&str], queues: bool) -> NetstatEntry {
    let mut entry = NetstatEntry {
        protocol: fields[0].to_string(),
        ..NetstatEntry::default()
    };

    let mut index = 1;
    if queues {
        entry.recv_q = parse_int(fields[1]).unwrap_or_default();
        entry.send_q = parse_int(fields[2]).unwrap_or_default();
        index = 3;
    }

    entry.local_address = fields.get(index).map(|f| (*f).to_string()).unwrap_or_default();
    entry.foreign_address = fields
        .get(index + 1)
        .map(|f| (*f).to_string())
        .unwrap_or_default();

    if entry.protocol.starts_with("tcp") {
        if let Some(state) = fields.get(index + 2).filter(|s| TCP_STATES.contains(*s)) {
            entry.state = (*state).to_string();
            index += 1;
        }
    }

    if let Some((pid, program)) = fields.get(index + 2).and_then(|f| f.split_once('/')) {
        entry.pid = parse_int(pid).unwrap_or_default();
        entry.program = program.to_string();
    }

    entry
}

impl CommandParser for NetstatParser {
    fn name(&self) -> &'static str {
        "netstat"
    }

    fn category(&self) -> Category {
        Category::Network
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        self.parse_entries(input).map(ParseOutput::many)
    }
}
