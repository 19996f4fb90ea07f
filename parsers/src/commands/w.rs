//! `w`: the uptime summary plus one row per logged-in session.

use serde::{Deserialize, Serialize};
use term_json_core::{ParseError, Result, ensure_input, join_from, split_fields, split_lines};
use tracing::{debug, trace};

use super::uptime::parse_summary;
use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WOutput {
    pub header: WHeader,
    pub users: Vec<WEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WHeader {
    pub current_time: String,
    pub uptime: String,
    pub users: u32,
    pub load_avg_1: f64,
    pub load_avg_5: f64,
    pub load_avg_15: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WEntry {
    pub user: String,
    pub tty: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub from: String,
    pub login: String,
    pub idle: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub jcpu: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pcpu: String,
    pub what: String,
}

/// Positions of the optional columns, taken from the `USER TTY ...` line.
#[derive(Debug, Clone, Copy)]
struct Columns {
    has_from: bool,
    has_jcpu: bool,
    has_pcpu: bool,
}

impl Columns {
    fn from_header(header: &str) -> Self {
        let names = split_fields(header);
        Self {
            has_from: names.contains(&"FROM"),
            has_jcpu: names.contains(&"JCPU"),
            has_pcpu: names.contains(&"PCPU"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WParser;

impl WParser {
    pub fn parse_entry(&self, input: &str) -> Result<WOutput> {
        let input = ensure_input(input)?;
        let lines = split_lines(input);
        if lines.len() < 2 {
            return Err(ParseError::InsufficientData {
                command: "w",
                expected: 2,
                actual: lines.len(),
            });
        }

        let summary = parse_summary(lines[0]);
        let columns = Columns::from_header(lines[1]);
        debug!(?columns, "Read w column header");

        let users = lines[2..]
            .iter()
            .filter_map(|line| parse_session(line, columns))
            .collect();

        Ok(WOutput {
            header: WHeader {
                current_time: summary.current_time,
                uptime: summary.uptime,
                users: summary.users,
                load_avg_1: summary.load[0],
                load_avg_5: summary.load[1],
                load_avg_15: summary.load[2],
            },
            users,
        })
    }
}

fn parse_session(line: &str, columns: Columns) -> Option<WEntry> {
    let fields = split_fields(line);
    if fields.len() < 4 {
        trace!(line, "Skipping short w line");
        return None;
    }

    let mut next = 2;
    let mut take = |present: bool| -> String {
        if !present {
            return String::new();
        }
        let value = fields.get(next).map(|f| (*f).to_string()).unwrap_or_default();
        next += 1;
        value
    };

    let from = take(columns.has_from);
    let login = take(true);
    let idle = take(true);
    let jcpu = take(columns.has_jcpu);
    let pcpu = take(columns.has_pcpu);

    Some(WEntry {
        user: fields[0].to_string(),
        tty: fields[1].to_string(),
        from,
        login,
        idle,
        jcpu,
        pcpu,
        what: join_from(&fields, next),
    })
}

impl CommandParser for WParser {
    fn name(&self) -> &'static str {
        "w"
    }

    fn category(&self) -> Category {
        Category::System
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        self.parse_entry(input).map(ParseOutput::single)
    }
}
