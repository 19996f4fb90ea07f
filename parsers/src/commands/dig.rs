//! `dig` DNS lookup output.
//!
//! Output is split into `;; XXX SECTION:` blocks. A section cursor tracks
//! the current block and resource records are appended to the matching
//! list. Statistics come from the `;;` comment lines around the sections.

use serde::{Deserialize, Serialize};
use term_json_core::{Result, ensure_input, join_from, parse_int, split_fields};
use tracing::{debug, trace};

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigEntry {
    pub query: DigQuery,
    pub answer: Vec<DigRecord>,
    pub authority: Vec<DigRecord>,
    pub additional: Vec<DigRecord>,
    pub stats: DigStats,
    pub original: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigQuery {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub class: String,
}

/// One resource record line: `name ttl class type value...`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigRecord {
    pub name: String,
    pub ttl: u32,
    pub class: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigStats {
    pub query_time_ms: u64,
    pub server: String,
    pub when: String,
    pub message_size: u64,
    pub flags: String,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Question,
    Answer,
    Authority,
    Additional,
    /// Any other `;; ... SECTION:` block, e.g. the OPT pseudosection.
    Other,
}

impl Section {
    fn from_marker(line: &str) -> Option<Self> {
        if !line.starts_with(";;") || !line.ends_with("SECTION:") {
            return None;
        }
        let section = if line.contains("QUESTION") {
            Self::Question
        } else if line.contains("ANSWER") {
            Self::Answer
        } else if line.contains("AUTHORITY") {
            Self::Authority
        } else if line.contains("ADDITIONAL") {
            Self::Additional
        } else {
            Self::Other
        };
        Some(section)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DigParser;

impl DigParser {
    pub fn parse_entry(&self, input: &str) -> Result<DigEntry> {
        let input = ensure_input(input)?;
        let mut entry = DigEntry {
            original: input.to_string(),
            ..DigEntry::default()
        };
        let mut section = Section::Preamble;

        for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(next) = Section::from_marker(line) {
                debug!(?next, "Entering dig section");
                section = next;
                continue;
            }

            if line.starts_with(';') {
                if section == Section::Question && line.contains("IN") {
                    parse_query(line, &mut entry.query);
                } else if line.starts_with(";;") {
                    parse_stat_line(line, &mut entry.stats);
                }
                continue;
            }

            let target = match section {
                Section::Answer => &mut entry.answer,
                Section::Authority => &mut entry.authority,
                Section::Additional => &mut entry.additional,
                _ => {
                    trace!(line, "Ignoring dig line outside a record section");
                    continue;
                }
            };
            match parse_record(line) {
                Some(record) => target.push(record),
                None => trace!(line, "Skipping short dig record"),
            }
        }

        Ok(entry)
    }
}

/// Handles both `;; example.com. IN A` and the `;example.com. IN A` form
/// real `dig` prints.
fn parse_query(line: &str, query: &mut DigQuery) {
    let fields = split_fields(line.trim_start_matches(';'));
    if fields.len() < 3 {
        return;
    }
    query.name = fields[0].trim_end_matches('.').to_string();
    query.class = fields[1].to_string();
    query.record_type = fields[2].to_string();
}

fn parse_record(line: &str) -> Option<DigRecord> {
    let fields = split_fields(line);
    if fields.len() < 5 {
        return None;
    }
    Some(DigRecord {
        name: fields[0].to_string(),
        ttl: parse_int(fields[1]).unwrap_or_default(),
        class: fields[2].to_string(),
        record_type: fields[3].to_string(),
        value: join_from(&fields, 4),
    })
}

fn parse_stat_line(line: &str, stats: &mut DigStats) {
    let parts = split_fields(line);

    if line.starts_with(";; Query time:") {
        stats.query_time_ms = parts.get(3).and_then(|p| parse_int(p)).unwrap_or_default();
    } else if line.starts_with(";; SERVER:") {
        stats.server = parts.get(2).map(|p| (*p).to_string()).unwrap_or_default();
    } else if line.starts_with(";; WHEN:") {
        stats.when = join_from(&parts, 2);
    } else if line.starts_with(";; MSG SIZE") {
        stats.message_size = parts.get(4).and_then(|p| parse_int(p)).unwrap_or_default();
    } else {
        if let Some(status) = value_after(line, "status:", ',') {
            stats.status = status;
        }
        if let Some(flags) = value_after(line, "flags:", ';') {
            stats.flags = flags;
        }
    }
}

/// Text following `key` up to `terminator` (or end of line), trimmed.
fn value_after(line: &str, key: &str, terminator: char) -> Option<String> {
    let start = line.find(key)? + key.len();
    let rest = &line[start..];
    let value = rest.split(terminator).next().unwrap_or(rest);
    Some(value.trim().to_string())
}

impl CommandParser for DigParser {
    fn name(&self) -> &'static str {
        "dig"
    }

    fn category(&self) -> Category {
        Category::Network
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        self.parse_entry(input).map(ParseOutput::single)
    }
}
