//! GNU `stat` output, one block per file.

use serde::{Deserialize, Serialize};
use term_json_core::{
    Result, STAT_LAYOUTS, Timestamp, ensure_input, parse_first, parse_int, split_fields,
    split_lines,
};
use tracing::trace;

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatEntry {
    pub file: String,
    pub size: i64,
    pub blocks: i64,
    pub io_block: i64,
    pub device: String,
    pub inode: u64,
    pub links: u32,
    pub permissions: String,
    pub uid: u32,
    pub gid: u32,
    pub access_time: Timestamp,
    pub modify_time: Timestamp,
    pub change_time: Timestamp,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StatParser;

impl StatParser {
    /// Each `File:` line opens a new record; lines before the first one are
    /// ignored.
    pub fn parse_entries(&self, input: &str) -> Result<Vec<StatEntry>> {
        let input = ensure_input(input)?;
        let mut entries: Vec<StatEntry> = Vec::new();

        for line in split_lines(input) {
            if let Some(name) = line.strip_prefix("File:") {
                entries.push(StatEntry {
                    file: name.trim().trim_matches(|c| c == '\'' || c == '"').to_string(),
                    ..StatEntry::default()
                });
                continue;
            }
            match entries.last_mut() {
                Some(entry) => apply_line(line, entry),
                None => trace!(line, "Ignoring stat line before first File:"),
            }
        }

        Ok(entries)
    }
}

fn apply_line(line: &str, entry: &mut StatEntry) {
    if line.contains("Size:") {
        let fields = split_fields(line);
        entry.size = int_after(&fields, "Size:");
        entry.blocks = int_after(&fields, "Blocks:");
        entry.io_block = int_after(&fields, "Block:");
    } else if line.contains("Device:") {
        let fields = split_fields(line);
        entry.device = fields
            .iter()
            .position(|f| *f == "Device:")
            .and_then(|i| fields.get(i + 1))
            .map(|f| (*f).to_string())
            .unwrap_or_default();
        entry.inode = int_after(&fields, "Inode:");
        entry.links = int_after(&fields, "Links:");
    } else if line.contains("Access: (") {
        // Access: (0644/-rw-r--r--)  Uid: (1000/   user)   Gid: (1000/  group)
        if let Some((_, symbolic)) = parenthesized(line, "Access:").and_then(|p| p.split_once('/'))
        {
            entry.permissions = symbolic.trim().to_string();
        }
        entry.uid = id_in_parens(line, "Uid:");
        entry.gid = id_in_parens(line, "Gid:");
    } else if let Some(rest) = line.strip_prefix("Access:") {
        entry.access_time = parse_time(rest);
    } else if let Some(rest) = line.strip_prefix("Modify:") {
        entry.modify_time = parse_time(rest);
    } else if let Some(rest) = line.strip_prefix("Change:") {
        entry.change_time = parse_time(rest);
    }
}

fn int_after<T: std::str::FromStr + Default>(fields: &[&str], key: &str) -> T {
    fields
        .iter()
        .position(|f| *f == key)
        .and_then(|i| fields.get(i + 1))
        .and_then(|value| parse_int(value))
        .unwrap_or_default()
}

/// Contents of the parentheses following `key`, e.g. `1000/   user` for
/// `Uid: (1000/   user)`.
fn parenthesized<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let after_key = &line[line.find(key)? + key.len()..];
    let open = after_key.find('(')?;
    let inner = &after_key[open + 1..];
    let close = inner.find(')')?;
    Some(&inner[..close])
}

fn id_in_parens(line: &str, key: &str) -> u32 {
    parenthesized(line, key)
        .and_then(|inner| inner.split_once('/'))
        .and_then(|(id, _)| parse_int(id))
        .unwrap_or_default()
}

fn parse_time(raw: &str) -> Timestamp {
    parse_first(raw, STAT_LAYOUTS).unwrap_or_default()
}

impl CommandParser for StatParser {
    fn name(&self) -> &'static str {
        "stat"
    }

    fn category(&self) -> Category {
        Category::Files
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        self.parse_entries(input).map(ParseOutput::many)
    }
}
