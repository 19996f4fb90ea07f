//! `wc` counts.

use serde::{Deserialize, Serialize};
use term_json_core::{Result, ensure_input, join_from, parse_int, split_fields, split_lines};

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WcEntry {
    pub lines: u64,
    pub words: u64,
    pub characters: u64,
    pub bytes: u64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub filename: String,
    pub original: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WcParser;

impl WcParser {
    /// A lone count (`wc -l`, `wc -w`, ...) can't say what it counted, so it
    /// fills every counter. With three counts the third is both characters
    /// and bytes.
    pub fn parse_entries(&self, input: &str) -> Result<Vec<WcEntry>> {
        let input = ensure_input(input)?;
        Ok(split_lines(input).into_iter().map(parse_line).collect())
    }
}

fn parse_line(line: &str) -> WcEntry {
    let fields = split_fields(line);
    let count = |index: usize| -> u64 {
        fields
            .get(index)
            .and_then(|f| parse_int(f))
            .unwrap_or_default()
    };

    let mut entry = WcEntry {
        original: line.to_string(),
        ..WcEntry::default()
    };
    match fields.len() {
        1 | 2 => {
            let value = count(0);
            entry.lines = value;
            entry.words = value;
            entry.characters = value;
            entry.bytes = value;
            entry.filename = join_from(&fields, 1);
        }
        _ => {
            entry.lines = count(0);
            entry.words = count(1);
            entry.characters = count(2);
            entry.bytes = entry.characters;
            entry.filename = join_from(&fields, 3);
        }
    }
    entry
}

impl CommandParser for WcParser {
    fn name(&self) -> &'static str {
        "wc"
    }

    fn category(&self) -> Category {
        Category::Utilities
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        let mut entries = self.parse_entries(input)?;
        if entries.len() == 1 {
            if let Some(entry) = entries.pop() {
                return Ok(ParseOutput::single(entry));
            }
        }
        Ok(ParseOutput::many(entries))
    }
}
