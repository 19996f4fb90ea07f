//! `df` filesystem usage in 1K blocks.

use serde::{Deserialize, Serialize};
use term_json_core::{
    Result, ensure_input, join_from, parse_int, parse_percent, split_fields, split_lines,
};
use tracing::trace;

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

const BLOCK_SIZE: i64 = 1024;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DfEntry {
    pub filesystem: String,
    pub size: i64,
    pub used: i64,
    pub available: i64,
    pub use_percent: i64,
    pub mount_point: String,
    pub used_bytes: i64,
    pub avail_bytes: i64,
    pub size_bytes: i64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DfParser;

impl DfParser {
    pub fn parse_entries(&self, input: &str) -> Result<Vec<DfEntry>> {
        let input = ensure_input(input)?;
        let mut entries = Vec::new();

        for line in split_lines(input).into_iter().skip(1) {
            let fields = split_fields(line);
            if fields.len() < 6 {
                trace!(line, "Skipping short df line");
                continue;
            }

            let size = parse_int::<i64>(fields[1]).unwrap_or_default();
            let used = parse_int::<i64>(fields[2]).unwrap_or_default();
            let available = parse_int::<i64>(fields[3]).unwrap_or_default();

            entries.push(DfEntry {
                filesystem: fields[0].to_string(),
                size,
                used,
                available,
                use_percent: parse_percent(fields[4]).unwrap_or_default(),
                // Mount points may contain spaces.
                mount_point: join_from(&fields, 5),
                used_bytes: used.saturating_mul(BLOCK_SIZE),
                avail_bytes: available.saturating_mul(BLOCK_SIZE),
                size_bytes: size.saturating_mul(BLOCK_SIZE),
            });
        }

        Ok(entries)
    }
}

impl CommandParser for DfParser {
    fn name(&self) -> &'static str {
        "df"
    }

    fn category(&self) -> Category {
        Category::Files
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        self.parse_entries(input).map(ParseOutput::many)
    }
}
