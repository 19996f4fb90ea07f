//! `lsblk` block device tree.

use serde::{Deserialize, Serialize};
use term_json_core::{Result, ensure_input, field_or_empty, split_fields, split_lines};
use tracing::trace;

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

/// One device row. Values are kept verbatim, including the tree glyphs in
/// `name` and the unit suffix in `size`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LsblkEntry {
    pub name: String,
    pub maj_min: String,
    pub rm: String,
    pub size: String,
    pub ro: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub mountpoint: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LsblkParser;

impl LsblkParser {
    pub fn parse_entries(&self, input: &str) -> Result<Vec<LsblkEntry>> {
        let input = ensure_input(input)?;
        let mut entries = Vec::new();

        for line in split_lines(input).into_iter().skip(1) {
            let fields = split_fields(line);
            if fields.len() < 6 {
                trace!(line, "Skipping short lsblk line");
                continue;
            }
            entries.push(LsblkEntry {
                name: fields[0].to_string(),
                maj_min: fields[1].to_string(),
                rm: fields[2].to_string(),
                size: fields[3].to_string(),
                ro: fields[4].to_string(),
                kind: fields[5].to_string(),
                mountpoint: field_or_empty(&fields, 6),
            });
        }

        Ok(entries)
    }
}

impl CommandParser for LsblkParser {
    fn name(&self) -> &'static str {
        "lsblk"
    }

    fn category(&self) -> Category {
        Category::Files
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        self.parse_entries(input).map(ParseOutput::many)
    }
}
