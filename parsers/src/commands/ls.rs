//! `ls -l` long listing.

use serde::{Deserialize, Serialize};
use term_json_core::{
    LISTING_LAYOUTS, Result, Timestamp, ensure_input, parse_first, parse_int, split_fields,
    split_lines,
};
use tracing::trace;

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LsEntry {
    pub permissions: String,
    pub links: u32,
    pub owner: String,
    pub group: String,
    pub size: i64,
    pub modified: Timestamp,
    pub name: String,
    pub is_directory: bool,
    pub is_symlink: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub link_target: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LsParser;

impl LsParser {
    /// Lines with fewer than nine fields (`total 48`, directory headers)
    /// are skipped.
    pub fn parse_entries(&self, input: &str) -> Result<Vec<LsEntry>> {
        let input = ensure_input(input)?;
        let mut entries = Vec::new();

        for line in split_lines(input) {
            let fields = split_fields(line);
            if fields.len() < 9 {
                trace!(line, "Skipping non-listing ls line");
                continue;
            }

            let permissions = fields[0];
            let is_symlink = permissions.starts_with('l');
            let (name, link_target) = split_name(&fields[8..], is_symlink);

            entries.push(LsEntry {
                permissions: permissions.to_string(),
                links: parse_int(fields[1]).unwrap_or_default(),
                owner: fields[2].to_string(),
                group: fields[3].to_string(),
                size: parse_int(fields[4]).unwrap_or_default(),
                modified: parse_first(&fields[5..8].join(" "), LISTING_LAYOUTS)
                    .unwrap_or_default(),
                name,
                is_directory: permissions.starts_with('d'),
                is_symlink,
                link_target,
            });
        }

        Ok(entries)
    }
}

/// Splits `name -> target` for symlinks; other entries keep the whole
/// remainder as the name.
fn split_name(name_fields: &[&str], is_symlink: bool) -> (String, String) {
    if is_symlink {
        if let Some(arrow) = name_fields.iter().position(|f| *f == "->") {
            if arrow > 0 {
                return (
                    name_fields[..arrow].join(" "),
                    name_fields[arrow + 1..].join(" "),
                );
            }
        }
    }
    (name_fields.join(" "), String::new())
}

impl CommandParser for LsParser {
    fn name(&self) -> &'static str {
        "ls"
    }

    fn category(&self) -> Category {
        Category::Files
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        self.parse_entries(input).map(ParseOutput::many)
    }
}
