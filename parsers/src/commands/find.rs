//! `find` output, either bare paths or `find -ls` listings.

use serde::{Deserialize, Serialize};
use term_json_core::{
    LISTING_LAYOUTS, Result, Timestamp, ensure_input, join_from, parse_first, parse_int,
    split_fields, split_lines,
};
use tracing::trace;

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub permissions: String,
    pub size: i64,
    pub modified_time: Timestamp,
    pub inode: i64,
    pub links: u32,
    pub owner: String,
    pub group: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FindParser;

impl FindParser {
    pub fn parse_entries(&self, input: &str) -> Result<Vec<FindEntry>> {
        let input = ensure_input(input)?;
        let mut entries = Vec::new();

        for line in split_lines(input) {
            if !line.contains(' ') {
                entries.push(FindEntry {
                    path: line.to_string(),
                    kind: "unknown".to_string(),
                    ..FindEntry::default()
                });
                continue;
            }
            match parse_ls_line(line) {
                Some(entry) => entries.push(entry),
                None => trace!(line, "Skipping short find -ls line"),
            }
        }

        Ok(entries)
    }
}

/// `inode blocks permissions links owner group size Mon DD HH:MM path...`
fn parse_ls_line(line: &str) -> Option<FindEntry> {
    let fields = split_fields(line);
    if fields.len() < 11 {
        return None;
    }

    let permissions = fields[2];
    Some(FindEntry {
        path: join_from(&fields, 10),
        kind: file_kind(permissions).to_string(),
        permissions: permissions.to_string(),
        size: parse_int(fields[6]).unwrap_or_default(),
        modified_time: parse_first(&fields[7..10].join(" "), LISTING_LAYOUTS).unwrap_or_default(),
        inode: parse_int(fields[0]).unwrap_or_default(),
        links: parse_int(fields[3]).unwrap_or_default(),
        owner: fields[4].to_string(),
        group: fields[5].to_string(),
    })
}

fn file_kind(permissions: &str) -> &'static str {
    match permissions.chars().next() {
        Some('d') => "directory",
        Some('l') => "symlink",
        Some('-') => "file",
        _ => "special",
    }
}

impl CommandParser for FindParser {
    fn name(&self) -> &'static str {
        "find"
    }

    fn category(&self) -> Category {
        Category::Files
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        self.parse_entries(input).map(ParseOutput::many)
    }
}
