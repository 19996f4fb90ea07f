//! `du` disk usage in 1K blocks.

use serde::{Deserialize, Serialize};
use term_json_core::{Result, ensure_input, join_from, parse_int, split_fields, split_lines};
use tracing::trace;

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuEntry {
    pub size: i64,
    pub size_bytes: i64,
    pub path: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DuParser;

impl DuParser {
    pub fn parse_entries(&self, input: &str) -> Result<Vec<DuEntry>> {
        let input = ensure_input(input)?;

        let entries = split_lines(input)
            .into_iter()
            .filter_map(|line| {
                let fields = split_fields(line);
                if fields.len() < 2 {
                    trace!(line, "Skipping du line without a path");
                    return None;
                }
                let size = parse_int::<i64>(fields[0]).unwrap_or_default();
                Some(DuEntry {
                    size,
                    size_bytes: size.saturating_mul(1024),
                    path: join_from(&fields, 1),
                })
            })
            .collect();

        Ok(entries)
    }
}

impl CommandParser for DuParser {
    fn name(&self) -> &'static str {
        "du"
    }

    fn category(&self) -> Category {
        Category::Files
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        self.parse_entries(input).map(ParseOutput::many)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_du() {
        let input = "1024\t./docs\n512\t./src/main\n2048\t./src/tests\n256\t./config\n4096\t.";
        let entries = DuParser.parse_entries(input).unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].size, 1024);
        assert_eq!(entries[0].size_bytes, 1024 * 1024);
        assert_eq!(entries[0].path, "./docs");
        assert_eq!(entries[4].path, ".");
    }

    #[test]
    fn test_paths_with_spaces() {
        let input = "512\t./My Documents/file.txt\n256\t./Program Files/app";
        let entries = DuParser.parse_entries(input).unwrap();
        assert_eq!(entries[0].path, "./My Documents/file.txt");
        assert_eq!(entries[1].path, "./Program Files/app");
    }

    #[test]
    fn test_lone_size_is_skipped() {
        let entries = DuParser.parse_entries("4096\n8\t./a").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "./a");
    }
}
