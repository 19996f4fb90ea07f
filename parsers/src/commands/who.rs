//! `who` login sessions.

use serde::{Deserialize, Serialize};
use term_json_core::{
    LOGIN_LAYOUTS, Result, Timestamp, ensure_input, parse_first, split_fields, split_lines,
};
use tracing::trace;

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhoEntry {
    pub user: String,
    pub tty: String,
    pub login_time: Timestamp,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub host: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WhoParser;

impl WhoParser {
    pub fn parse_entries(&self, input: &str) -> Result<Vec<WhoEntry>> {
        let input = ensure_input(input)?;
        let mut entries = Vec::new();

        for line in split_lines(input) {
            let fields = split_fields(line);
            if fields.len() < 3 {
                trace!(line, "Skipping short who line");
                continue;
            }

            // `2024-01-15 10:30` takes two fields, `Jan 15 10:30` three.
            let date_len = if fields[2].starts_with(|c: char| c.is_ascii_digit()) {
                2
            } else {
                3
            };
            let rest_start = (2 + date_len).min(fields.len());
            let login_time = parse_first(&fields[2..rest_start].join(" "), LOGIN_LAYOUTS)
                .unwrap_or_default();

            let mut entry = WhoEntry {
                user: fields[0].to_string(),
                tty: fields[1].to_string(),
                login_time,
                ..WhoEntry::default()
            };

            let mut comment = Vec::new();
            for field in &fields[rest_start..] {
                match field.strip_prefix('(').and_then(|f| f.strip_suffix(')')) {
                    Some(host) => entry.host = host.to_string(),
                    None => comment.push(*field),
                }
            }
            entry.comment = comment.join(" ");

            entries.push(entry);
        }

        Ok(entries)
    }
}

impl CommandParser for WhoParser {
    fn name(&self) -> &'static str {
        "who"
    }

    fn category(&self) -> Category {
        Category::System
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        self.parse_entries(input).map(ParseOutput::many)
    }
}
