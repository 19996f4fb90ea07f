//! `env`/`printenv` variable listing.

use serde::{Deserialize, Serialize};
use term_json_core::{Result, ensure_input, split_lines};

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvEntry {
    pub name: String,
    pub value: String,
    pub original: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EnvParser;

impl EnvParser {
    /// Splits each line on the first `=`. Everything after it, including
    /// further `=` signs, is the value.
    pub fn parse_entries(&self, input: &str) -> Result<Vec<EnvEntry>> {
        let input = ensure_input(input)?;

        let entries = split_lines(input)
            .into_iter()
            .map(|line| {
                let (name, value) = line.split_once('=').unwrap_or((line, ""));
                EnvEntry {
                    name: name.to_string(),
                    value: value.to_string(),
                    original: line.to_string(),
                }
            })
            .collect();

        Ok(entries)
    }
}

impl CommandParser for EnvParser {
    fn name(&self) -> &'static str {
        "env"
    }

    fn category(&self) -> Category {
        Category::System
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        self.parse_entries(input).map(ParseOutput::many)
    }
}
