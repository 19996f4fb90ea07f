//! `/etc/hosts` entries.

use serde::{Deserialize, Serialize};
use term_json_core::{Result, ensure_input, split_fields};

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostsEntry {
    pub ip: String,
    pub hostnames: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
    pub original: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HostsParser;

impl HostsParser {
    /// Comment-only lines are kept as entries carrying just the comment.
    pub fn parse_entries(&self, input: &str) -> Result<Vec<HostsEntry>> {
        let input = ensure_input(input)?;
        let mut entries = Vec::new();

        for original in input.lines() {
            let line = original.trim();
            if line.is_empty() {
                continue;
            }

            let (data, comment) = match line.split_once('#') {
                Some((data, comment)) => (data, comment.trim()),
                None => (line, ""),
            };
            let fields = split_fields(data);

            entries.push(HostsEntry {
                ip: fields.first().map(|ip| (*ip).to_string()).unwrap_or_default(),
                hostnames: fields.iter().skip(1).map(|h| (*h).to_string()).collect(),
                comment: comment.to_string(),
                original: original.to_string(),
            });
        }

        Ok(entries)
    }
}

impl CommandParser for HostsParser {
    fn name(&self) -> &'static str {
        "hosts"
    }

    fn category(&self) -> Category {
        Category::Config
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        self.parse_entries(input).map(ParseOutput::many)
    }
}
