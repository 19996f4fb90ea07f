//! `arp -n` neighbour table.

use serde::{Deserialize, Serialize};
use term_json_core::{Result, ensure_input, is_false, split_fields, split_lines};
use tracing::trace;

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

const INCOMPLETE: &str = "<incomplete>";

/// One row of the ARP cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArpEntry {
    pub address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hw_type: String,
    pub hw_address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub flags: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mask: String,
    pub interface: String,
    #[serde(skip_serializing_if = "is_false")]
    pub incomplete: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ArpParser;

impl ArpParser {
    pub fn parse_entries(&self, input: &str) -> Result<Vec<ArpEntry>> {
        let input = ensure_input(input)?;
        let mut entries = Vec::new();

        for line in split_lines(input) {
            if is_header(line) {
                continue;
            }
            let fields = split_fields(line);
            if fields.len() < 3 {
                trace!(line, "Skipping short arp line");
                continue;
            }
            entries.push(parse_row(line, &fields));
        }

        Ok(entries)
    }
}

fn is_header(line: &str) -> bool {
    line.starts_with("Address") || line.contains("HWtype") || line.contains("HWaddress")
}

/// Maps `Address HWtype HWaddress Flags [Mask] Iface`. The mask column is
/// blank on most Linux systems, so the interface is always the last field.
fn parse_row(line: &str, fields: &[&str]) -> ArpEntry {
    let mut entry = ArpEntry {
        address: fields[0].to_string(),
        ..ArpEntry::default()
    };

    if line.contains(INCOMPLETE) {
        entry.incomplete = true;
        entry.hw_address = INCOMPLETE.to_string();
        entry.interface = fields[fields.len() - 1].to_string();
        return entry;
    }

    entry.hw_type = fields[1].to_string();
    entry.hw_address = fields[2].to_string();
    if let Some(flags) = fields.get(3) {
        entry.flags = (*flags).to_string();
    }
    if fields.len() >= 6 {
        entry.mask = fields[4].to_string();
    }
    if fields.len() >= 5 {
        entry.interface = fields[fields.len() - 1].to_string();
    }
    entry
}

impl CommandParser for ArpParser {
    fn name(&self) -> &'static str {
        "arp"
    }

    fn category(&self) -> Category {
        Category::Network
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        self.parse_entries(input).map(ParseOutput::many)
    }
}
