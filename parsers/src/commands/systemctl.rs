//! `systemctl list-units` and `systemctl status` output.
//!
//! The two formats share nothing, so the parser detects which one it was
//! given first. `list-units` produces one record per unit; `status` produces
//! a single record for the unit it describes.

use serde::{Deserialize, Serialize};
use term_json_core::{Result, ensure_input, join_from, split_fields, split_lines};
use tracing::{debug, trace};

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

/// Bullets systemd prints in front of a unit name.
const STATUS_GLYPHS: &[char] = &['●', '○', '×'];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemctlEntry {
    pub unit: String,
    pub load: String,
    pub active: String,
    pub sub: String,
    pub description: String,
    /// Full `Active:` line of `systemctl status`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    /// Full `Main PID:` value, e.g. `12345 (apache2)`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub main: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tasks: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub memory: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cpu: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub process_id: String,
}

/// Which of the two formats an input is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemctlFormat {
    ListUnits,
    Status,
}

impl SystemctlFormat {
    /// A `UNIT` column header always means `list-units`. Otherwise a status
    /// glyph or an `Active:` key line means `status`. A plain `*` only
    /// counts as a glyph at the very start of the input, where terminals
    /// without UTF-8 print it.
    pub fn detect(input: &str) -> Self {
        let lines = split_lines(input);
        if lines.iter().any(|line| line.starts_with("UNIT")) {
            return Self::ListUnits;
        }
        let has_glyph = input.contains(STATUS_GLYPHS);
        let ascii_glyph = lines.first().is_some_and(|line| line.starts_with("* "));
        let has_active_key = lines.iter().any(|line| line.starts_with("Active:"));
        if has_glyph || ascii_glyph || has_active_key {
            Self::Status
        } else {
            Self::ListUnits
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemctlParser;

impl SystemctlParser {
    /// Parses `systemctl list-units` output.
    pub fn parse_units(&self, input: &str) -> Result<Vec<SystemctlEntry>> {
        let input = ensure_input(input)?;
        let lines = split_lines(input);
        let start = lines
            .iter()
            .position(|line| line.starts_with("UNIT"))
            .map_or(0, |index| index + 1);

        let mut entries = Vec::new();
        for line in &lines[start..] {
            if is_list_footer(line) {
                continue;
            }
            let mut fields = split_fields(line);
            // Failed units are prefixed with a bullet.
            if fields.first().is_some_and(|f| is_glyph(f)) {
                fields.remove(0);
            }
            if fields.len() < 4 {
                trace!(line, "Skipping short systemctl line");
                continue;
            }
            entries.push(SystemctlEntry {
                unit: fields[0].to_string(),
                load: fields[1].to_string(),
                active: fields[2].to_string(),
                sub: fields[3].to_string(),
                description: join_from(&fields, 4),
                ..SystemctlEntry::default()
            });
        }

        Ok(entries)
    }

    /// Parses `systemctl status <unit>` output.
    pub fn parse_status(&self, input: &str) -> Result<SystemctlEntry> {
        let input = ensure_input(input)?;
        let mut entry = SystemctlEntry::default();

        for line in split_lines(input) {
            let fields = split_fields(line);
            if entry.unit.is_empty() && fields.first().is_some_and(|f| is_glyph(f)) {
                entry.unit = fields.get(1).map(|f| (*f).to_string()).unwrap_or_default();
                if let Some((_, description)) = line.split_once(" - ") {
                    entry.description = description.trim().to_string();
                }
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "Loaded" => entry.load = first_word(value),
                "Active" => {
                    entry.active = first_word(value);
                    entry.sub = parenthesized(value);
                    entry.status = value.to_string();
                }
                "Main PID" => {
                    entry.main = value.to_string();
                    entry.process_id = first_word(value);
                }
                "Tasks" => entry.tasks = value.to_string(),
                "Memory" => entry.memory = value.to_string(),
                "CPU" => entry.cpu = value.to_string(),
                _ => {}
            }
        }

        Ok(entry)
    }
}

fn is_glyph(field: &str) -> bool {
    field == "*" || (!field.is_empty() && field.chars().all(|c| STATUS_GLYPHS.contains(&c)))
}

/// Legend (`LOAD   = ...`) and summary (`5 loaded units listed.`) lines.
fn is_list_footer(line: &str) -> bool {
    if line.contains("units listed") || line.starts_with("LOAD") {
        return true;
    }
    let fields = split_fields(line);
    fields.get(1) == Some(&"=")
}

fn first_word(value: &str) -> String {
    value.split_whitespace().next().unwrap_or_default().to_string()
}

/// `active (running) since ...` → `running`.
fn parenthesized(value: &str) -> String {
    value
        .split_once('(')
        .and_then(|(_, rest)| rest.split_once(')'))
        .map(|(inner, _)| inner.trim().to_string())
        .unwrap_or_default()
}

impl CommandParser for SystemctlParser {
    fn name(&self) -> &'static str {
        "systemctl"
    }

    fn category(&self) -> Category {
        Category::Services
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        let trimmed = ensure_input(input)?;
        let format = SystemctlFormat::detect(trimmed);
        debug!(?format, "Detected systemctl output format");
        match format {
            SystemctlFormat::ListUnits => self.parse_units(trimmed).map(ParseOutput::many),
            SystemctlFormat::Status => self.parse_status(trimmed).map(ParseOutput::single),
        }
    }
}
