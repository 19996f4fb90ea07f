//! `/etc/passwd` account records.

use serde::{Deserialize, Serialize};
use term_json_core::{Result, ensure_input, parse_int, split_lines};
use tracing::trace;

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswdEntry {
    pub username: String,
    pub password: String,
    pub uid: u32,
    pub gid: u32,
    pub gecos: String,
    pub home_dir: String,
    pub shell: String,
    pub original: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PasswdParser;

impl PasswdParser {
    /// Lines must have exactly seven `:`-separated fields; anything else is
    /// skipped.
    pub fn parse_entries(&self, input: &str) -> Result<Vec<PasswdEntry>> {
        let input = ensure_input(input)?;
        let mut entries = Vec::new();

        for line in split_lines(input) {
            if line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split(':').collect();
            let [username, password, uid, gid, gecos, home_dir, shell] = fields[..] else {
                trace!(line, fields = fields.len(), "Skipping malformed passwd line");
                continue;
            };

            entries.push(PasswdEntry {
                username: username.to_string(),
                password: password.to_string(),
                uid: parse_int(uid).unwrap_or_default(),
                gid: parse_int(gid).unwrap_or_default(),
                gecos: gecos.to_string(),
                home_dir: home_dir.to_string(),
                shell: shell.to_string(),
                original: line.to_string(),
            });
        }

        Ok(entries)
    }
}

impl CommandParser for PasswdParser {
    fn name(&self) -> &'static str {
        "passwd"
    }

    fn category(&self) -> Category {
        Category::Config
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        self.parse_entries(input).map(ParseOutput::many)
    }
}
