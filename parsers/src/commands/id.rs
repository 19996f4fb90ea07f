//! `id` user and group identity.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use term_json_core::{Result, ensure_input, parse_int};

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

static UID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"uid=(\d+)\(([^)]+)\)").expect("static regex must compile"));
static GID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"gid=(\d+)\(([^)]+)\)").expect("static regex must compile"));
static GROUPS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"groups=([^,\s]+(?:,[^,\s]+)*)").expect("static regex must compile")
});
static GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\(([^)]+)\)").expect("static regex must compile"));
static CONTEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"context=(\S+)").expect("static regex must compile"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdEntry {
    pub uid: u32,
    pub user: String,
    pub gid: u32,
    pub group: String,
    pub groups: Vec<IdGroup>,
    /// SELinux security context, when present.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub context: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdGroup {
    pub gid: u32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IdParser;

impl IdParser {
    pub fn parse_entry(&self, input: &str) -> Result<IdEntry> {
        let input = ensure_input(input)?;
        let mut entry = IdEntry::default();

        if let Some(caps) = UID.captures(input) {
            entry.uid = parse_int(&caps[1]).unwrap_or_default();
            entry.user = caps[2].to_string();
        }
        if let Some(caps) = GID.captures(input) {
            entry.gid = parse_int(&caps[1]).unwrap_or_default();
            entry.group = caps[2].to_string();
        }
        if let Some(caps) = GROUPS.captures(input) {
            entry.groups = caps[1]
                .split(',')
                .filter_map(|group| GROUP.captures(group))
                .map(|caps| IdGroup {
                    gid: parse_int(&caps[1]).unwrap_or_default(),
                    name: caps[2].to_string(),
                })
                .collect();
        }
        if let Some(caps) = CONTEXT.captures(input) {
            entry.context = caps[1].to_string();
        }

        Ok(entry)
    }
}

impl CommandParser for IdParser {
    fn name(&self) -> &'static str {
        "id"
    }

    fn category(&self) -> Category {
        Category::System
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        self.parse_entry(input).map(ParseOutput::single)
    }
}
