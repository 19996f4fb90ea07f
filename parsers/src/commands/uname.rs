//! `uname -a` system identification.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use term_json_core::{Result, ensure_input, split_fields};
use tracing::debug;

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

static ARCHITECTURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(x86_64|amd64|i[3-6]86|aarch64|arm\w*|ppc\w*|s390x?|riscv\w*|mips\w*|sparc\w*|loongarch\w*)$")
        .expect("static regex must compile")
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnameEntry {
    pub kernel_name: String,
    pub node_name: String,
    pub kernel_release: String,
    pub kernel_version: String,
    pub machine: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub processor: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub operating_system: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UnameParser;

impl UnameParser {
    /// The kernel version spans several fields (`#83-Ubuntu SMP Sat May 8
    /// 02:35:39 UTC 2021`) and runs up to the first architecture name. From
    /// there on come machine, processor, hardware platform and operating
    /// system, any of which may be missing. Without a recognizable
    /// architecture the last three fields are taken as machine, processor
    /// and operating system, unless the line is too short to hold them.
    pub fn parse_entry(&self, input: &str) -> Result<UnameEntry> {
        let input = ensure_input(input)?;
        let fields = split_fields(input);
        let field = |index: usize| fields.get(index).map(|f| (*f).to_string()).unwrap_or_default();

        let mut entry = UnameEntry {
            kernel_name: field(0),
            node_name: field(1),
            kernel_release: field(2),
            ..UnameEntry::default()
        };

        match machine_index(&fields) {
            Some(machine) => {
                entry.kernel_version = fields[3..machine].join(" ");
                apply_trailing(&mut entry, &fields[machine..]);
            }
            None => {
                debug!("No architecture in uname output, using positional columns");
                let len = fields.len();
                if len >= 7 {
                    entry.kernel_version = fields[3..len - 3].join(" ");
                    entry.machine = field(len - 3);
                } else if len > 3 {
                    entry.kernel_version = fields[3..].join(" ");
                }
                if len >= 8 {
                    entry.processor = field(len - 2);
                }
                if len >= 9 {
                    entry.operating_system = field(len - 1);
                }
            }
        }

        Ok(entry)
    }
}

fn machine_index(fields: &[&str]) -> Option<usize> {
    fields
        .iter()
        .enumerate()
        .skip(4)
        .find(|(_, f)| ARCHITECTURE.is_match(f))
        .map(|(index, _)| index)
}

fn apply_trailing(entry: &mut UnameEntry, trailing: &[&str]) {
    let owned = |i: usize| trailing[i].to_string();
    match trailing.len() {
        0 => {}
        1 => entry.machine = owned(0),
        2 => {
            entry.machine = owned(0);
            entry.operating_system = owned(1);
        }
        len => {
            entry.machine = owned(0);
            entry.processor = owned(1);
            entry.operating_system = owned(len - 1);
        }
    }
}

impl CommandParser for UnameParser {
    fn name(&self) -> &'static str {
        "uname"
    }

    fn category(&self) -> Category {
        Category::System
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        self.parse_entry(input).map(ParseOutput::single)
    }
}
