//! `vmstat` samples, one record per data row.

use serde::{Deserialize, Serialize};
use term_json_core::{Result, ensure_input, is_zero, parse_int, split_fields, split_lines};
use tracing::trace;

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

/// Columns up to and including `wa`; `st` is optional.
const MIN_COLUMNS: usize = 16;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmstatEntry {
    pub processes: VmstatProcesses,
    pub memory: VmstatMemory,
    pub swap: VmstatSwap,
    pub io: VmstatIo,
    pub system: VmstatSystem,
    pub cpu: VmstatCpu,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmstatProcesses {
    pub runnable: u32,
    pub blocked: u32,
}

/// Memory columns in KiB.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmstatMemory {
    pub swap_used: u64,
    pub free: u64,
    pub buffers: u64,
    pub cache: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmstatSwap {
    #[serde(rename = "in")]
    pub swap_in: u64,
    #[serde(rename = "out")]
    pub swap_out: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmstatIo {
    pub blocks_in: u64,
    pub blocks_out: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmstatSystem {
    pub interrupts: u64,
    pub context_switches: u64,
}

/// CPU time split in percent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmstatCpu {
    pub user_time: u32,
    pub system_time: u32,
    pub idle_time: u32,
    pub wait_time: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub stolen_time: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VmstatParser;

impl VmstatParser {
    /// Both header rows (`procs -----memory----- ...` and `r b swpd ...`)
    /// start with a non-numeric field and are skipped, so repeated headers
    /// from `vmstat 1 5` style output are handled too.
    pub fn parse_entries(&self, input: &str) -> Result<Vec<VmstatEntry>> {
        let input = ensure_input(input)?;
        let mut entries = Vec::new();

        for line in split_lines(input) {
            let fields = split_fields(line);
            if fields.first().and_then(|f| parse_int::<u64>(f)).is_none() {
                trace!(line, "Skipping vmstat header line");
                continue;
            }
            if fields.len() < MIN_COLUMNS {
                trace!(line, "Skipping short vmstat line");
                continue;
            }
            entries.push(parse_row(&fields));
        }

        Ok(entries)
    }
}

fn parse_row(fields: &[&str]) -> VmstatEntry {
    let num = |index: usize| -> u64 {
        fields
            .get(index)
            .and_then(|f| parse_int(f))
            .unwrap_or_default()
    };
    let small = |index: usize| -> u32 {
        fields
            .get(index)
            .and_then(|f| parse_int(f))
            .unwrap_or_default()
    };

    VmstatEntry {
        processes: VmstatProcesses {
            runnable: small(0),
            blocked: small(1),
        },
        memory: VmstatMemory {
            swap_used: num(2),
            free: num(3),
            buffers: num(4),
            cache: num(5),
        },
        swap: VmstatSwap {
            swap_in: num(6),
            swap_out: num(7),
        },
        io: VmstatIo {
            blocks_in: num(8),
            blocks_out: num(9),
        },
        system: VmstatSystem {
            interrupts: num(10),
            context_switches: num(11),
        },
        cpu: VmstatCpu {
            user_time: small(12),
            system_time: small(13),
            idle_time: small(14),
            wait_time: small(15),
            stolen_time: small(16),
        },
    }
}

impl CommandParser for VmstatParser {
    fn name(&self) -> &'static str {
        "vmstat"
    }

    fn category(&self) -> Category {
        Category::Process
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        self.parse_entries(input).map(ParseOutput::many)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VMSTAT: &str = "\
procs -----------memory---------- ---swap-- -----io---- -system-- ------cpu-----
 r  b   swpd   free   buff  cache   si   so    bi    bo   in   cs us sy id wa st
 1  0      0 123456  78901 234567    0    0     5    10  100  200  5  2 92  1  0
 0  1   1024 120000  79000 235000   12    3    40    80  150  300 10  4 80  5  1";

    #[test]
    fn test_parse_rows() {
        let entries = VmstatParser.parse_entries(VMSTAT).unwrap();
        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        assert_eq!(first.processes.runnable, 1);
        assert_eq!(first.processes.blocked, 0);
        assert_eq!(first.memory.free, 123456);
        assert_eq!(first.memory.buffers, 78901);
        assert_eq!(first.memory.cache, 234567);
        assert_eq!(first.io.blocks_in, 5);
        assert_eq!(first.io.blocks_out, 10);
        assert_eq!(first.system.interrupts, 100);
        assert_eq!(first.system.context_switches, 200);
        assert_eq!(first.cpu.idle_time, 92);
        assert_eq!(first.cpu.wait_time, 1);

        let second = &entries[1];
        assert_eq!(second.memory.swap_used, 1024);
        assert_eq!(second.swap.swap_in, 12);
        assert_eq!(second.swap.swap_out, 3);
        assert_eq!(second.cpu.stolen_time, 1);
    }

    #[test]
    fn test_swap_keys_and_stolen_omission() {
        let entries = VmstatParser.parse_entries(VMSTAT).unwrap();
        let json = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(json["swap"]["in"], 0);
        assert_eq!(json["swap"]["out"], 0);
        assert!(json["cpu"].get("stolen_time").is_none());

        let json = serde_json::to_value(&entries[1]).unwrap();
        assert_eq!(json["cpu"]["stolen_time"], 1);
    }

    #[test]
    fn test_row_without_stolen_column() {
        let input = " 2  0      0 500000  10000 200000    0    0     1     2   50   60  3  1 96  0";
        let entries = VmstatParser.parse_entries(input).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].processes.runnable, 2);
        assert_eq!(entries[0].cpu.stolen_time, 0);
    }

    #[test]
    fn test_headers_only_yield_nothing() {
        let input = VMSTAT.lines().take(2).collect::<Vec<_>>().join("\n");
        assert!(VmstatParser.parse_entries(&input).unwrap().is_empty());
    }
}
