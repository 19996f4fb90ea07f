//! `free` memory summary.

use serde::{Deserialize, Serialize};
use term_json_core::{
    ParseError, Result, ensure_input, is_zero, parse_int, split_fields, split_lines,
};
use tracing::{debug, trace};

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

/// One `Mem:`/`Swap:` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub total: i64,
    pub used: i64,
    pub free: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub shared: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub buffers: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub cache: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub available: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeOutput {
    pub memory: Vec<FreeEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swap: Option<FreeEntry>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FreeParser;

impl FreeParser {
    pub fn parse_entry(&self, input: &str) -> Result<FreeOutput> {
        let input = ensure_input(input)?;
        let lines = split_lines(input);
        if lines.len() < 2 {
            return Err(ParseError::InsufficientData {
                command: "free",
                expected: 2,
                actual: lines.len(),
            });
        }

        // procps 3.3+ prints a single `buff/cache` column before `available`.
        let combined_cache = lines[0].contains("buff/cache");
        if combined_cache {
            debug!("free output uses combined buff/cache column");
        }

        let mut output = FreeOutput::default();
        for (index, line) in lines.iter().enumerate() {
            if index == 0 && (line.contains("total") || line.contains("used")) {
                continue;
            }
            let fields = split_fields(line);
            if fields.len() < 4 {
                trace!(line, "Skipping short free line");
                continue;
            }

            let entry = parse_row(&fields, combined_cache);
            if entry.kind == "Swap" {
                output.swap = Some(entry);
            } else {
                output.memory.push(entry);
            }
        }

        Ok(output)
    }
}

fn parse_row(fields: &[&str], combined_cache: bool) -> FreeEntry {
    let column = |index: usize| {
        fields
            .get(index)
            .and_then(|raw| parse_int::<i64>(raw))
            .unwrap_or_default()
    };

    let mut entry = FreeEntry {
        kind: fields[0].trim_end_matches(':').to_string(),
        total: column(1),
        used: column(2),
        free: column(3),
        ..FreeEntry::default()
    };

    if entry.kind == "Mem" {
        entry.shared = column(4);
        if combined_cache {
            entry.cache = column(5);
            entry.available = column(6);
        } else {
            entry.buffers = column(5);
            entry.cache = column(6);
            entry.available = column(7);
        }
    }
    entry
}

impl CommandParser for FreeParser {
    fn name(&self) -> &'static str {
        "free"
    }

    fn category(&self) -> Category {
        Category::Process
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        self.parse_entry(input).map(ParseOutput::single)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_free_with_swap() {
        let input = "\
              total        used        free      shared     buffers       cache   available
Mem:        8048604     2048152     4096000      102400      204800     1904452     5600000
Swap:       2097148           0     2097148";
        let output = FreeParser.parse_entry(input).unwrap();
        assert_eq!(output.memory.len(), 1);

        let mem = &output.memory[0];
        assert_eq!(mem.kind, "Mem");
        assert_eq!(mem.total, 8048604);
        assert_eq!(mem.used, 2048152);
        assert_eq!(mem.free, 4096000);
        assert_eq!(mem.shared, 102400);
        assert_eq!(mem.buffers, 204800);
        assert_eq!(mem.cache, 1904452);
        assert_eq!(mem.available, 5600000);

        let swap = output.swap.as_ref().unwrap();
        assert_eq!(swap.total, 2097148);
        assert_eq!(swap.used, 0);
    }

    #[test]
    fn test_swap_omitted_when_absent() {
        let input = "             total       used       free\nMem:       8048604    2048152    4096000";
        let output = FreeParser.parse_entry(input).unwrap();
        assert!(output.swap.is_none());

        let json = serde_json::to_value(&output).unwrap();
        assert!(json.get("swap").is_none());
        assert!(json["memory"][0].get("shared").is_none());
        assert_eq!(json["memory"][0]["type"], serde_json::json!("Mem"));
    }

    #[test]
    fn test_combined_buff_cache_column() {
        let input = "\
               total        used        free      shared  buff/cache   available
Mem:        16318412     4201232     8123456      345678     3993724    11412345
Swap:        2097148           0     2097148";
        let output = FreeParser.parse_entry(input).unwrap();
        let mem = &output.memory[0];
        assert_eq!(mem.buffers, 0);
        assert_eq!(mem.cache, 3993724);
        assert_eq!(mem.available, 11412345);
    }

    #[test]
    fn test_single_line_is_insufficient() {
        let err = FreeParser.parse_entry("Mem: 1 2 3").unwrap_err();
        assert_eq!(
            err,
            ParseError::InsufficientData {
                command: "free",
                expected: 2,
                actual: 1,
            }
        );
    }
}
