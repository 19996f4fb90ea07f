//! `ps` process listings.
//!
//! Three layouts are recognized from the column header:
//!
//! - `PID TTY TIME CMD` (plain `ps`)
//! - `USER PID %CPU %MEM VSZ RSS TTY STAT START TIME COMMAND` (`ps aux`)
//! - `UID PID PPID C STIME TTY TIME CMD` (`ps -ef`)
//!
//! With an unrecognized header, rows of eleven or more fields are read as
//! `ps aux` and shorter ones as plain `ps`.

use serde::{Deserialize, Serialize};
use term_json_core::{
    Result, ensure_input, is_zero, join_from, parse_float, parse_int, split_fields, split_lines,
};
use tracing::{debug, trace};

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PsEntry {
    pub pid: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub ppid: u32,
    pub user: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub cpu_percent: f64,
    #[serde(skip_serializing_if = "is_zero")]
    pub memory_percent: f64,
    #[serde(skip_serializing_if = "is_zero")]
    pub vsz: u64,
    #[serde(skip_serializing_if = "is_zero")]
    pub rss: u64,
    pub tty: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stat: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub start: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub time: String,
    pub command: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Basic,
    Aux,
    Full,
    /// Decide per row from the field count.
    ByWidth,
}

impl Layout {
    fn from_header(header: &str) -> Self {
        let columns = split_fields(header);
        match columns.first().copied() {
            Some("PID") => Self::Basic,
            Some("USER") if columns.contains(&"%CPU") => Self::Aux,
            Some("UID") if columns.contains(&"PPID") => Self::Full,
            _ => Self::ByWidth,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PsParser;

impl PsParser {
    pub fn parse_entries(&self, input: &str) -> Result<Vec<PsEntry>> {
        let input = ensure_input(input)?;
        let lines = split_lines(input);
        let Some((header, rows)) = lines.split_first() else {
            return Ok(Vec::new());
        };

        let layout = Layout::from_header(header);
        debug!(?layout, "Detected ps layout");

        let mut entries = Vec::new();
        for line in rows {
            let fields = split_fields(line);
            if fields.len() < 4 {
                trace!(line, "Skipping short ps line");
                continue;
            }
            let row_layout = match layout {
                Layout::ByWidth if fields.len() >= 11 => Layout::Aux,
                Layout::ByWidth => Layout::Basic,
                Layout::Aux if fields.len() < 11 => Layout::Basic,
                Layout::Full if fields.len() < 8 => Layout::Basic,
                other => other,
            };
            entries.push(parse_row(&fields, row_layout));
        }

        Ok(entries)
    }
}

fn parse_row(fields: &[&str], layout: Layout) -> PsEntry {
    match layout {
        Layout::Aux => PsEntry {
            user: fields[0].to_string(),
            pid: parse_int(fields[1]).unwrap_or_default(),
            cpu_percent: parse_float(fields[2]).unwrap_or_default(),
            memory_percent: parse_float(fields[3]).unwrap_or_default(),
            vsz: parse_int(fields[4]).unwrap_or_default(),
            rss: parse_int(fields[5]).unwrap_or_default(),
            tty: fields[6].to_string(),
            stat: fields[7].to_string(),
            start: fields[8].to_string(),
            time: fields[9].to_string(),
            command: join_from(fields, 10),
            ..PsEntry::default()
        },
        Layout::Full => PsEntry {
            user: fields[0].to_string(),
            pid: parse_int(fields[1]).unwrap_or_default(),
            ppid: parse_int(fields[2]).unwrap_or_default(),
            start: fields[4].to_string(),
            tty: fields[5].to_string(),
            time: fields[6].to_string(),
            command: join_from(fields, 7),
            ..PsEntry::default()
        },
        Layout::Basic | Layout::ByWidth => PsEntry {
            pid: parse_int(fields[0]).unwrap_or_default(),
            tty: fields[1].to_string(),
            time: fields[2].to_string(),
            command: join_from(fields, 3),
            ..PsEntry::default()
        },
    }
}

impl CommandParser for PsParser {
    fn name(&self) -> &'static str {
        "ps"
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

    #[test]
    fn test_parse_aux() {
        let input = "\
USER       PID %CPU %MEM    VSZ   RSS TTY      STAT START   TIME COMMAND
root         1  0.0  0.1  225316  9876 ?        Ss   Jan01   0:01 /sbin/init
user      1234  2.5  1.2  123456 12345 pts/0    R+   10:30   0:05 python script.py
user      5678  0.1  0.5   67890  5432 pts/1    S    09:15   0:00 bash";
        let entries = PsParser.parse_entries(input).unwrap();
        assert_eq!(entries.len(), 3);

        let init = &entries[0];
        assert_eq!(init.user, "root");
        assert_eq!(init.pid, 1);
        assert_eq!(init.vsz, 225316);
        assert_eq!(init.stat, "Ss");
        assert_eq!(init.command, "/sbin/init");

        let python = &entries[1];
        assert_eq!(python.cpu_percent, 2.5);
        assert_eq!(python.memory_percent, 1.2);
        assert_eq!(python.tty, "pts/0");
        assert_eq!(python.start, "10:30");
        assert_eq!(python.command, "python script.py");
    }

    #[test]
    fn test_parse_basic() {
        let input = "  PID TTY          TIME CMD\n 1234 pts/0    00:00:05 python\n 5678 pts/1    00:00:00 bash";
        let entries = PsParser.parse_entries(input).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].pid, 1234);
        assert_eq!(entries[0].tty, "pts/0");
        assert_eq!(entries[0].time, "00:00:05");
        assert_eq!(entries[0].command, "python");
        assert!(entries[0].user.is_empty());

        let json = serde_json::to_value(&entries[0]).unwrap();
        assert!(json.get("cpu_percent").is_none());
        assert!(json.get("stat").is_none());
    }

    #[test]
    fn test_basic_header_keeps_long_commands_intact() {
        let input = "PID TTY TIME CMD\n42 pts/0 00:00:01 java -Xmx1g -jar app.jar --port 8080 --verbose --debug";
        let entries = PsParser.parse_entries(input).unwrap();
        assert_eq!(entries[0].pid, 42);
        assert_eq!(
            entries[0].command,
            "java -Xmx1g -jar app.jar --port 8080 --verbose --debug"
        );
    }

    #[test]
    fn test_parse_full_format() {
        let input = "\
UID          PID    PPID  C STIME TTY          TIME CMD
root           1       0  0 Jan01 ?        00:00:03 /sbin/init splash
user        2001    1999  0 10:30 pts/0    00:00:00 -bash";
        let entries = PsParser.parse_entries(input).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].command, "/sbin/init splash");
        assert_eq!(entries[1].user, "user");
        assert_eq!(entries[1].pid, 2001);
        assert_eq!(entries[1].ppid, 1999);
        assert_eq!(entries[1].start, "10:30");
        assert_eq!(entries[1].tty, "pts/0");
    }

    #[test]
    fn test_header_only_yields_empty_list() {
        let entries = PsParser.parse_entries("  PID TTY          TIME CMD").unwrap();
        assert!(entries.is_empty());
    }
}
