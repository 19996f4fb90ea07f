//! `date` output in any of the common textual forms.
//!
//! Candidates are tried in a fixed order: a bare Unix epoch, RFC 3339, the
//! default `date` layout (`Wed Jan 15 14:30:25 PST 2025`), then RFC 2822.
//! Input matching none of them still yields a record carrying only
//! `original`.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use term_json_core::{Result, Timestamp, ensure_input, in_zone, parse_int};
use tracing::debug;

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

static DEFAULT_LAYOUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)\s+(\w+)\s+(\d+)\s+(\d+:\d+:\d+)\s+(\w+)\s+(\d+)$")
        .expect("static regex must compile")
});

/// Parsed `date` output. `timestamp` and `unix` both hold epoch seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateEntry {
    pub timestamp: i64,
    pub iso: String,
    pub rfc3339: String,
    pub unix: i64,
    pub weekday: String,
    pub month: String,
    pub day: u32,
    pub time: String,
    pub timezone: String,
    pub year: i32,
    pub original: String,
}

impl DateEntry {
    fn set_instant(&mut self, instant: &Timestamp) {
        if let Some(secs) = instant.unix() {
            self.timestamp = secs;
            self.unix = secs;
            self.iso = instant.to_rfc3339();
            self.rfc3339 = instant.to_rfc3339();
        }
    }

    /// Fills the calendar fields from a fully resolved instant.
    fn fill_from(&mut self, dt: DateTime<FixedOffset>) {
        self.set_instant(&Timestamp::new(dt));
        self.weekday = dt.format("%A").to_string();
        self.month = dt.format("%B").to_string();
        self.day = dt.day();
        self.time = dt.format("%H:%M:%S").to_string();
        self.timezone = if dt.offset().local_minus_utc() == 0 {
            "UTC".to_string()
        } else {
            dt.format("%z").to_string()
        };
        self.year = dt.year();
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DateParser;

impl DateParser {
    pub fn parse_entry(&self, input: &str) -> Result<DateEntry> {
        let input = ensure_input(input)?;
        let mut entry = DateEntry {
            original: input.to_string(),
            ..DateEntry::default()
        };

        if let Some(secs) = parse_int::<i64>(input) {
            if let Some(dt) = Timestamp::from_unix(secs).and_then(|ts| ts.instant()) {
                debug!(secs, "Parsed date as Unix epoch");
                entry.fill_from(dt);
            }
            return Ok(entry);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            debug!("Parsed date as RFC 3339");
            entry.fill_from(dt);
            return Ok(entry);
        }

        if let Some(caps) = DEFAULT_LAYOUT.captures(input) {
            debug!("Parsed date in default layout");
            entry.weekday = caps[1].to_string();
            entry.month = caps[2].to_string();
            entry.day = parse_int(&caps[3]).unwrap_or_default();
            entry.time = caps[4].to_string();
            entry.timezone = caps[5].to_string();
            entry.year = parse_int(&caps[6]).unwrap_or_default();

            let local = format!("{} {} {} {}", &caps[2], &caps[3], &caps[6], &caps[4]);
            if let Some(instant) = NaiveDateTime::parse_from_str(&local, "%b %d %Y %H:%M:%S")
                .ok()
                .and_then(|naive| in_zone(naive, &caps[5]))
            {
                entry.set_instant(&instant);
            }
            return Ok(entry);
        }

        if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
            debug!("Parsed date as RFC 2822");
            entry.fill_from(dt);
            return Ok(entry);
        }

        debug!(input, "Unrecognized date format");
        Ok(entry)
    }
}

impl CommandParser for DateParser {
    fn name(&self) -> &'static str {
        "date"
    }

    fn category(&self) -> Category {
        Category::Utilities
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        self.parse_entry(input).map(ParseOutput::single)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_keeps_tokens() {
        let entry = DateParser.parse_entry("Wed Jan 15 14:30:25 PST 2025").unwrap();
        assert_eq!(entry.weekday, "Wed");
        assert_eq!(entry.month, "Jan");
        assert_eq!(entry.day, 15);
        assert_eq!(entry.time, "14:30:25");
        assert_eq!(entry.timezone, "PST");
        assert_eq!(entry.year, 2025);
        assert_eq!(entry.original, "Wed Jan 15 14:30:25 PST 2025");
        // 14:30:25 PST is 22:30:25 UTC.
        assert_eq!(entry.unix, 1736980225);
        assert_eq!(entry.timestamp, entry.unix);
        assert_eq!(entry.iso, "2025-01-15T14:30:25-08:00");
    }

    #[test]
    fn test_unix_epoch() {
        let entry = DateParser.parse_entry("1705321825").unwrap();
        assert_eq!(entry.unix, 1705321825);
        assert_eq!(entry.timestamp, 1705321825);
        assert_eq!(entry.iso, "2024-01-15T12:30:25Z");
        assert_eq!(entry.weekday, "Monday");
        assert_eq!(entry.month, "January");
        assert_eq!(entry.timezone, "UTC");
    }

    #[test]
    fn test_rfc3339_with_offset() {
        let entry = DateParser.parse_entry("2025-01-15T14:30:25+02:00").unwrap();
        assert_eq!(entry.unix, 1736944225);
        assert_eq!(entry.time, "14:30:25");
        assert_eq!(entry.timezone, "+0200");
        assert_eq!(entry.rfc3339, "2025-01-15T14:30:25+02:00");
    }

    #[test]
    fn test_rfc2822() {
        let entry = DateParser
            .parse_entry("Wed, 15 Jan 2025 14:30:25 +0000")
            .unwrap();
        assert_eq!(entry.unix, 1736951425);
        assert_eq!(entry.weekday, "Wednesday");
    }

    #[test]
    fn test_all_forms_agree_on_instant() {
        let inputs = [
            "1736951425",
            "2025-01-15T14:30:25Z",
            "Wed Jan 15 14:30:25 UTC 2025",
            "Wed, 15 Jan 2025 14:30:25 GMT",
        ];
        for input in inputs {
            let entry = DateParser.parse_entry(input).unwrap();
            assert_eq!(entry.unix, 1736951425, "{input}");
        }
    }

    #[test]
    fn test_unknown_zone_falls_back_to_utc() {
        let entry = DateParser.parse_entry("Wed Jan 15 14:30:25 XYZ 2025").unwrap();
        assert_eq!(entry.timezone, "XYZ");
        assert_eq!(entry.unix, 1736951425);
    }

    #[test]
    fn test_unrecognized_keeps_original_only() {
        let entry = DateParser.parse_entry("next tuesday").unwrap();
        assert_eq!(entry.original, "next tuesday");
        assert_eq!(entry.unix, 0);
        assert!(entry.iso.is_empty());
        assert!(entry.weekday.is_empty());
    }
}
