//! `uptime` one-line summary.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use term_json_core::{Result, ensure_input, parse_float, parse_int};

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

static CURRENT_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,2}:\d{2}:\d{2})").expect("static regex must compile")
});
static UPTIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"up\s+(.+?),\s+\d+\s+users?").expect("static regex must compile")
});
static USERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+users?").expect("static regex must compile"));
static LOAD_AVERAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"load averages?:\s*([0-9.]+),?\s*([0-9.]+),?\s*([0-9.]+)")
        .expect("static regex must compile")
});
static DAYS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+days?").expect("static regex must compile"));
static HOURS_MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+):(\d+)").expect("static regex must compile"));
static MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+mins?").expect("static regex must compile"));

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UptimeEntry {
    pub current_time: String,
    /// Uptime exactly as printed, e.g. `12 days,  3:45`.
    pub uptime: String,
    pub uptime_seconds: u64,
    pub users: u32,
    pub load_avg_1: f64,
    pub load_avg_5: f64,
    pub load_avg_15: f64,
}

/// Load averages and uptime shared by `uptime` and the first line of `w`.
pub(crate) struct Summary {
    pub current_time: String,
    pub uptime: String,
    pub uptime_seconds: u64,
    pub users: u32,
    pub load: [f64; 3],
}

pub(crate) fn parse_summary(line: &str) -> Summary {
    let uptime = UPTIME
        .captures(line)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default();
    let mut load = [0.0; 3];
    if let Some(caps) = LOAD_AVERAGE.captures(line) {
        for (slot, index) in load.iter_mut().zip(1..=3) {
            *slot = parse_float(&caps[index]).unwrap_or_default();
        }
    }

    Summary {
        current_time: first_capture(&CURRENT_TIME, line).unwrap_or_default(),
        uptime_seconds: uptime_seconds(&uptime),
        uptime,
        users: first_capture(&USERS, line)
            .and_then(|users| parse_int(&users))
            .unwrap_or_default(),
        load,
    }
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).map(|caps| caps[1].to_string())
}

fn component(re: &Regex, text: &str, group: usize) -> u64 {
    re.captures(text)
        .and_then(|caps| parse_int(&caps[group]))
        .unwrap_or_default()
}

/// Sums the day, `H:MM` and `N min` components of an uptime string,
/// saturating at `u64::MAX`.
pub(crate) fn uptime_seconds(uptime: &str) -> u64 {
    [
        (component(&DAYS, uptime, 1), 86_400),
        (component(&HOURS_MINUTES, uptime, 1), 3_600),
        (component(&HOURS_MINUTES, uptime, 2), 60),
        (component(&MINUTES, uptime, 1), 60),
    ]
    .into_iter()
    .fold(0u64, |total, (count, unit)| {
        total.saturating_add(count.saturating_mul(unit))
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UptimeParser;

impl UptimeParser {
    pub fn parse_entry(&self, input: &str) -> Result<UptimeEntry> {
        let input = ensure_input(input)?;
        let summary = parse_summary(input);
        Ok(UptimeEntry {
            current_time: summary.current_time,
            uptime: summary.uptime,
            uptime_seconds: summary.uptime_seconds,
            users: summary.users,
            load_avg_1: summary.load[0],
            load_avg_5: summary.load[1],
            load_avg_15: summary.load[2],
        })
    }
}

impl CommandParser for UptimeParser {
    fn name(&self) -> &'static str {
        "uptime"
    }

    fn category(&self) -> Category {
        Category::System
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        self.parse_entry(input).map(ParseOutput::single)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_and_hours() {
        let entry = UptimeParser
            .parse_entry(" 14:30:42 up 12 days,  3:45,  2 users,  load average: 0.15, 0.12, 0.10")
            .unwrap();
        assert_eq!(entry.current_time, "14:30:42");
        assert_eq!(entry.uptime, "12 days,  3:45");
        assert_eq!(entry.uptime_seconds, 12 * 86_400 + 3 * 3_600 + 45 * 60);
        assert_eq!(entry.users, 2);
        assert_eq!(entry.load_avg_1, 0.15);
        assert_eq!(entry.load_avg_5, 0.12);
        assert_eq!(entry.load_avg_15, 0.10);
    }

    #[test]
    fn test_hours_only_single_user() {
        let entry = UptimeParser
            .parse_entry(" 09:15:30 up  1:23,  1 user,  load average: 0.25, 0.20, 0.18")
            .unwrap();
        assert_eq!(entry.uptime, "1:23");
        assert_eq!(entry.uptime_seconds, 4_980);
        assert_eq!(entry.users, 1);
    }

    #[test]
    fn test_minutes_only() {
        let entry = UptimeParser
            .parse_entry(" 10:05:15 up 45 min,  3 users,  load average: 1.05, 0.95, 0.85")
            .unwrap();
        assert_eq!(entry.uptime, "45 min");
        assert_eq!(entry.uptime_seconds, 2_700);
        assert_eq!(entry.users, 3);
        assert_eq!(entry.load_avg_15, 0.85);
    }

    #[test]
    fn test_macos_load_averages() {
        let entry = UptimeParser
            .parse_entry("10:00  up 3 days,  2:01, 2 users, load averages: 1.92 2.04 2.11")
            .unwrap();
        assert_eq!(entry.uptime, "3 days,  2:01");
        assert_eq!(entry.load_avg_1, 1.92);
        assert_eq!(entry.load_avg_15, 2.11);
    }

    #[test]
    fn test_huge_day_count_saturates() {
        let entry = UptimeParser
            .parse_entry(" 10:00:00 up 300000000000000 days,  2:01,  1 user,  load average: 0.00, 0.00, 0.00")
            .unwrap();
        assert_eq!(entry.uptime, "300000000000000 days,  2:01");
        assert_eq!(entry.uptime_seconds, u64::MAX);
        assert_eq!(entry.users, 1);
    }

    #[test]
    fn test_unmatched_text_yields_zeros() {
        let entry = UptimeParser.parse_entry("command not found").unwrap();
        assert_eq!(entry, UptimeEntry::default());
    }
}
