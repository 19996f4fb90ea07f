//! Zero-able instants and ordered timestamp layouts.
//!
//! Command output carries dates in many shapes (`Jan 15 14:30`,
//! `2023-01-15 14:30`, `2023-01-01 12:00:00.000000000 +0000`, ...). Parsers
//! hand a candidate string and an ordered [`Layout`] list to
//! [`parse_first`]; the first layout that matches wins. When none match the
//! field stays at [`Timestamp::ZERO`], which serializes as
//! `"0001-01-01T00:00:00Z"` so the key is still present in the output.

use std::fmt;

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc,
};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Textual form of the zero timestamp.
pub const ZERO_TIMESTAMP: &str = "0001-01-01T00:00:00Z";

/// One candidate layout for [`parse_first`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// chrono format including a `%z` offset.
    Zoned(&'static str),
    /// Date and time without an offset; interpreted as UTC.
    Naive(&'static str),
    /// Date and time without a year; the current year is assumed.
    NoYear(&'static str),
    /// Date only; midnight UTC.
    DateOnly(&'static str),
}

/// Modification-time column of `ls -l` and `find -ls`.
pub const LISTING_LAYOUTS: &[Layout] = &[
    Layout::NoYear("%b %d %H:%M"),
    Layout::DateOnly("%b %d %Y"),
];

/// Login-time column of `who`.
pub const LOGIN_LAYOUTS: &[Layout] = &[
    Layout::Naive("%Y-%m-%d %H:%M"),
    Layout::NoYear("%b %d %H:%M"),
    Layout::Naive("%Y-%m-%d %H:%M:%S"),
];

/// `Access:`/`Modify:`/`Change:` lines of `stat`. `%.f` also accepts a
/// missing fraction.
pub const STAT_LAYOUTS: &[Layout] = &[
    Layout::Zoned("%Y-%m-%d %H:%M:%S%.f %z"),
    Layout::Naive("%Y-%m-%d %H:%M:%S%.f"),
];

/// Timezone abbreviations printed by `date` and their UTC offsets in
/// seconds. Unknown abbreviations resolve to UTC.
const ZONE_ABBREVIATIONS: &[(&str, i32)] = &[
    ("UTC", 0),
    ("GMT", 0),
    ("UT", 0),
    ("Z", 0),
    ("WET", 0),
    ("WEST", 3600),
    ("BST", 3600),
    ("CET", 3600),
    ("CEST", 7200),
    ("EET", 7200),
    ("EEST", 10800),
    ("MSK", 10800),
    ("IST", 19800),
    ("JST", 32400),
    ("KST", 32400),
    ("AEST", 36000),
    ("AEDT", 39600),
    ("NZST", 43200),
    ("NZDT", 46800),
    ("AST", -14400),
    ("ADT", -10800),
    ("EST", -18000),
    ("EDT", -14400),
    ("CST", -21600),
    ("CDT", -18000),
    ("MST", -25200),
    ("MDT", -21600),
    ("PST", -28800),
    ("PDT", -25200),
    ("AKST", -32400),
    ("AKDT", -28800),
    ("HST", -36000),
];

/// An instant that may be unset.
///
/// Equality compares instants, so `2025-01-15T06:30:25-08:00` equals
/// `2025-01-15T14:30:25Z`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Timestamp(Option<DateTime<FixedOffset>>);

impl Timestamp {
    /// The unset timestamp.
    pub const ZERO: Timestamp = Timestamp(None);

    pub fn new(instant: DateTime<FixedOffset>) -> Self {
        Self(Some(instant))
    }

    /// Builds a UTC timestamp from seconds since the Unix epoch.
    pub fn from_unix(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(|dt| Self::new(dt.fixed_offset()))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_none()
    }

    pub fn instant(&self) -> Option<DateTime<FixedOffset>> {
        self.0
    }

    /// Seconds since the Unix epoch, if set.
    pub fn unix(&self) -> Option<i64> {
        self.0.map(|dt| dt.timestamp())
    }

    /// RFC 3339 text, `Z` for a zero offset.
    pub fn to_rfc3339(&self) -> String {
        match self.0 {
            Some(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            None => ZERO_TIMESTAMP.to_string(),
        }
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(instant: DateTime<FixedOffset>) -> Self {
        Self::new(instant)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TimestampVisitor;

        impl Visitor<'_> for TimestampVisitor {
            type Value = Timestamp;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an RFC 3339 timestamp string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Timestamp, E> {
                if value == ZERO_TIMESTAMP {
                    return Ok(Timestamp::ZERO);
                }
                DateTime::parse_from_rfc3339(value)
                    .map(Timestamp::new)
                    .map_err(E::custom)
            }
        }

        deserializer.deserialize_str(TimestampVisitor)
    }
}

/// Tries each layout in order and returns the first successful parse.
///
/// # Examples
///
/// ```
/// use term_json_core::{Layout, parse_first};
///
/// let ts = parse_first("2023-01-15 14:30", &[Layout::Naive("%Y-%m-%d %H:%M")]).unwrap();
/// assert_eq!(ts.to_rfc3339(), "2023-01-15T14:30:00Z");
/// assert!(parse_first("yesterday", &[Layout::Naive("%Y-%m-%d %H:%M")]).is_none());
/// ```
pub fn parse_first(raw: &str, layouts: &[Layout]) -> Option<Timestamp> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    layouts.iter().find_map(|layout| parse_layout(raw, *layout))
}

fn parse_layout(raw: &str, layout: Layout) -> Option<Timestamp> {
    match layout {
        Layout::Zoned(fmt) => DateTime::parse_from_str(raw, fmt).ok().map(Timestamp::new),
        Layout::Naive(fmt) => NaiveDateTime::parse_from_str(raw, fmt).ok().map(naive_utc),
        Layout::NoYear(fmt) => {
            let year = Utc::now().year();
            let with_year = format!("{year} {raw}");
            let fmt = format!("%Y {fmt}");
            NaiveDateTime::parse_from_str(&with_year, &fmt)
                .ok()
                .map(naive_utc)
        }
        Layout::DateOnly(fmt) => NaiveDate::parse_from_str(raw, fmt)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(naive_utc),
    }
}

fn naive_utc(naive: NaiveDateTime) -> Timestamp {
    Timestamp::new(naive.and_utc().fixed_offset())
}

/// Resolves a timezone abbreviation such as `PST` to its fixed offset.
pub fn zone_offset(abbrev: &str) -> Option<FixedOffset> {
    ZONE_ABBREVIATIONS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(abbrev))
        .and_then(|(_, secs)| FixedOffset::east_opt(*secs))
}

/// Interprets a naive local time in the zone named by `abbrev`, falling back
/// to UTC for unknown abbreviations.
pub fn in_zone(naive: NaiveDateTime, abbrev: &str) -> Option<Timestamp> {
    let offset = zone_offset(abbrev).or_else(|| FixedOffset::east_opt(0))?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(Timestamp::new)
}
