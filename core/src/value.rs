//! Best-effort value conversion and serde skip predicates.
//!
//! Parsers never fail on a malformed number. The helpers here return
//! `Option`, and call sites write `.unwrap_or_default()` so the zero
//! fallback is visible where it happens.

use std::str::FromStr;

/// Parses a signed or unsigned integer, ignoring surrounding whitespace.
///
/// # Examples
///
/// ```
/// use term_json_core::parse_int;
///
/// assert_eq!(parse_int::<i64>("20511312"), Some(20511312));
/// assert_eq!(parse_int::<u32>("-"), None);
/// ```
pub fn parse_int<T: FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

/// Parses a floating point value, ignoring surrounding whitespace.
pub fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse().ok()
}

/// Parses a percentage such as `"42%"` into its integer value.
pub fn parse_percent(raw: &str) -> Option<i64> {
    parse_int(raw.trim().trim_end_matches('%'))
}

/// Returns `true` when the value equals its type's default.
///
/// Used as `#[serde(skip_serializing_if = "is_zero")]` on fields the output
/// format marks as omissible.
pub fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Returns `true` for `false`; pairs with [`is_zero`] for readability on
/// boolean flags.
pub fn is_false(value: &bool) -> bool {
    !*value
}
