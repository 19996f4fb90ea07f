//! Shared building blocks for the command-output parsers.
//!
//! This crate holds the pieces every parser in `term-json-parsers` leans on:
//!
//! - [`split_lines`] / [`split_fields`] split input into trimmed non-empty
//!   lines and whitespace-separated fields.
//! - [`parse_int`], [`parse_float`], [`parse_percent`] give best-effort numeric
//!   conversion returning `Option`, so the zero fallback is explicit at the
//!   call site.
//! - [`is_zero`] / [`is_false`] are serde skip predicates for omissible
//!   output fields.
//! - [`Timestamp`] and [`parse_first`] provide a zero-able instant and ordered
//!   layout matching for the date-bearing commands.
//! - [`ParseError`] names the three hard failures (empty input, missing header
//!   lines, unknown parser name).
//!
//! # Example
//!
//! ```
//! use term_json_core::*;
//!
//! let text = "Filesystem 1K-blocks Used Available Use% Mounted on\n/dev/sda1 100 40 60 40% /\n";
//! let lines = split_lines(text);
//! let fields = split_fields(lines[1]);
//! assert_eq!(parse_int::<i64>(fields[1]).unwrap_or_default() * 1024, 102400);
//! assert_eq!(parse_percent(fields[4]), Some(40));
//! assert!(ensure_input("  ").is_err());
//! ```

mod error;
mod text;
mod timestamp;
mod value;

pub use error::{ParseError, Result, ensure_input};
pub use text::{field_or_empty, join_from, split_fields, split_lines};
pub use timestamp::{
    LISTING_LAYOUTS, LOGIN_LAYOUTS, Layout, STAT_LAYOUTS, Timestamp, ZERO_TIMESTAMP, in_zone,
    parse_first, zone_offset,
};
pub use value::{is_false, is_zero, parse_float, parse_int, parse_percent};
