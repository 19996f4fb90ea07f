//! Turns the text output of common Unix commands into structured records.
//!
//! Each supported command (`ps`, `df`, `netstat`, `dig`, `systemctl`, ...)
//! has a stateless parser registered under the command's name. Parsing
//! yields a [`ParseOutput`]: a single [`Record`] for commands that describe
//! one thing (`uname`, `free`, `dig`) or a list for line-per-item commands
//! (`ls`, `ps`, `mount`). Records serialize with serde, so any serde format
//! works; [`format_output`] covers the JSON and YAML the CLI prints.
//!
//! # Main entry points
//!
//! - [`parse`] parses input with the parser registered under a name.
//! - [`lookup`] and [`parsers`] give access to the registry itself.
//! - The typed parsers in [`commands`] expose their records directly, e.g.
//!   [`commands::DfParser::parse_entries`].
//!
//! # Example
//!
//! ```
//! use term_json_parsers::{OutputFormat, OutputStyle, format_output, parse};
//!
//! let df = "\
//! Filesystem     1K-blocks    Used Available Use% Mounted on
//! /dev/sda1       20971520 8388608  12582912  40% /";
//!
//! let output = parse("df", df).unwrap();
//! assert_eq!(output.len(), 1);
//!
//! let json = format_output(&output, OutputFormat::Json, OutputStyle::Compact).unwrap();
//! assert!(json.contains(r#""size_bytes":21474836480"#));
//! ```
//!
//! # Errors
//!
//! Parsing fails only when the input is blank, when a header-dependent
//! command (`free`, `w`) gets too few lines, or when the parser name is not
//! registered. Lines a parser doesn't understand are skipped, and values it
//! can't convert are left at zero.

pub mod commands;
pub mod output;
pub mod record;
pub mod registry;

pub use output::{OutputError, OutputFormat, OutputStyle, format_output};
pub use record::{ParseOutput, Record};
pub use registry::{Category, CommandParser, lookup, parse, parsers, suggest};
pub use term_json_core::{ParseError, Result, Timestamp};
