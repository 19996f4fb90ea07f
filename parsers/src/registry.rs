//! Parser trait and the static name → parser table.

use std::fmt;

use serde::Serialize;
use term_json_core::{ParseError, Result};
use tracing::debug;

use crate::commands::{
    ArpParser, DateParser, DfParser, DigParser, DuParser, EnvParser, FindParser, FreeParser,
    HostsParser, IdParser, LsParser, LsblkParser, MountParser, NetstatParser, PasswdParser,
    PingParser, PsParser, StatParser, SystemctlParser, UnameParser, UptimeParser, VmstatParser,
    WParser, WcParser, WhoParser,
};
use crate::record::ParseOutput;

/// Converts the output of one Unix command into records.
///
/// Implementations are stateless unit structs, so a single instance serves
/// every call and can be shared across threads.
pub trait CommandParser: Send + Sync {
    /// Command name used as the dispatch key (e.g. `"df"`).
    fn name(&self) -> &'static str;
    /// Grouping shown in parser listings.
    fn category(&self) -> Category;
    /// Parses raw command output.
    ///
    /// Fails only on empty input (and, for header-dependent commands, on
    /// too few lines). Malformed lines are skipped.
    fn parse(&self, input: &str) -> Result<ParseOutput>;
}

/// Parser grouping, in listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    System,
    Process,
    Network,
    Files,
    Services,
    Utilities,
    Config,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::System,
        Category::Process,
        Category::Network,
        Category::Files,
        Category::Services,
        Category::Utilities,
        Category::Config,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::System => "System",
            Self::Process => "Process",
            Self::Network => "Network",
            Self::Files => "Files",
            Self::Services => "Services",
            Self::Utilities => "Utilities",
            Self::Config => "Config",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

static PARSERS: &[&dyn CommandParser] = &[
    &UnameParser,
    &UptimeParser,
    &WhoParser,
    &WParser,
    &IdParser,
    &EnvParser,
    &PsParser,
    &FreeParser,
    &VmstatParser,
    &PingParser,
    &NetstatParser,
    &ArpParser,
    &DigParser,
    &LsParser,
    &DfParser,
    &DuParser,
    &MountParser,
    &LsblkParser,
    &FindParser,
    &StatParser,
    &SystemctlParser,
    &DateParser,
    &WcParser,
    &HostsParser,
    &PasswdParser,
];

/// Maximum edit distance for a "did you mean" suggestion.
const SUGGESTION_DISTANCE: usize = 2;

/// Every registered parser, grouped by category in listing order.
pub fn parsers() -> &'static [&'static dyn CommandParser] {
    PARSERS
}

/// Returns the parser registered under `name`.
pub fn lookup(name: &str) -> Option<&'static dyn CommandParser> {
    PARSERS.iter().copied().find(|parser| parser.name() == name)
}

/// Parses `input` with the parser registered under `name`.
///
/// # Errors
///
/// Returns [`ParseError::UnknownParser`] when `name` is not registered,
/// otherwise whatever the selected parser reports.
///
/// # Examples
///
/// ```
/// use term_json_parsers::{ParseOutput, parse};
///
/// let out = parse("env", "HOME=/root\nPATH=/usr/bin:/bin").unwrap();
/// assert!(matches!(out, ParseOutput::Many(ref records) if records.len() == 2));
/// assert!(parse("kubectl", "anything").is_err());
/// ```
pub fn parse(name: &str, input: &str) -> Result<ParseOutput> {
    let Some(parser) = lookup(name) else {
        return Err(ParseError::UnknownParser {
            name: name.to_string(),
            suggestion: suggest(name),
        });
    };
    debug!(parser = parser.name(), bytes = input.len(), "Dispatching parse");
    parser.parse(input)
}

/// Closest registered name within [`SUGGESTION_DISTANCE`] edits, if any.
pub fn suggest(name: &str) -> Option<&'static str> {
    PARSERS
        .iter()
        .map(|parser| (parser.name(), strsim::levenshtein(name, parser.name())))
        .filter(|(_, distance)| *distance <= SUGGESTION_DISTANCE)
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}
