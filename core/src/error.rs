//! Error types for command-output parsing.
//!
//! Only three conditions abort a parse. Everything else (a line that doesn't
//! match, a number that won't parse, a date in an unknown format) is a soft
//! failure and shows up as a skipped record or a zero-valued field.

use thiserror::Error;

/// Errors that can occur while parsing command output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input was empty or contained only whitespace.
    #[error("empty input")]
    EmptyInput,

    /// Input has fewer lines than the command's fixed header requires.
    #[error("insufficient lines in {command} output: expected at least {expected}, got {actual}")]
    InsufficientData {
        command: &'static str,
        expected: usize,
        actual: usize,
    },

    /// No parser is registered under the requested name.
    #[error("unknown parser: {name}{}", suggestion_suffix(.suggestion))]
    UnknownParser {
        name: String,
        suggestion: Option<&'static str>,
    },
}

fn suggestion_suffix(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean '{name}'?)"),
        None => String::new(),
    }
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;

/// Returns the trimmed input, or [`ParseError::EmptyInput`] when nothing is
/// left after trimming.
///
/// # Examples
///
/// ```
/// use term_json_core::{ParseError, ensure_input};
///
/// assert_eq!(ensure_input("  up 3 days \n").unwrap(), "up 3 days");
/// assert_eq!(ensure_input(" \t\n"), Err(ParseError::EmptyInput));
/// ```
pub fn ensure_input(input: &str) -> Result<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_parser_message_with_suggestion() {
        let err = ParseError::UnknownParser {
            name: "dff".to_string(),
            suggestion: Some("df"),
        };
        assert_eq!(err.to_string(), "unknown parser: dff (did you mean 'df'?)");
    }

    #[test]
    fn test_unknown_parser_message_without_suggestion() {
        let err = ParseError::UnknownParser {
            name: "kubectl".to_string(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "unknown parser: kubectl");
    }

    #[test]
    fn test_insufficient_data_message() {
        let err = ParseError::InsufficientData {
            command: "free",
            expected: 2,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "insufficient lines in free output: expected at least 2, got 1"
        );
    }
}
