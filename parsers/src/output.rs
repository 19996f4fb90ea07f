//! Output formatting for parse results.

use serde::Serialize;
use thiserror::Error;

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// JSON layout. Ignored for YAML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputStyle {
    /// Two-space indented.
    #[default]
    Pretty,
    /// Single line.
    Compact,
}

/// Serialization failures.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Formats any serializable result in the requested format.
///
/// # Examples
///
/// ```
/// use term_json_parsers::output::{OutputFormat, OutputStyle, format_output};
/// use term_json_parsers::parse;
///
/// let out = parse("id", "uid=0(root) gid=0(root) groups=0(root)").unwrap();
/// let text = format_output(&out, OutputFormat::Json, OutputStyle::Pretty).unwrap();
/// assert!(text.starts_with("{\n  \"uid\": 0,"));
/// ```
pub fn format_output<T: Serialize + ?Sized>(
    value: &T,
    format: OutputFormat,
    style: OutputStyle,
) -> Result<String, OutputError> {
    match (format, style) {
        (OutputFormat::Json, OutputStyle::Pretty) => Ok(serde_json::to_string_pretty(value)?),
        (OutputFormat::Json, OutputStyle::Compact) => Ok(serde_json::to_string(value)?),
        (OutputFormat::Yaml, _) => Ok(serde_yaml::to_string(value)?),
    }
}
