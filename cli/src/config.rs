//! Optional YAML settings file.

use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use term_json_parsers::OutputFormat;
use thiserror::Error;

/// Errors from reading a settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Output defaults that command-line flags override.
///
/// ```yaml
/// format: yaml
/// compact: false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    pub format: OutputFormat,
    /// Single-line JSON instead of indented.
    pub compact: bool,
}

impl OutputSettings {
    /// Loads settings from a YAML file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let settings = serde_yaml::from_reader(reader)?;
        Ok(settings)
    }

    /// Applies command-line overrides on top of the loaded values.
    pub fn with_overrides(mut self, format: Option<OutputFormat>, compact: Option<bool>) -> Self {
        if let Some(format) = format {
            self.format = format;
        }
        if let Some(compact) = compact {
            self.compact = compact;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "format: yaml").unwrap();

        let settings = OutputSettings::load(file.path()).unwrap();
        assert_eq!(settings.format, OutputFormat::Yaml);
        assert!(!settings.compact);
    }

    #[test]
    fn test_empty_mapping_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{}}").unwrap();

        let settings = OutputSettings::load(file.path()).unwrap();
        assert_eq!(settings, OutputSettings::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "colour: always").unwrap();

        let err = OutputSettings::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = OutputSettings::load("/nonexistent/term-json.yml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_flags_override_file() {
        let settings = OutputSettings {
            format: OutputFormat::Yaml,
            compact: false,
        }
        .with_overrides(Some(OutputFormat::Json), Some(true));
        assert_eq!(settings.format, OutputFormat::Json);
        assert!(settings.compact);

        let unchanged = OutputSettings::default().with_overrides(None, None);
        assert_eq!(unchanged, OutputSettings::default());
    }

    #[test]
    fn test_flag_turns_compact_off() {
        let settings = OutputSettings {
            format: OutputFormat::Json,
            compact: true,
        };
        assert!(settings.clone().with_overrides(None, None).compact);
        assert!(!settings.with_overrides(None, Some(false)).compact);
    }
}
