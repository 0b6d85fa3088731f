//! Annotation settings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::{ClockMode, Precision};

/// Invalid configuration values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("separator {value:?} cannot contain whitespace")]
    WhitespaceSeparator { value: String },

    #[error("wrap column must be positive")]
    ZeroWrapColumn,
}

/// Settings for one invocation. Built once and passed to every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text that opens an annotation.
    pub marker: String,

    /// Text between the start and end of a range.
    pub separator: String,

    /// Trailing text that continues an annotation on the next line.
    pub continuation: String,

    /// Display column at which annotation lines are split.
    /// `None` disables wrapping.
    pub wrap_column: Option<usize>,

    pub clock: ClockMode,

    pub precision: Precision,

    /// Columns per tab stop when measuring line width.
    pub tab_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker: "time:".to_string(),
            separator: "-".to_string(),
            continuation: "\\".to_string(),
            wrap_column: None,
            clock: ClockMode::default(),
            precision: Precision::default(),
            tab_width: 4,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.marker.trim().is_empty() {
            return Err(ConfigError::Empty { field: "marker" });
        }
        if self.separator.is_empty() {
            return Err(ConfigError::Empty { field: "separator" });
        }
        if self.separator.chars().any(char::is_whitespace) {
            return Err(ConfigError::WhitespaceSeparator {
                value: self.separator.clone(),
            });
        }
        if self.continuation.trim().is_empty() {
            return Err(ConfigError::Empty {
                field: "continuation",
            });
        }
        if self.wrap_column == Some(0) {
            return Err(ConfigError::ZeroWrapColumn);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.marker, "time:");
        assert_eq!(config.separator, "-");
        assert_eq!(config.continuation, "\\");
        assert_eq!(config.wrap_column, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_whitespace_separator() {
        let config = Config {
            separator: "- ".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            r#"separator "- " cannot contain whitespace"#
        );
    }

    #[test]
    fn test_rejects_empty_marker() {
        let config = Config {
            marker: "  ".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Empty { field: "marker" })
        );
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"marker": "worked:", "clock": 12}"#).unwrap();
        assert_eq!(config.marker, "worked:");
        assert_eq!(config.clock, ClockMode::Twelve);
        assert_eq!(config.separator, "-");
        assert_eq!(config.precision, Precision::Minutes);
    }
}
