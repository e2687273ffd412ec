//! Editor configuration.
//!
//! [`EditorConfig`] gathers the knobs the prose widget exposes. It deserializes from JSON with
//! every field optional, so hosts only spell out what they change:
//!
//! ```rust
//! use pure_editor::EditorConfig;
//!
//! let config = EditorConfig::from_json_str(r#"{ "tab_size": 2, "read_only": true }"#).unwrap();
//! assert_eq!(config.tab_size, 2);
//! assert_eq!(config.indent_value, "\u{3000}\u{3000}");
//! ```

use crate::state::{DEFAULT_LEADING_RECLAIM_LIMIT, DEFAULT_TAB_SIZE};
use pure_editor_lang::FULL_WIDTH_DOUBLE_SPACE;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Indent value used when indentation is switched back on.
pub const DEFAULT_REENABLED_INDENT: &str = "      ";

/// Errors raised while loading an [`EditorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input is not valid JSON for this config.
    #[error("invalid editor config: {0}")]
    Json(#[from] serde_json::Error),
    /// A field holds a value the editor cannot work with.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Configuration of a [`PureEditor`](crate::PureEditor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Indent value: prefixed by typesetting, written by clearing, and used as the indent unit.
    pub indent_value: String,
    /// Whether indentation starts enabled. When disabled the indent value is empty.
    pub indent_enabled: bool,
    /// Indent value restored when indentation is toggled back on.
    pub reenabled_indent: String,
    /// Marker a line break carries over when the current line contains it.
    pub line_marker: String,
    /// Tab size in columns.
    pub tab_size: usize,
    /// A line break replaces a whitespace-only prefix only within this many characters of the
    /// line start.
    pub leading_reclaim_limit: usize,
    /// Whether the document is read-only.
    pub read_only: bool,
    /// Whether the view soft-wraps long lines.
    pub line_wrapping: bool,
    /// Whether the find/replace panel sits above the content.
    pub search_panel_top: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            indent_value: FULL_WIDTH_DOUBLE_SPACE.to_string(),
            indent_enabled: true,
            reenabled_indent: DEFAULT_REENABLED_INDENT.to_string(),
            line_marker: FULL_WIDTH_DOUBLE_SPACE.to_string(),
            tab_size: DEFAULT_TAB_SIZE,
            leading_reclaim_limit: DEFAULT_LEADING_RECLAIM_LIMIT,
            read_only: false,
            line_wrapping: true,
            search_panel_top: true,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tab_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tab_size",
                reason: "must be at least 1",
            });
        }
        if self.indent_value.chars().any(|c| !c.is_whitespace()) {
            return Err(ConfigError::InvalidValue {
                field: "indent_value",
                reason: "must consist of whitespace",
            });
        }
        if self.reenabled_indent.chars().any(|c| !c.is_whitespace()) {
            return Err(ConfigError::InvalidValue {
                field: "reenabled_indent",
                reason: "must consist of whitespace",
            });
        }
        Ok(())
    }

    /// The indent value in effect: empty while indentation is disabled.
    pub fn current_indent_value(&self) -> &str {
        if self.indent_enabled {
            &self.indent_value
        } else {
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_prose_widget() {
        let config = EditorConfig::default();
        assert_eq!(config.current_indent_value(), "\u{3000}\u{3000}");
        assert_eq!(config.reenabled_indent.len(), 6);
        assert_eq!(config.leading_reclaim_limit, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = EditorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn zero_tab_size_is_rejected() {
        let err = EditorConfig::from_json_str(r#"{"tab_size":0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "tab_size",
                ..
            }
        ));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(
            EditorConfig::from_json_str("{"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn disabled_indent_reads_as_empty() {
        let config = EditorConfig {
            indent_enabled: false,
            ..EditorConfig::default()
        };
        assert_eq!(config.current_indent_value(), "");
    }
}
