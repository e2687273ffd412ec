#![warn(missing_docs)]
//! `pure-editor-lang` - data-driven language configuration helpers for `pure-editor`.
//!
//! This crate intentionally stays lightweight and does **not** depend on any parsing system.
//! It provides small structs that hosts can use to configure editor-kernel features in a
//! language-aware way: which tokens open and close a bracket pair, and which marker the
//! prose convention uses to indent a paragraph.

use serde::{Deserialize, Serialize};

/// The full-width double space (`U+3000 U+3000`) used to indent the first line of a
/// Chinese paragraph.
pub const FULL_WIDTH_DOUBLE_SPACE: &str = "\u{3000}\u{3000}";

/// An open/close token pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketPair {
    /// Opening token (e.g. `(`).
    pub open: String,
    /// Closing token (e.g. `)`).
    pub close: String,
}

impl BracketPair {
    /// Create a pair from its two tokens.
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Returns `true` when both tokens are exactly one character long.
    pub fn is_single_char(&self) -> bool {
        self.open.chars().count() == 1 && self.close.chars().count() == 1
    }
}

/// Bracket configuration for a language.
///
/// The pairs double as the "closed-by" relation of a syntax tree: a node whose kind equals
/// `open` is closed by a node whose kind equals `close`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketConfig {
    /// Known bracket pairs, in lookup order.
    pub pairs: Vec<BracketPair>,
}

impl BracketConfig {
    /// An empty configuration (no bracket pairs).
    pub fn empty() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Builder-style helper that appends a pair.
    pub fn with_pair(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.pairs.push(BracketPair::new(open, close));
        self
    }

    /// Token kinds that close `open`.
    pub fn closed_by(&self, open: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|p| p.open == open)
            .map(|p| p.close.as_str())
            .collect()
    }

    /// Returns `true` if `open` followed directly by `close` forms a configured pair.
    pub fn is_pair(&self, open: char, close: char) -> bool {
        self.pairs
            .iter()
            .filter(|p| p.is_single_char())
            .any(|p| p.open.starts_with(open) && p.close.starts_with(close))
    }

    /// Returns `true` if `ch` is the (single-character) opening token of a pair.
    pub fn is_open(&self, ch: char) -> bool {
        self.pairs
            .iter()
            .filter(|p| p.is_single_char())
            .any(|p| p.open.starts_with(ch))
    }
}

impl Default for BracketConfig {
    /// `()`, `[]` and `{}`.
    fn default() -> Self {
        Self::empty()
            .with_pair("(", ")")
            .with_pair("[", "]")
            .with_pair("{", "}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pairs_cover_round_square_and_curly() {
        let config = BracketConfig::default();
        assert!(config.is_pair('(', ')'));
        assert!(config.is_pair('[', ']'));
        assert!(config.is_pair('{', '}'));
        assert!(!config.is_pair('(', ']'));
        assert!(!config.is_pair('<', '>'));
    }

    #[test]
    fn closed_by_lists_every_closer() {
        let config = BracketConfig::default().with_pair("(", "]");
        assert_eq!(config.closed_by("("), vec![")", "]"]);
        assert!(config.closed_by(")").is_empty());
    }

    #[test]
    fn multi_char_tokens_never_match_raw_chars() {
        let config = BracketConfig::empty().with_pair("begin", "end");
        assert!(!config.is_open('b'));
        assert!(!config.is_pair('b', 'e'));
        assert_eq!(config.closed_by("begin"), vec!["end"]);
    }

    #[test]
    fn config_round_trips_through_json() {
        let json = r#"{"pairs":[{"open":"<","close":">"}]}"#;
        let config: BracketConfig = serde_json::from_str(json).unwrap();
        assert!(config.is_pair('<', '>'));
    }

    #[test]
    fn marker_is_two_ideographic_spaces() {
        assert_eq!(FULL_WIDTH_DOUBLE_SPACE.chars().count(), 2);
        assert!(FULL_WIDTH_DOUBLE_SPACE.chars().all(char::is_whitespace));
    }
}
