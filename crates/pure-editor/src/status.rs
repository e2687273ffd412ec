//! Status-bar summary.

use crate::state::EditorState;
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// What the bottom status bar shows: caret position and document counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusInfo {
    /// One-based line number of the main caret.
    pub line: usize,
    /// Caret column in characters from the line start.
    pub column: usize,
    /// Caret column in terminal cells (CJK characters are two cells wide).
    pub display_column: usize,
    /// Character count of the document (符), in Unicode scalar values.
    ///
    /// A browser counts UTF-16 code units instead, so an emoji or an astral-plane ideograph
    /// counts once here but twice there.
    pub chars: usize,
    /// Non-whitespace grapheme count of the document (字).
    ///
    /// Counted in grapheme clusters: a combined emoji or a base character with combining
    /// marks is one 字, where a UTF-16 count would give several.
    pub words: usize,
}

impl StatusInfo {
    /// Summarize `state`.
    pub fn of(state: &EditorState) -> Self {
        let doc = state.doc();
        let head = state.selection().main().head;
        let line = doc.line_at(head);
        let before: String = line.text.chars().take(head - line.from).collect();
        let text = doc.to_string();
        let words = text
            .graphemes(true)
            .filter(|g| !g.chars().all(char::is_whitespace))
            .count();

        Self {
            line: line.number,
            column: head - line.from,
            display_column: before.width(),
            chars: doc.len_chars(),
            words,
        }
    }

    /// Markup for an HTML status bar.
    pub fn to_html(&self) -> String {
        format!(
            "<span>{}</span>:<span>{}</span>&emsp;<span>{} 符</span>&emsp;<span>{} 字</span>",
            self.line, self.column, self.chars, self.words
        )
    }
}

impl fmt::Display for StatusInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}  {} 符  {} 字",
            self.line, self.column, self.chars, self.words
        )
    }
}
