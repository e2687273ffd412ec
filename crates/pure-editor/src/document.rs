//! Immutable document text.
//!
//! A [`Document`] is one version of the edited text. It is backed by a [`ropey::Rope`], so
//! cloning is cheap and every transaction produces a new version instead of mutating the old
//! one in place.
//!
//! All offsets are **character offsets** (Unicode scalar values). Lines are separated by LF
//! only: CRLF and lone CR are normalized on construction, and other Unicode separators
//! (U+2028, U+0085, ...) are ordinary characters.

use ropey::Rope;
use std::borrow::Cow;
use std::fmt;

/// Normalize CRLF and lone CR to LF.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// A single logical line of a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// One-based line number.
    pub number: usize,
    /// Character offset of the first character of the line.
    pub from: usize,
    /// Character offset just past the last character of the line (excluding the newline).
    pub to: usize,
    /// Line text without the trailing newline.
    pub text: String,
}

impl Line {
    /// Length of the line in characters.
    pub fn len(&self) -> usize {
        self.to - self.from
    }

    /// Returns `true` for an empty line.
    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// Leading whitespace of the line (every char for which `char::is_whitespace` holds).
    pub fn leading_whitespace(&self) -> &str {
        let end = self
            .text
            .char_indices()
            .find(|(_, ch)| !ch.is_whitespace())
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len());
        &self.text[..end]
    }
}

/// One immutable version of the document text.
#[derive(Clone, Default)]
pub struct Document {
    rope: Rope,
}

impl Document {
    /// Build a document from text, normalizing line endings to LF.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(&normalize_line_endings(text)),
        }
    }

    /// Total character count.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Total UTF-8 byte count.
    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Returns `true` for an empty document.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Number of logical lines (an empty document has one line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// The line containing `offset` (clamped to the document).
    pub fn line_at(&self, offset: usize) -> Line {
        let offset = offset.min(self.rope.len_chars());
        let idx = self.rope.char_to_line(offset);
        self.line_by_index(idx)
    }

    /// The line with the given one-based number.
    pub fn line(&self, number: usize) -> Option<Line> {
        if number == 0 || number > self.rope.len_lines() {
            return None;
        }
        Some(self.line_by_index(number - 1))
    }

    fn line_by_index(&self, idx: usize) -> Line {
        let from = self.rope.line_to_char(idx);
        let mut text = self.rope.line(idx).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        let to = from + text.chars().count();
        Line {
            number: idx + 1,
            from,
            to,
            text,
        }
    }

    /// Iterate line texts (without newlines).
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.rope.lines().map(|line| {
            let mut text = line.to_string();
            if text.ends_with('\n') {
                text.pop();
            }
            text
        })
    }

    /// Text between two character offsets (clamped, order-insensitive).
    pub fn slice(&self, from: usize, to: usize) -> String {
        let len = self.rope.len_chars();
        let (from, to) = (from.min(to).min(len), from.max(to).min(len));
        self.rope.slice(from..to).to_string()
    }

    /// The character at `offset`, if any.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        (offset < self.rope.len_chars()).then(|| self.rope.char(offset))
    }

    /// Convert a character offset to a UTF-8 byte offset (clamped).
    pub fn char_to_byte(&self, char_offset: usize) -> usize {
        self.rope
            .char_to_byte(char_offset.min(self.rope.len_chars()))
    }

    /// Convert a UTF-8 byte offset to a character offset (clamped).
    pub fn byte_to_char(&self, byte_offset: usize) -> usize {
        self.rope
            .byte_to_char(byte_offset.min(self.rope.len_bytes()))
    }

    /// A new version with `from..to` replaced by `insert`.
    ///
    /// Offsets must already be validated against this version.
    pub(crate) fn replaced(&self, from: usize, to: usize, insert: &str) -> Self {
        let mut rope = self.rope.clone();
        if from < to {
            rope.remove(from..to);
        }
        if !insert.is_empty() {
            rope.insert(from, insert);
        }
        Self { rope }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Document").field(&self.to_string()).finish()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.rope == other.rope
    }
}

impl Eq for Document {}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_has_one_empty_line() {
        let doc = Document::default();
        assert_eq!(doc.line_count(), 1);
        let line = doc.line_at(0);
        assert_eq!(line.number, 1);
        assert!(line.is_empty());
    }

    #[test]
    fn line_at_reports_char_offsets() {
        let doc = Document::new("\u{3000}\u{3000}春眠\nabc");
        let first = doc.line_at(3);
        assert_eq!((first.number, first.from, first.to), (1, 0, 4));
        let second = doc.line_at(5);
        assert_eq!((second.number, second.from, second.to), (2, 5, 8));
        assert_eq!(second.text, "abc");
    }

    #[test]
    fn offset_at_newline_belongs_to_its_line() {
        let doc = Document::new("ab\ncd");
        assert_eq!(doc.line_at(2).number, 1);
        assert_eq!(doc.line_at(3).number, 2);
    }

    #[test]
    fn crlf_is_normalized() {
        let doc = Document::new("a\r\nb");
        assert_eq!(doc.to_string(), "a\nb");
        assert_eq!(doc.line(2).map(|l| l.text), Some("b".to_string()));
    }

    #[test]
    fn leading_whitespace_includes_ideographic_space() {
        let doc = Document::new(" \u{3000}\tx ");
        assert_eq!(doc.line_at(0).leading_whitespace(), " \u{3000}\t");
    }

    #[test]
    fn lone_cr_becomes_a_line_break() {
        let doc = Document::new("ab\rcd");
        assert_eq!(doc.to_string(), "ab\ncd");
        let first = doc.line_at(0);
        assert_eq!((first.text.as_str(), first.to), ("ab", 2));
        assert_eq!(doc.line_count(), 2);
    }

    #[test]
    fn unicode_separators_do_not_split_lines() {
        for sep in ['\u{2028}', '\u{2029}', '\u{85}', '\u{b}', '\u{c}'] {
            let doc = Document::new(&format!("ab{sep}cd"));
            assert_eq!(doc.line_count(), 1);
            assert_eq!(doc.line_at(0).to, 5);
            assert_eq!(doc.lines().count(), 1);
        }
    }

    #[test]
    fn byte_and_char_offsets_convert() {
        let doc = Document::new("x\n春a");
        assert_eq!(doc.char_to_byte(3), 5);
        assert_eq!(doc.byte_to_char(5), 3);
    }
}
