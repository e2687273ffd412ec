//! Change descriptors, change sets and structured text deltas.
//!
//! A [`ChangeSpec`] replaces one character range of a document version. A [`ChangeSet`] is an
//! ordered, non-overlapping list of such changes, all expressed against the **same** version,
//! so that several selection ranges can be edited in one atomic update without any of them
//! observing another's edit.
//!
//! Applying a change set also yields a [`TextDelta`]: the structured, incremental form that
//! downstream consumers (parsers, indexers) use instead of diffing old and new text.

use crate::document::Document;
use thiserror::Error;

/// A single edit: replace `from..to` with `insert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSpec {
    /// Start character offset.
    pub from: usize,
    /// End character offset (exclusive).
    pub to: usize,
    /// Inserted text.
    pub insert: String,
}

impl ChangeSpec {
    /// Create a change.
    pub fn new(from: usize, to: usize, insert: impl Into<String>) -> Self {
        Self {
            from,
            to,
            insert: insert.into(),
        }
    }

    /// A pure insertion at `pos`.
    pub fn insert(pos: usize, insert: impl Into<String>) -> Self {
        Self::new(pos, pos, insert)
    }

    /// Length of `insert` in characters.
    pub fn inserted_len(&self) -> usize {
        self.insert.chars().count()
    }

    /// Length of the replaced range in characters.
    pub fn deleted_len(&self) -> usize {
        self.to - self.from
    }
}

/// Errors raised when a change set does not fit the document it targets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChangeError {
    /// A change ends past the end of the document.
    #[error("change {from}..{to} is out of bounds for a document of {len} chars")]
    OutOfBounds {
        /// Start offset.
        from: usize,
        /// End offset.
        to: usize,
        /// Document length in chars.
        len: usize,
    },
    /// A change has `from > to`.
    #[error("change {from}..{to} is inverted")]
    Inverted {
        /// Start offset.
        from: usize,
        /// End offset.
        to: usize,
    },
    /// Two changes replace overlapping ranges.
    #[error("change starting at {from} overlaps the previous change ending at {previous_to}")]
    Overlapping {
        /// Start offset of the later change.
        from: usize,
        /// End offset of the earlier change.
        previous_to: usize,
    },
    /// The change set was built for a document of a different length.
    #[error("change set expects a document of {expected} chars, got {actual}")]
    LengthMismatch {
        /// Length the set was validated against.
        expected: usize,
        /// Length of the document it was applied to.
        actual: usize,
    },
}

/// Which side of an insertion a mapped position sticks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    /// Stay before text inserted at the position.
    Before,
    /// Move past text inserted at the position.
    After,
}

/// An ordered, validated set of non-overlapping changes against one document version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<ChangeSpec>,
    len_before: usize,
}

impl ChangeSet {
    /// Validate `changes` against a document of `len_before` characters.
    ///
    /// Changes are sorted by start offset (stable, so insertions at the same offset keep their
    /// order). Ranges may touch but not overlap.
    pub fn new(len_before: usize, mut changes: Vec<ChangeSpec>) -> Result<Self, ChangeError> {
        changes.sort_by_key(|c| c.from);

        let mut previous_to = 0;
        for change in &changes {
            if change.from > change.to {
                return Err(ChangeError::Inverted {
                    from: change.from,
                    to: change.to,
                });
            }
            if change.to > len_before {
                return Err(ChangeError::OutOfBounds {
                    from: change.from,
                    to: change.to,
                    len: len_before,
                });
            }
            if change.from < previous_to {
                return Err(ChangeError::Overlapping {
                    from: change.from,
                    previous_to,
                });
            }
            previous_to = change.to;
        }

        Ok(Self {
            changes,
            len_before,
        })
    }

    /// A change set with no changes.
    pub fn empty(len_before: usize) -> Self {
        Self {
            changes: Vec::new(),
            len_before,
        }
    }

    /// Replace the whole document of `len_before` characters with `insert`.
    pub fn replace_all(len_before: usize, insert: impl Into<String>) -> Self {
        Self {
            changes: vec![ChangeSpec::new(0, len_before, insert)],
            len_before,
        }
    }

    /// The changes, ordered by start offset.
    pub fn changes(&self) -> &[ChangeSpec] {
        &self.changes
    }

    /// Returns `true` if the set contains no changes.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Document length this set was validated against.
    pub fn len_before(&self) -> usize {
        self.len_before
    }

    /// Document length after applying this set.
    pub fn len_after(&self) -> usize {
        self.changes.iter().fold(self.len_before, |len, c| {
            len - c.deleted_len() + c.inserted_len()
        })
    }

    /// Map a pre-edit offset to the post-edit document.
    ///
    /// A position strictly inside a replaced range, or exactly at a pure insertion, goes to the
    /// side given by `assoc`. The start of a replaced range stays at the start of its
    /// replacement, the end moves to the end of it.
    pub fn map_pos(&self, pos: usize, assoc: Assoc) -> usize {
        let mut shift: isize = 0;
        for change in &self.changes {
            if change.from > pos {
                break;
            }
            let start = (change.from as isize + shift) as usize;
            let inserted = change.inserted_len();
            if pos <= change.to {
                let after = if change.from == change.to {
                    assoc == Assoc::After
                } else if pos == change.from {
                    false
                } else if pos == change.to {
                    true
                } else {
                    assoc == Assoc::After
                };
                return if after { start + inserted } else { start };
            }
            shift += inserted as isize - change.deleted_len() as isize;
        }
        (pos as isize + shift) as usize
    }

    /// Apply to `doc`, producing the next version and the structured delta.
    pub fn apply(&self, doc: &Document) -> Result<(Document, TextDelta), ChangeError> {
        if doc.len_chars() != self.len_before {
            return Err(ChangeError::LengthMismatch {
                expected: self.len_before,
                actual: doc.len_chars(),
            });
        }

        // Descending order keeps the remaining (earlier) offsets valid while replacing.
        let mut next = doc.clone();
        let mut edits = Vec::with_capacity(self.changes.len());
        for change in self.changes.iter().rev() {
            edits.push(TextDeltaEdit {
                start: change.from,
                deleted_text: doc.slice(change.from, change.to),
                inserted_text: change.insert.clone(),
            });
            next = next.replaced(change.from, change.to, &change.insert);
        }

        let delta = TextDelta {
            before_char_count: self.len_before,
            after_char_count: next.len_chars(),
            edits,
        };
        Ok((next, delta))
    }
}

/// A single text edit expressed in character offsets.
///
/// `start` is valid in the document **at the time this edit is applied**; edits inside a
/// [`TextDelta`] are applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDeltaEdit {
    /// Start character offset of the edit.
    pub start: usize,
    /// Exact deleted text (may be empty).
    pub deleted_text: String,
    /// Exact inserted text (may be empty).
    pub inserted_text: String,
}

impl TextDeltaEdit {
    /// Length of `deleted_text` in characters.
    pub fn deleted_len(&self) -> usize {
        self.deleted_text.chars().count()
    }

    /// Length of `inserted_text` in characters.
    pub fn inserted_len(&self) -> usize {
        self.inserted_text.chars().count()
    }
}

/// A structured description of a document text change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDelta {
    /// Character count before applying `edits`.
    pub before_char_count: usize,
    /// Character count after applying `edits`.
    pub after_char_count: usize,
    /// Ordered list of edits (descending start offsets).
    pub edits: Vec<TextDeltaEdit>,
}

impl TextDelta {
    /// Returns `true` if this delta contains no edits.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}
