//! Multi-range selections.
//!
//! A selection is a non-empty set of [`SelectionRange`]s plus the index of the main range.
//! Ranges are kept sorted and non-overlapping: [`EditorSelection::create`] merges overlapping
//! ranges and drops exact duplicates, the same canonical form whichever order the host
//! supplied them in.

/// One selection range, in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    /// The fixed end of the range.
    pub anchor: usize,
    /// The moving end of the range (where the caret is drawn).
    pub head: usize,
}

impl SelectionRange {
    /// Create a range from anchor and head.
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// A zero-width range.
    pub fn cursor(pos: usize) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    /// Lower end of the range.
    pub fn from(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// Upper end of the range.
    pub fn to(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// Returns `true` for a zero-width range.
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    fn clamped(self, len: usize) -> Self {
        Self {
            anchor: self.anchor.min(len),
            head: self.head.min(len),
        }
    }
}

/// A non-empty, normalized set of selection ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSelection {
    ranges: Vec<SelectionRange>,
    main_index: usize,
}

impl EditorSelection {
    /// A selection with a single cursor.
    pub fn cursor(pos: usize) -> Self {
        Self::single(SelectionRange::cursor(pos))
    }

    /// A selection with a single range.
    pub fn single(range: SelectionRange) -> Self {
        Self {
            ranges: vec![range],
            main_index: 0,
        }
    }

    /// Build a normalized selection. An empty input yields a cursor at offset 0.
    ///
    /// The main range is the merged range that contains the head of `ranges[main_index]`.
    pub fn create(ranges: Vec<SelectionRange>, main_index: usize) -> Self {
        let Some(main_head) = ranges
            .get(main_index)
            .or_else(|| ranges.first())
            .map(|r| r.head)
        else {
            return Self::cursor(0);
        };

        let mut sorted = ranges;
        sorted.sort_by(|a, b| {
            a.from()
                .cmp(&b.from())
                .then_with(|| a.to().cmp(&b.to()))
                .then_with(|| a.head.cmp(&b.head))
        });

        // Merge overlapping ranges. Ranges that merely touch stay separate, except cursors,
        // which collapse when equal.
        let mut merged: Vec<SelectionRange> = Vec::with_capacity(sorted.len());
        for range in sorted {
            match merged.last_mut() {
                Some(last) if range.from() < last.to() => {
                    *last = SelectionRange::new(last.from(), last.to().max(range.to()));
                }
                Some(last) if range.from() == last.from() && range.to() == last.to() => {}
                _ => merged.push(range),
            }
        }

        let main_index = merged
            .iter()
            .position(|r| r.from() <= main_head && main_head <= r.to())
            .unwrap_or(merged.len() - 1);

        Self {
            ranges: merged,
            main_index,
        }
    }

    /// All ranges, sorted by position.
    pub fn ranges(&self) -> &[SelectionRange] {
        &self.ranges
    }

    /// The main range.
    pub fn main(&self) -> SelectionRange {
        self.ranges[self.main_index]
    }

    /// Index of the main range in [`EditorSelection::ranges`].
    pub fn main_index(&self) -> usize {
        self.main_index
    }

    /// Clamp every range to a document of `len` characters.
    pub fn clamped(&self, len: usize) -> Self {
        Self::create(
            self.ranges.iter().map(|r| r.clamped(len)).collect(),
            self.main_index,
        )
    }
}

impl Default for EditorSelection {
    fn default() -> Self {
        Self::cursor(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_sorts_and_merges_overlaps() {
        let selection = EditorSelection::create(
            vec![
                SelectionRange::new(8, 10),
                SelectionRange::new(0, 3),
                SelectionRange::new(2, 5),
            ],
            0,
        );
        assert_eq!(
            selection.ranges(),
            &[SelectionRange::new(0, 5), SelectionRange::new(8, 10)]
        );
        assert_eq!(selection.main_index(), 1);
    }

    #[test]
    fn duplicate_cursors_collapse() {
        let selection = EditorSelection::create(
            vec![SelectionRange::cursor(4), SelectionRange::cursor(4)],
            1,
        );
        assert_eq!(selection.ranges(), &[SelectionRange::cursor(4)]);
    }

    #[test]
    fn touching_ranges_stay_separate() {
        let selection = EditorSelection::create(
            vec![SelectionRange::new(0, 2), SelectionRange::cursor(2)],
            0,
        );
        assert_eq!(selection.ranges().len(), 2);
    }

    #[test]
    fn empty_input_is_a_cursor_at_zero() {
        assert_eq!(EditorSelection::create(Vec::new(), 3), EditorSelection::cursor(0));
    }

    #[test]
    fn backward_range_reports_ordered_bounds() {
        let range = SelectionRange::new(7, 3);
        assert_eq!((range.from(), range.to()), (3, 7));
        assert!(!range.is_empty());
    }
}
