//! Editor state and transactions.
//!
//! An [`EditorState`] is an immutable snapshot: document, selection and the facets commands
//! read (read-only flag, indent unit, indentation service, syntax provider, bracket pairs).
//! Commands never mutate it. They describe an edit as a [`Transaction`] and hand it to a
//! `dispatch` callback; whoever owns the state applies it with [`EditorState::apply`].
//!
//! # Example
//!
//! ```rust
//! use pure_editor::{EditorSelection, EditorState};
//!
//! let state = EditorState::new("hello").with_selection(EditorSelection::cursor(5));
//! let tr = state.replace_selection(", world").unwrap();
//! let (next, _delta) = state.apply(&tr).unwrap();
//! assert_eq!(next.doc().to_string(), "hello, world");
//! assert_eq!(next.selection().main().head, 12);
//! ```

use crate::config::EditorConfig;
use crate::delta::{Assoc, ChangeError, ChangeSet, ChangeSpec, TextDelta};
use crate::document::Document;
use crate::indent::{FixedIndent, IndentContext, IndentService, NoIndent};
use crate::selection::{EditorSelection, SelectionRange};
use crate::syntax::{SyntaxProvider, SyntaxTree};
use pure_editor_lang::{BracketConfig, FULL_WIDTH_DOUBLE_SPACE};
use std::fmt;
use std::sync::Arc;

/// Default cutoff (in characters from the line start) for replacing a whitespace-only prefix.
pub const DEFAULT_LEADING_RECLAIM_LIMIT: usize = 100;

/// Default tab size.
pub const DEFAULT_TAB_SIZE: usize = 4;

/// The edit one selection range contributes to a [`Transaction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeEdit {
    /// Change against the pre-edit document.
    pub change: ChangeSpec,
    /// Where the cursor lands, in characters from the start of the replacement.
    pub cursor_in_insert: usize,
}

/// A pending update of an [`EditorState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    changes: ChangeSet,
    selection: Option<EditorSelection>,
    scroll_into_view: bool,
    user_event: Option<&'static str>,
}

impl Transaction {
    /// A transaction applying `changes`; the selection is mapped through them.
    pub fn new(changes: ChangeSet) -> Self {
        Self {
            changes,
            selection: None,
            scroll_into_view: false,
            user_event: None,
        }
    }

    /// Set the selection explicitly (in post-edit offsets).
    pub fn with_selection(mut self, selection: EditorSelection) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Ask the view to scroll the main selection into view.
    pub fn scroll_into_view(mut self) -> Self {
        self.scroll_into_view = true;
        self
    }

    /// Tag the transaction with a user event name (e.g. `"input"`, `"input.paste"`).
    pub fn with_user_event(mut self, event: &'static str) -> Self {
        self.user_event = Some(event);
        self
    }

    /// The changes.
    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    /// The explicit post-edit selection, if set.
    pub fn selection(&self) -> Option<&EditorSelection> {
        self.selection.as_ref()
    }

    /// Whether the view should scroll the selection into view.
    pub fn scrolls_into_view(&self) -> bool {
        self.scroll_into_view
    }

    /// The user event tag, if any.
    pub fn user_event(&self) -> Option<&'static str> {
        self.user_event
    }
}

/// Immutable editor state snapshot.
#[derive(Clone)]
pub struct EditorState {
    doc: Document,
    selection: EditorSelection,
    read_only: bool,
    indent_unit: String,
    tab_size: usize,
    indent_marker: String,
    leading_reclaim_limit: usize,
    indent_service: Arc<dyn IndentService>,
    syntax: Option<Arc<dyn SyntaxProvider>>,
    brackets: Arc<BracketConfig>,
}

impl EditorState {
    /// A writable state over `text` with a cursor at offset 0.
    ///
    /// Defaults: two-space indent unit, no indentation service, no syntax provider,
    /// `()[]{}` bracket pairs, and the full-width double space as the carried indent marker.
    pub fn new(text: &str) -> Self {
        Self {
            doc: Document::new(text),
            selection: EditorSelection::cursor(0),
            read_only: false,
            indent_unit: "  ".to_string(),
            tab_size: DEFAULT_TAB_SIZE,
            indent_marker: FULL_WIDTH_DOUBLE_SPACE.to_string(),
            leading_reclaim_limit: DEFAULT_LEADING_RECLAIM_LIMIT,
            indent_service: Arc::new(NoIndent),
            syntax: None,
            brackets: Arc::new(BracketConfig::default()),
        }
    }

    /// A state configured the way the prose widget sets itself up: the indent unit is the
    /// configured indent value and the indentation service returns its length.
    pub fn from_config(text: &str, config: &EditorConfig) -> Self {
        let indent_value = config.current_indent_value();
        let mut state = Self::new(text)
            .with_read_only(config.read_only)
            .with_tab_size(config.tab_size)
            .with_indent_marker(config.line_marker.clone())
            .with_leading_reclaim_limit(config.leading_reclaim_limit)
            .with_indent_service(FixedIndent(indent_value.chars().count()));
        if !indent_value.is_empty() {
            state = state.with_indent_unit(indent_value);
        }
        state
    }

    /// Replace the selection (clamped to the document).
    pub fn with_selection(mut self, selection: EditorSelection) -> Self {
        self.selection = selection.clamped(self.doc.len_chars());
        self
    }

    /// Set the read-only flag.
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Set the indent unit (one level of indentation).
    pub fn with_indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }

    /// Set the tab size.
    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size;
        self
    }

    /// Set the marker a line break carries over to the new line.
    pub fn with_indent_marker(mut self, marker: impl Into<String>) -> Self {
        self.indent_marker = marker.into();
        self
    }

    /// Set the whitespace-prefix reclamation cutoff.
    pub fn with_leading_reclaim_limit(mut self, limit: usize) -> Self {
        self.leading_reclaim_limit = limit;
        self
    }

    /// Set the indentation service.
    pub fn with_indent_service(mut self, service: impl IndentService + 'static) -> Self {
        self.indent_service = Arc::new(service);
        self
    }

    /// Attach a syntax provider.
    pub fn with_syntax(mut self, provider: Arc<dyn SyntaxProvider>) -> Self {
        self.syntax = Some(provider);
        self
    }

    /// Set the bracket pairs.
    pub fn with_brackets(mut self, brackets: BracketConfig) -> Self {
        self.brackets = Arc::new(brackets);
        self
    }

    /// The document.
    pub fn doc(&self) -> &Document {
        &self.doc
    }

    /// The selection.
    pub fn selection(&self) -> &EditorSelection {
        &self.selection
    }

    /// Whether the document is read-only.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// The indent unit.
    pub fn indent_unit(&self) -> &str {
        &self.indent_unit
    }

    /// The tab size.
    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    /// The marker a line break carries over.
    pub fn indent_marker(&self) -> &str {
        &self.indent_marker
    }

    /// The whitespace-prefix reclamation cutoff.
    pub fn leading_reclaim_limit(&self) -> usize {
        self.leading_reclaim_limit
    }

    /// The bracket pairs.
    pub fn brackets(&self) -> &BracketConfig {
        &self.brackets
    }

    /// Ask the indentation service for the indentation of a line starting at `pos`.
    pub fn indentation(&self, cx: &IndentContext<'_>, pos: usize) -> Option<usize> {
        self.indent_service.indentation(cx, pos)
    }

    /// Parse the current document with the attached provider.
    pub fn syntax_tree(&self) -> Option<Box<dyn SyntaxTree>> {
        self.syntax.as_ref().and_then(|provider| provider.parse(&self.doc))
    }

    /// Build one transaction from a per-range edit function.
    ///
    /// `f` is called for every range against this (pre-edit) state; none of the calls can
    /// observe another range's edit. The changes are then folded into one change set and each
    /// range's cursor is shifted by the edits placed before it. A change that starts inside
    /// an earlier one is clipped to begin where the earlier one ends.
    pub fn change_by_range<F>(&self, mut f: F) -> Result<Transaction, ChangeError>
    where
        F: FnMut(SelectionRange) -> RangeEdit,
    {
        let edits: Vec<RangeEdit> = self.selection.ranges().iter().map(|r| f(*r)).collect();

        let mut order: Vec<usize> = (0..edits.len()).collect();
        order.sort_by_key(|&idx| edits[idx].change.from);

        let mut changes = Vec::with_capacity(edits.len());
        let mut cursors = vec![0; edits.len()];
        let mut shift: isize = 0;
        let mut previous_to = 0;
        for &idx in &order {
            let edit = &edits[idx];
            let mut change = edit.change.clone();
            if change.from < previous_to {
                change.from = previous_to;
                change.to = change.to.max(previous_to);
            }

            let start = (change.from as isize + shift) as usize;
            cursors[idx] = start + edit.cursor_in_insert;
            shift += change.inserted_len() as isize - change.deleted_len() as isize;
            previous_to = change.to;
            changes.push(change);
        }

        let changes = ChangeSet::new(self.doc.len_chars(), changes)?;
        let selection = EditorSelection::create(
            cursors.into_iter().map(SelectionRange::cursor).collect(),
            self.selection.main_index(),
        );
        Ok(Transaction::new(changes).with_selection(selection))
    }

    /// Replace every selection range with `text`, leaving cursors after the insertions.
    pub fn replace_selection(&self, text: &str) -> Result<Transaction, ChangeError> {
        let len = text.chars().count();
        self.change_by_range(|range| RangeEdit {
            change: ChangeSpec::new(range.from(), range.to(), text),
            cursor_in_insert: len,
        })
    }

    /// Apply a transaction, producing the next state and the structured delta.
    pub fn apply(&self, tr: &Transaction) -> Result<(EditorState, TextDelta), ChangeError> {
        let (doc, delta) = tr.changes().apply(&self.doc)?;
        let selection = match tr.selection() {
            Some(selection) => selection.clamped(doc.len_chars()),
            None => map_selection(&self.selection, tr.changes()),
        };
        let next = Self {
            doc,
            selection,
            ..self.clone()
        };
        Ok((next, delta))
    }
}

fn map_selection(selection: &EditorSelection, changes: &ChangeSet) -> EditorSelection {
    let ranges = selection
        .ranges()
        .iter()
        .map(|range| {
            if range.is_empty() {
                return SelectionRange::cursor(changes.map_pos(range.head, Assoc::Before));
            }
            let from = changes.map_pos(range.from(), Assoc::After);
            let to = changes.map_pos(range.to(), Assoc::Before).max(from);
            if range.anchor <= range.head {
                SelectionRange::new(from, to)
            } else {
                SelectionRange::new(to, from)
            }
        })
        .collect();
    EditorSelection::create(ranges, selection.main_index())
}

impl fmt::Debug for EditorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorState")
            .field("doc", &self.doc)
            .field("selection", &self.selection)
            .field("read_only", &self.read_only)
            .field("indent_unit", &self.indent_unit)
            .field("tab_size", &self.tab_size)
            .field("indent_marker", &self.indent_marker)
            .field("leading_reclaim_limit", &self.leading_reclaim_limit)
            .field("has_syntax", &self.syntax.is_some())
            .finish_non_exhaustive()
    }
}
