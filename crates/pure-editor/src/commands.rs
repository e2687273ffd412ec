//! Line-break commands.
//!
//! Commands follow one shape: they read an [`EditorState`], describe their edit as a
//! [`Transaction`] handed to `dispatch`, and return whether they handled the key. Returning
//! `false` lets the next binding in the [`Keymap`](crate::Keymap) have a go.
//!
//! [`newline_and_indent`] is the CJK-aware Enter handler:
//!
//! - a cursor directly between a bracket pair "explodes" the pair onto three lines;
//! - the new line is indented by the [`IndentService`](crate::IndentService), or copies the
//!   current line's leading whitespace when the service has no opinion;
//! - whitespace right after the cursor is swallowed, and a whitespace-only prefix before the
//!   cursor is replaced rather than left behind;
//! - a line that contains the full-width double-space marker hands the marker on to the new
//!   line.

use crate::delta::ChangeSpec;
use crate::indent::{Bias, IndentContext, indent_string};
use crate::keymap::KeyBinding;
use crate::selection::SelectionRange;
use crate::state::{EditorState, RangeEdit, Transaction};
use crate::syntax::SyntaxTree;

/// Signature shared by every command.
pub type StateCommand = fn(&EditorState, &mut dyn FnMut(Transaction)) -> bool;

/// The Enter binding: [`newline_and_indent`].
pub const ENTER: KeyBinding = KeyBinding {
    key: "Enter",
    run: newline_and_indent,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BracketSpan {
    from: usize,
    to: usize,
}

/// Break the line at every selection range, indenting the new line.
///
/// Declines (returns `false`, dispatches nothing) on a read-only document.
pub fn newline_and_indent(state: &EditorState, dispatch: &mut dyn FnMut(Transaction)) -> bool {
    if state.is_read_only() {
        tracing::debug!("newline_and_indent declined: document is read-only");
        return false;
    }

    let tree = state.syntax_tree();
    let tree = tree.as_deref();
    match state.change_by_range(|range| break_range(state, tree, range)) {
        Ok(tr) => {
            tracing::debug!(
                ranges = state.selection().ranges().len(),
                "newline_and_indent dispatching"
            );
            dispatch(tr.scroll_into_view().with_user_event("input"));
            true
        }
        Err(err) => {
            tracing::warn!(%err, "newline_and_indent produced an invalid change set");
            false
        }
    }
}

/// Replace every selection range with a bare line break.
///
/// This is the fallback Enter behavior when no smarter handler takes the key.
pub fn insert_newline(state: &EditorState, dispatch: &mut dyn FnMut(Transaction)) -> bool {
    if state.is_read_only() {
        return false;
    }
    match state.change_by_range(|range| RangeEdit {
        change: ChangeSpec::new(range.from(), range.to(), "\n"),
        cursor_in_insert: 1,
    }) {
        Ok(tr) => {
            dispatch(tr.scroll_into_view().with_user_event("input"));
            true
        }
        Err(err) => {
            tracing::warn!(%err, "insert_newline produced an invalid change set");
            false
        }
    }
}

fn break_range(
    state: &EditorState,
    tree: Option<&dyn SyntaxTree>,
    range: SelectionRange,
) -> RangeEdit {
    let doc = state.doc();
    let (mut from, mut to) = (range.from(), range.to());
    let line = doc.line_at(from);

    let explode = if range.is_empty() {
        between_brackets(state, tree, from)
    } else {
        None
    };
    if let Some(span) = explode {
        tracing::debug!(from = span.from, to = span.to, "exploding bracket pair");
    }

    let cx = IndentContext::simulating_break(state, from, explode.is_some());
    let indent = match state.indentation(&cx, from) {
        Some(cols) => indent_string(state.indent_unit(), state.tab_size(), cols),
        None => line.leading_whitespace().to_string(),
    };

    while to < line.to && doc.char_at(to).is_some_and(char::is_whitespace) {
        to += 1;
    }

    if let Some(span) = explode {
        from = span.from;
        to = span.to;
    } else if range.is_empty()
        && from > line.from
        && from - line.from < state.leading_reclaim_limit()
        && doc.slice(line.from, from).chars().all(char::is_whitespace)
    {
        from = line.from;
    }

    // The marker goes after the break, so it opens the new line instead of trailing on the
    // old one. It appears there once, whether carried over or already part of the indent.
    let marker = state.indent_marker();
    let marker = if !marker.is_empty() && line.text.contains(marker) && !indent.starts_with(marker)
    {
        marker
    } else {
        ""
    };

    let mut insert = String::with_capacity(2 + marker.len() + indent.len());
    insert.push('\n');
    insert.push_str(marker);
    insert.push_str(&indent);
    let cursor_in_insert = 1 + marker.chars().count() + indent.chars().count();

    if explode.is_some() {
        let closing = cx.line_indent(line.from, Bias::Before);
        insert.push('\n');
        insert.push_str(&indent_string(state.indent_unit(), state.tab_size(), closing));
    }

    tracing::trace!(from, to, ?insert, "line break");
    RangeEdit {
        change: ChangeSpec::new(from, to, insert),
        cursor_in_insert,
    }
}

fn between_brackets(
    state: &EditorState,
    tree: Option<&dyn SyntaxTree>,
    pos: usize,
) -> Option<BracketSpan> {
    let doc = state.doc();
    if pos > 0
        && let (Some(open), Some(close)) = (doc.char_at(pos - 1), doc.char_at(pos))
        && state.brackets().is_pair(open, close)
    {
        return Some(BracketSpan { from: pos, to: pos });
    }

    let tree = tree?;
    let context = tree.resolve_inner(pos)?;
    let before = tree.child_before(&context, pos)?;
    let after = tree.child_after(&context, pos)?;
    let closes = tree.closed_by(&before.kind).iter().any(|k| *k == after.kind);

    (before.to <= pos
        && after.from >= pos
        && closes
        && doc.line_at(before.to).from == doc.line_at(after.from).from)
        .then_some(BracketSpan {
            from: before.to,
            to: after.from,
        })
}
