#![warn(missing_docs)]
//! Pure Editor - a headless editing kernel for Chinese prose
//!
//! # Overview
//!
//! `pure-editor` models the state of a prose editing widget without rendering anything.
//! Documents are immutable versions, selections may hold many ranges, and every edit is a
//! [`Transaction`] computed against one version and applied atomically.
//!
//! On top of that kernel sits a CJK-aware Enter command, [`newline_and_indent`], which
//! explodes bracket pairs, asks a pluggable [`IndentService`] for the new line's indentation,
//! and carries the full-width double-space paragraph marker over to the new line.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  PureEditor (whole-document ops, status)    │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Keymap & Commands                          │  ← Key handling
//! ├─────────────────────────────────────────────┤
//! │  Indentation service & Syntax capability    │  ← Pluggable policy
//! ├─────────────────────────────────────────────┤
//! │  EditorState & Transaction                  │  ← Snapshots
//! ├─────────────────────────────────────────────┤
//! │  ChangeSet / Selection                      │  ← Edit algebra
//! ├─────────────────────────────────────────────┤
//! │  Document (Rope-based)                      │  ← Text storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use pure_editor::{BracketIndent, EditorSelection, EditorState, newline_and_indent};
//!
//! let state = EditorState::new("    foo()")
//!     .with_indent_unit("  ")
//!     .with_indent_service(BracketIndent)
//!     .with_selection(EditorSelection::cursor(8));
//!
//! let mut next = None;
//! assert!(newline_and_indent(&state, &mut |tr| next = state.apply(&tr).ok()));
//! let (next, _delta) = next.unwrap();
//! assert_eq!(next.doc().to_string(), "    foo(\n      \n    )");
//! assert_eq!(next.selection().main().head, 15);
//! ```
//!
//! # Module Description
//!
//! - [`document`] - immutable Rope-backed text
//! - [`selection`] - multi-range selections
//! - [`delta`] - change sets and structured deltas
//! - [`state`] - editor state snapshots and transactions
//! - [`indent`] - indentation services
//! - [`syntax`] - syntax-tree capability
//! - [`commands`] - line-break commands
//! - [`keymap`] - priority-ordered key bindings
//! - [`editor`] - the prose editor wrapper
//! - [`config`] - editor configuration
//! - [`phrases`] - localized UI phrases
//! - [`status`] - status-bar summary

pub mod commands;
pub mod config;
pub mod delta;
pub mod document;
pub mod editor;
pub mod indent;
pub mod keymap;
pub mod phrases;
pub mod selection;
pub mod state;
pub mod status;
pub mod syntax;

pub use commands::{ENTER, StateCommand, insert_newline, newline_and_indent};
pub use config::{ConfigError, EditorConfig};
pub use delta::{Assoc, ChangeError, ChangeSet, ChangeSpec, TextDelta, TextDeltaEdit};
pub use document::{Document, Line, normalize_line_endings};
pub use editor::{EditorChange, EditorChangeCallback, EditorChangeKind, EditorError, PureEditor};
pub use indent::{
    Bias, BracketIndent, FixedIndent, IndentContext, IndentService, NoIndent, count_column,
    indent_fn, indent_string,
};
pub use keymap::{KeyBinding, Keymap};
pub use phrases::Phrases;
pub use selection::{EditorSelection, SelectionRange};
pub use state::{EditorState, RangeEdit, Transaction};
pub use status::StatusInfo;
pub use syntax::{SyntaxNode, SyntaxProvider, SyntaxTree};

pub use pure_editor_lang::{BracketConfig, FULL_WIDTH_DOUBLE_SPACE};
