#![warn(missing_docs)]
//! `pure-editor-treesitter` - Tree-sitter syntax provider for `pure-editor`.
//!
//! Attaching a [`TreeSitterSyntax`] to an `EditorState` lets the line-break command recognize
//! bracket pairs that have whitespace between them (`foo( )`), using the parse tree instead
//! of raw character adjacency.
//!
//! ```rust
//! use pure_editor::{EditorSelection, EditorState, newline_and_indent};
//! use pure_editor_treesitter::TreeSitterSyntax;
//! use std::sync::Arc;
//!
//! let syntax = TreeSitterSyntax::new(tree_sitter_rust::LANGUAGE.into()).unwrap();
//! let state = EditorState::new("fn f() { g( ); }")
//!     .with_syntax(Arc::new(syntax))
//!     .with_selection(EditorSelection::cursor(11));
//!
//! let mut next = None;
//! newline_and_indent(&state, &mut |tr| next = state.apply(&tr).ok());
//! let (next, _) = next.unwrap();
//! assert_eq!(next.doc().to_string(), "fn f() { g(\n\n); }");
//! ```

mod syntax;

pub use syntax::{TreeSitterError, TreeSitterSyntax, TreeSitterTree};
