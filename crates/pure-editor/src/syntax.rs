//! Syntax-tree capability.
//!
//! The kernel does not parse anything itself. Commands that care about structure ask an
//! optional [`SyntaxProvider`] attached to the [`EditorState`](crate::EditorState) for a
//! [`SyntaxTree`] of the current document, and then only use four queries: the innermost node
//! at an offset, its children before/after an offset, and the "closed-by" relation between
//! node kinds. Any parse-tree library can satisfy that; see `pure-editor-treesitter`.

use crate::document::Document;

/// A node of a syntax tree, in character offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    /// Node kind (for tokens, usually the token text, e.g. `"("`).
    pub kind: String,
    /// Start character offset.
    pub from: usize,
    /// End character offset (exclusive).
    pub to: usize,
}

impl SyntaxNode {
    /// Create a node.
    pub fn new(kind: impl Into<String>, from: usize, to: usize) -> Self {
        Self {
            kind: kind.into(),
            from,
            to,
        }
    }
}

/// Queries over one parsed version of a document.
pub trait SyntaxTree {
    /// The innermost node that encloses `pos`.
    fn resolve_inner(&self, pos: usize) -> Option<SyntaxNode>;

    /// The last child of `node` that ends at or before `pos`.
    fn child_before(&self, node: &SyntaxNode, pos: usize) -> Option<SyntaxNode>;

    /// The first child of `node` that starts at or after `pos`.
    fn child_after(&self, node: &SyntaxNode, pos: usize) -> Option<SyntaxNode>;

    /// Node kinds that close a node of kind `kind` (empty if it is not an opening token).
    fn closed_by(&self, kind: &str) -> Vec<String>;
}

/// Produces a [`SyntaxTree`] for a document version.
pub trait SyntaxProvider: Send + Sync {
    /// Parse `doc`. Returns `None` when no tree is available (e.g. the parser gave up).
    fn parse(&self, doc: &Document) -> Option<Box<dyn SyntaxTree>>;
}
