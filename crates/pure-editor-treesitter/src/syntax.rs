use pure_editor::{Document, SyntaxNode, SyntaxProvider, SyntaxTree};
use pure_editor_lang::BracketConfig;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tree_sitter::{Language, Node, Parser, Tree};

/// Errors produced by [`TreeSitterSyntax`].
#[derive(Debug, Error)]
pub enum TreeSitterError {
    /// Setting the Tree-sitter language failed (usually an ABI version mismatch).
    #[error("tree-sitter language error: {0}")]
    Language(#[from] tree_sitter::LanguageError),
}

/// A [`SyntaxProvider`] backed by a Tree-sitter grammar.
///
/// Every [`SyntaxProvider::parse`] call parses the given document version from scratch with
/// one shared parser; the resulting [`TreeSitterTree`] owns its tree and answers queries in
/// character offsets.
pub struct TreeSitterSyntax {
    language: Language,
    parser: Mutex<Parser>,
    brackets: Arc<BracketConfig>,
}

impl TreeSitterSyntax {
    /// Create a provider for `language` with the default `()[]{}` bracket pairs.
    pub fn new(language: Language) -> Result<Self, TreeSitterError> {
        let mut parser = Parser::new();
        parser.set_language(&language)?;
        Ok(Self {
            language,
            parser: Mutex::new(parser),
            brackets: Arc::new(BracketConfig::default()),
        })
    }

    /// Use `brackets` for the "closed-by" relation between token kinds.
    pub fn with_brackets(mut self, brackets: BracketConfig) -> Self {
        self.brackets = Arc::new(brackets);
        self
    }

    /// The grammar.
    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Parse `doc` into a [`TreeSitterTree`].
    pub fn parse_tree(&self, doc: &Document) -> Option<TreeSitterTree> {
        let text = doc.to_string();
        let tree = match self.parser.lock() {
            Ok(mut parser) => parser.parse(&text, None),
            Err(_) => {
                tracing::warn!("tree-sitter parser lock poisoned; skipping parse");
                return None;
            }
        };
        let Some(tree) = tree else {
            tracing::debug!(bytes = text.len(), "tree-sitter returned no tree");
            return None;
        };
        tracing::trace!(
            bytes = text.len(),
            has_error = tree.root_node().has_error(),
            "parsed document"
        );
        Some(TreeSitterTree {
            tree,
            doc: doc.clone(),
            brackets: Arc::clone(&self.brackets),
        })
    }
}

impl std::fmt::Debug for TreeSitterSyntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeSitterSyntax")
            .field("brackets", &self.brackets)
            .finish_non_exhaustive()
    }
}

impl SyntaxProvider for TreeSitterSyntax {
    fn parse(&self, doc: &Document) -> Option<Box<dyn SyntaxTree>> {
        self.parse_tree(doc)
            .map(|tree| Box::new(tree) as Box<dyn SyntaxTree>)
    }
}

/// One parsed document version.
pub struct TreeSitterTree {
    tree: Tree,
    doc: Document,
    brackets: Arc<BracketConfig>,
}

impl TreeSitterTree {
    /// The underlying Tree-sitter tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    fn to_syntax_node(&self, node: Node<'_>) -> SyntaxNode {
        SyntaxNode::new(
            node.kind(),
            self.doc.byte_to_char(node.start_byte()),
            self.doc.byte_to_char(node.end_byte()),
        )
    }

    /// Find the Tree-sitter node a [`SyntaxNode`] was made from.
    fn find(&self, node: &SyntaxNode) -> Option<Node<'_>> {
        let start = self.doc.char_to_byte(node.from);
        let end = self.doc.char_to_byte(node.to);
        let mut current = self.tree.root_node().descendant_for_byte_range(start, end)?;
        loop {
            if current.kind() == node.kind
                && current.start_byte() == start
                && current.end_byte() == end
            {
                return Some(current);
            }
            current = current.parent()?;
        }
    }

    fn children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        node.children(&mut cursor).collect()
    }
}

impl SyntaxTree for TreeSitterTree {
    fn resolve_inner(&self, pos: usize) -> Option<SyntaxNode> {
        let byte = self.doc.char_to_byte(pos);
        let mut current = self.tree.root_node().descendant_for_byte_range(byte, byte);
        while let Some(node) = current {
            if node.start_byte() < byte && byte < node.end_byte() {
                return Some(self.to_syntax_node(node));
            }
            current = node.parent();
        }
        None
    }

    fn child_before(&self, node: &SyntaxNode, pos: usize) -> Option<SyntaxNode> {
        let byte = self.doc.char_to_byte(pos);
        let parent = self.find(node)?;
        Self::children(parent)
            .into_iter()
            .rev()
            .find(|child| child.end_byte() <= byte)
            .map(|child| self.to_syntax_node(child))
    }

    fn child_after(&self, node: &SyntaxNode, pos: usize) -> Option<SyntaxNode> {
        let byte = self.doc.char_to_byte(pos);
        let parent = self.find(node)?;
        Self::children(parent)
            .into_iter()
            .find(|child| child.start_byte() >= byte)
            .map(|child| self.to_syntax_node(child))
    }

    fn closed_by(&self, kind: &str) -> Vec<String> {
        self.brackets
            .closed_by(kind)
            .into_iter()
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rust() -> TreeSitterSyntax {
        TreeSitterSyntax::new(tree_sitter_rust::LANGUAGE.into()).unwrap()
    }

    #[test]
    fn find_round_trips_nodes() {
        let doc = Document::new("fn f() { g(1); }");
        let tree = rust().parse_tree(&doc).unwrap();
        let args = tree.resolve_inner(12).unwrap();
        assert_eq!(args.kind, "arguments");
        assert_eq!(tree.find(&args).map(|n| n.kind()), Some("arguments"));
    }

    #[test]
    fn offsets_are_characters() {
        let doc = Document::new("fn f() { g(\"春眠\", ); }");
        let tree = rust().parse_tree(&doc).unwrap();
        // `(` at char 10, string is 4 chars, `,` at 15, space, `)` at 17.
        let args = tree.resolve_inner(16).unwrap();
        assert_eq!((args.kind.as_str(), args.from, args.to), ("arguments", 10, 18));
        let after = tree.child_after(&args, 16).unwrap();
        assert_eq!((after.kind.as_str(), after.from), (")", 17));
    }
}
