use pretty_assertions::assert_eq;
use pure_editor::{
    BracketIndent, Document, EditorConfig, EditorSelection, EditorState, PureEditor, SyntaxTree,
    newline_and_indent,
};
use pure_editor_lang::BracketConfig;
use pure_editor_treesitter::TreeSitterSyntax;
use std::sync::Arc;
use tree_sitter_rust::LANGUAGE;

fn rust_syntax() -> Arc<TreeSitterSyntax> {
    Arc::new(TreeSitterSyntax::new(LANGUAGE.into()).unwrap())
}

fn press_enter(state: &EditorState) -> EditorState {
    let mut next = None;
    assert!(newline_and_indent(state, &mut |tr| {
        next = Some(state.apply(&tr).unwrap().0);
    }));
    next.unwrap()
}

#[test]
fn test_call_with_inner_space_explodes() {
    let state = EditorState::new("fn main() {\n    call( );\n}")
        .with_indent_unit("    ")
        .with_indent_service(BracketIndent)
        .with_syntax(rust_syntax())
        .with_selection(EditorSelection::cursor(21));

    let next = press_enter(&state);
    assert_eq!(
        next.doc().to_string(),
        "fn main() {\n    call(\n        \n    );\n}"
    );
    assert_eq!(next.selection().main().head, 30);
}

#[test]
fn test_without_syntax_the_gap_is_only_trimmed() {
    let state = EditorState::new("fn main() {\n    call( );\n}")
        .with_indent_unit("    ")
        .with_indent_service(BracketIndent)
        .with_selection(EditorSelection::cursor(21));

    let next = press_enter(&state);
    assert_eq!(
        next.doc().to_string(),
        "fn main() {\n    call(\n        );\n}"
    );
}

#[test]
fn test_block_spanning_lines_is_not_exploded() {
    let state = EditorState::new("fn main() {\n}")
        .with_syntax(rust_syntax())
        .with_selection(EditorSelection::cursor(11));

    let next = press_enter(&state);
    assert_eq!(next.doc().to_string(), "fn main() {\n\n}");
    assert_eq!(next.selection().main().head, 12);
}

#[test]
fn test_resolve_inner_and_children_use_char_offsets() {
    let syntax = TreeSitterSyntax::new(LANGUAGE.into()).unwrap();
    let state = EditorState::new("fn f() { 写(\"春\", [ ]); }");
    let tree = syntax.parse_tree(state.doc()).unwrap();

    // `[` at 16, `]` at 18.
    let array = tree.resolve_inner(17).unwrap();
    assert_eq!(array.kind, "array_expression");
    let before = tree.child_before(&array, 17).unwrap();
    let after = tree.child_after(&array, 17).unwrap();
    assert_eq!((before.kind.as_str(), before.from, before.to), ("[", 16, 17));
    assert_eq!((after.kind.as_str(), after.from, after.to), ("]", 18, 19));
    assert_eq!(tree.closed_by("["), vec!["]".to_string()]);
}

#[test]
fn test_custom_brackets_limit_closed_by() {
    let syntax = TreeSitterSyntax::new(LANGUAGE.into())
        .unwrap()
        .with_brackets(BracketConfig::empty().with_pair("{", "}"));
    let tree = syntax.parse_tree(&Document::from("fn f() {}")).unwrap();
    assert!(tree.closed_by("(").is_empty());
    assert_eq!(tree.closed_by("{"), vec!["}".to_string()]);
}

#[test]
fn test_editor_can_carry_a_syntax_provider() {
    let mut editor = PureEditor::with_text("fn f() { g( ); }", EditorConfig::default()).unwrap();
    let state = editor.state().clone().with_syntax(rust_syntax());
    editor.set_state(state);
    editor.set_selection(EditorSelection::cursor(11));

    assert!(editor.handle_key("Enter").unwrap());
    assert_eq!(
        editor.text(),
        "fn f() { g(\n\u{3000}\u{3000}\n); }"
    );
}
