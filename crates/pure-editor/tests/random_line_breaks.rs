//! Randomized multi-cursor line breaks.
//!
//! Random prose (CJK, ASCII, full-width markers, runs of spaces) gets Enter pressed at a random
//! set of cursors. Whatever the layout, every cursor must contribute exactly one line break and
//! land right after the new line's indentation.

use pretty_assertions::assert_eq;
use pure_editor::{EditorSelection, EditorState, SelectionRange, newline_and_indent};
use rand::Rng;

fn random_prose(rng: &mut impl Rng, pieces: usize) -> String {
    let mut text = String::new();
    for _ in 0..pieces {
        let piece = match rng.gen_range(0..6) {
            0 => "\u{3000}\u{3000}",
            1 => "春眠不觉晓",
            2 => "   ",
            3 => "word ",
            4 => "，",
            _ => "\n",
        };
        text.push_str(piece);
    }
    text
}

#[test]
fn test_each_cursor_adds_one_line_break() {
    let mut rng = rand::thread_rng();

    for _ in 0..200 {
        let word_count = rng.gen_range(1..40);
        let text = random_prose(&mut rng, word_count);
        let len = text.chars().count();
        let cursors: Vec<SelectionRange> = (0..rng.gen_range(1..6))
            .map(|_| SelectionRange::cursor(rng.gen_range(0..=len)))
            .collect();
        let state = EditorState::new(&text).with_selection(EditorSelection::create(cursors, 0));
        let range_count = state.selection().ranges().len();

        let mut next = None;
        assert!(newline_and_indent(&state, &mut |tr| {
            next = Some(state.apply(&tr).unwrap().0);
        }));
        let next = next.unwrap();
        let after = next.doc().to_string();

        assert_eq!(
            after.matches('\n').count(),
            text.matches('\n').count() + range_count,
            "text: {text:?}"
        );
        assert_eq!(next.selection().ranges().len(), range_count);
        for range in next.selection().ranges() {
            let line = next.doc().line_at(range.head);
            assert!(line.number > 1, "cursor stayed on the first line of {after:?}");
            assert!(
                next.doc()
                    .slice(line.from, range.head)
                    .chars()
                    .all(char::is_whitespace),
                "cursor at {} not after indentation in {after:?}",
                range.head
            );
        }
    }
}
