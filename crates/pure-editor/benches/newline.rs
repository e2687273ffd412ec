use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use pure_editor::{
    BracketIndent, EditorConfig, EditorSelection, EditorState, PureEditor, SelectionRange,
    newline_and_indent,
};
use rand::Rng;

fn large_prose(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 48);
    for i in 0..line_count {
        out.push_str(&format!(
            "\u{3000}\u{3000}第{i:05}段：春眠不觉晓，处处闻啼鸟。(注)\n"
        ));
    }
    out.pop();
    out
}

fn bench_many_cursors(c: &mut Criterion) {
    let text = large_prose(10_000);
    let len = text.chars().count();
    let mut rng = rand::thread_rng();
    let cursors: Vec<SelectionRange> = (0..1_000)
        .map(|_| SelectionRange::cursor(rng.gen_range(0..=len)))
        .collect();
    let state = EditorState::new(&text)
        .with_indent_service(BracketIndent)
        .with_selection(EditorSelection::create(cursors, 0));

    c.bench_function("newline_and_indent/1000_cursors", |b| {
        b.iter(|| {
            let mut out = None;
            newline_and_indent(black_box(&state), &mut |tr| {
                out = state.apply(&tr).ok();
            });
            black_box(out);
        })
    });
}

fn bench_typing_paragraphs(c: &mut Criterion) {
    let text = large_prose(10_000);
    c.bench_function("editor_enter/100_paragraphs", |b| {
        b.iter_batched(
            || {
                let mut editor = PureEditor::with_text(&text, EditorConfig::default())
                    .expect("valid default config");
                let end = editor.state().doc().len_chars();
                editor.set_selection(EditorSelection::cursor(end / 2));
                editor
            },
            |mut editor| {
                for _ in 0..100 {
                    editor.handle_key("Enter").unwrap();
                }
                black_box(editor.version());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_typeset(c: &mut Criterion) {
    let text = large_prose(10_000);
    c.bench_function("typeset/10k_lines", |b| {
        b.iter_batched(
            || PureEditor::with_text(&text, EditorConfig::default()).expect("valid default config"),
            |mut editor| {
                editor.typeset().unwrap();
                black_box(editor.text().len());
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_many_cursors, bench_typing_paragraphs, bench_typeset);
criterion_main!(benches);
