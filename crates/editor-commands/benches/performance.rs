use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use editor_commands::{EditorConfig, EditorSession, Position, Selection, SyntaxSet};

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        out.push_str(&format!(
            "    {i:06} the quick brown fox jumps over the lazy dog (editor-commands)\n"
        ));
    }
    out
}

fn bench_large_file_open(c: &mut Criterion) {
    let text = large_text(50_000);
    c.bench_function("large_file_open/50k_lines", |b| {
        b.iter(|| {
            let session = EditorSession::new(black_box(&text));
            black_box(session.doc().line_count());
        })
    });
}

fn bench_typing_in_middle(c: &mut Criterion) {
    let text = large_text(50_000);
    c.bench_function("typing_middle/100_inserts", |b| {
        b.iter_batched(
            || {
                let mut session = EditorSession::new(&text);
                session.doc_mut().set_caret(Position::new(25_000, 10));
                session
            },
            |mut session| {
                for _ in 0..100 {
                    session.doc_mut().text_input("x");
                }
                black_box(session.doc().caret());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_indent_selection(c: &mut Criterion) {
    let text = large_text(5_000);
    c.bench_function("indent/5k_lines", |b| {
        b.iter_batched(
            || {
                let mut session = EditorSession::new(&text).with_config(EditorConfig::soft(4));
                session.perform("doc:select-all").unwrap();
                session
            },
            |mut session| {
                session.perform("doc:indent").unwrap();
                black_box(session.doc().line_count());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_move_block(c: &mut Criterion) {
    let text = large_text(50_000);
    c.bench_function("move_lines/200_line_block_x10", |b| {
        b.iter_batched(
            || {
                let mut session = EditorSession::new(&text);
                session.doc_mut().set_selection(Selection::new(
                    Position::new(20_200, 1),
                    Position::new(20_000, 1),
                ));
                session
            },
            |mut session| {
                for _ in 0..10 {
                    session.perform("doc:move-lines-down").unwrap();
                }
                black_box(session.doc().selection());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_toggle_comments(c: &mut Criterion) {
    let text = large_text(5_000);
    c.bench_function("toggle_comments/5k_lines", |b| {
        b.iter_batched(
            || {
                let mut session = EditorSession::new(&text);
                let rust = SyntaxSet::builtin().match_filename("bench.rs").clone();
                session.doc_mut().set_syntax(rust);
                session.perform("doc:select-all").unwrap();
                session
            },
            |mut session| {
                session.perform("doc:toggle-line-comments").unwrap();
                black_box(session.doc().line_count());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_go_to_line_fuzzy(c: &mut Criterion) {
    let text = large_text(20_000);
    c.bench_function("go_to_line/fuzzy_20k_lines", |b| {
        b.iter_batched(
            || {
                let mut session = EditorSession::new(&text);
                session.perform("doc:go-to-line").unwrap();
                session
            },
            |mut session| {
                black_box(session.suggest("019999 lazy"));
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_large_file_open,
    bench_typing_in_middle,
    bench_indent_selection,
    bench_move_block,
    bench_toggle_comments,
    bench_go_to_line_fuzzy
);
criterion_main!(benches);
