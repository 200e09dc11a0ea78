//! Command session example
//!
//! Drives an `EditorSession` purely through command names, the way a key-binding layer would.
//! The registry's debug-level `tracing` events are printed through `tracing-subscriber`.

use editor_commands::{EditorConfig, EditorSession, Position, Selection};

fn show(title: &str, session: &EditorSession) {
    println!("--- {title} ---");
    for (idx, line) in session.doc().text().split('\n').enumerate() {
        println!("{:>3} | {line}", idx + 1);
    }
    let selection = session.doc().selection();
    println!(
        "caret {}:{} anchor {}:{}\n",
        selection.active.line,
        selection.active.column,
        selection.anchor.line,
        selection.anchor.column
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let config = EditorConfig::from_toml_str("tab-type = \"soft\"\nindent-size = 4\n")
        .unwrap_or_default();
    let mut session = EditorSession::new(
        "fn main() {\nlet x = 1;\nlet y = 2;\nprintln!(\"{}\", x + y);\n}\n",
    )
    .with_config(config);
    show("initial", &session);

    // Indent the body.
    session
        .doc_mut()
        .set_selection(Selection::new(Position::new(4, 1), Position::new(2, 1)));
    session.perform("doc:select-lines").unwrap();
    session.perform("doc:indent").unwrap();
    show("indent body", &session);

    // Swap the two bindings.
    session.doc_mut().set_caret(Position::new(3, 5));
    session.perform("doc:move-lines-up").unwrap();
    show("move-lines-up", &session);

    // Duplicate and upper-case a word.
    session.perform("doc:duplicate-lines").unwrap();
    session.perform("doc:move-to-next-word-end").unwrap();
    session.perform("doc:select-word").unwrap();
    session.perform("doc:upper-case").unwrap();
    show("duplicate + upper-case", &session);

    // Jump with the prompt.
    session.perform("doc:go-to-line").unwrap();
    let suggestions = session.suggest("println");
    println!("go-to-line suggestions for \"println\":");
    for suggestion in &suggestions {
        println!("  {} ({})", suggestion.text, suggestion.info.as_deref().unwrap_or(""));
    }
    session.confirm_prompt("println").unwrap();
    show("go-to-line", &session);

    // Undo everything.
    while session.doc().can_undo() {
        session.perform("doc:undo").unwrap();
    }
    show("undo all", &session);

    for message in session.messages().messages() {
        println!("[{:?}] {}", message.level, message.text);
    }
}
