use editor_commands::{EditorSession, Position, Selection, SyntaxSet};
use pretty_assertions::assert_eq;

fn session_for(filename: &str, text: &str) -> EditorSession {
    let mut session = EditorSession::new(text);
    let syntax = SyntaxSet::builtin().match_filename(filename).clone();
    session.doc_mut().set_syntax(syntax);
    session
}

#[test]
fn test_toggle_whole_rust_document_is_self_inverse() {
    let text = "fn main() {\n    body();\n}\n";
    let mut session = session_for("main.rs", text);

    session.perform("doc:select-all").unwrap();
    session.perform("doc:toggle-line-comments").unwrap();
    assert_eq!(
        session.doc().text(),
        "// fn main() {\n//     body();\n// }\n"
    );

    session.perform("doc:select-all").unwrap();
    session.perform("doc:toggle-line-comments").unwrap();
    assert_eq!(session.doc().text(), text);
}

#[test]
fn test_comment_at_shallowest_indent_and_skip_blank_lines() {
    let text = "    a\n\n      b\n";
    let mut session = session_for("lib.rs", text);
    session
        .doc_mut()
        .set_selection(Selection::new(Position::new(3, 8), Position::new(1, 1)));

    session.perform("doc:toggle-line-comments").unwrap();
    assert_eq!(session.doc().text(), "    // a\n\n    //   b\n");

    session.perform("doc:toggle-line-comments").unwrap();
    assert_eq!(session.doc().text(), text);
}

#[test]
fn test_partially_commented_range_gets_commented() {
    let mut session = session_for("lib.rs", "// a\nb");
    session
        .doc_mut()
        .set_selection(Selection::new(Position::new(2, 2), Position::new(1, 1)));

    session.perform("doc:toggle-line-comments").unwrap();

    assert_eq!(session.doc().text(), "// // a\n// b");
}

#[test]
fn test_python_uses_hash() {
    let mut session = session_for("script.py", "x = 1\n");

    session.perform("doc:toggle-line-comments").unwrap();
    assert_eq!(session.doc().text(), "# x = 1\n");

    session.perform("doc:toggle-line-comments").unwrap();
    assert_eq!(session.doc().text(), "x = 1\n");
}

#[test]
fn test_plain_text_has_no_comment_token() {
    let mut session = EditorSession::new("hello\n");

    session.perform("doc:toggle-line-comments").unwrap();

    assert_eq!(session.doc().text(), "hello\n");
    assert!(!session.doc().can_undo());
}

#[test]
fn test_toggle_is_one_undo_step() {
    let mut session = session_for("main.rs", "a\nb\n");
    session.perform("doc:select-all").unwrap();

    session.perform("doc:toggle-line-comments").unwrap();
    assert_eq!(session.doc().text(), "// a\n// b\n");

    session.perform("doc:undo").unwrap();
    assert_eq!(session.doc().text(), "a\nb\n");
}

#[test]
fn test_opened_file_picks_comment_token_from_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("query.sql");
    std::fs::write(&path, "select 1;\n").unwrap();

    let mut session = EditorSession::open(&path).unwrap();
    assert_eq!(session.doc().syntax().name, "SQL");

    session.perform("doc:toggle-line-comments").unwrap();
    assert_eq!(session.doc().text(), "-- select 1;\n");
}
