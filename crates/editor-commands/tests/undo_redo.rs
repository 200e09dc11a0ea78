use editor_commands::{EditorSession, Position, Selection};
use pretty_assertions::assert_eq;

#[test]
fn test_undo_redo_restores_text_and_selection() {
    let mut session = EditorSession::new("a\nb\nc");
    session
        .doc_mut()
        .set_selection(Selection::new(Position::new(2, 2), Position::new(1, 1)));

    session.perform("doc:duplicate-lines").unwrap();
    let after = session.doc().selection();
    assert_eq!(session.doc().text(), "a\nb\na\nb\nc");

    session.perform("doc:undo").unwrap();
    assert_eq!(session.doc().text(), "a\nb\nc");
    assert_eq!(
        session.doc().selection(),
        Selection::new(Position::new(2, 2), Position::new(1, 1))
    );

    session.perform("doc:redo").unwrap();
    assert_eq!(session.doc().text(), "a\nb\na\nb\nc");
    assert_eq!(session.doc().selection(), after);
}

#[test]
fn test_each_command_is_one_step() {
    let mut session = EditorSession::new("one\ntwo\nthree\n");
    session.doc_mut().set_caret(Position::new(3, 1));

    session.perform("doc:move-lines-up").unwrap();
    session.perform("doc:move-lines-up").unwrap();
    session.perform("doc:delete-lines").unwrap();
    assert_eq!(session.doc().text(), "one\ntwo\n");

    session.perform("doc:undo").unwrap();
    assert_eq!(session.doc().text(), "three\none\ntwo\n");
    session.perform("doc:undo").unwrap();
    assert_eq!(session.doc().text(), "one\nthree\ntwo\n");
    session.perform("doc:undo").unwrap();
    assert_eq!(session.doc().text(), "one\ntwo\nthree\n");
    assert!(!session.doc().can_undo());
}

#[test]
fn test_new_edit_clears_redo() {
    let mut session = EditorSession::new("abc");
    session.doc_mut().set_caret(Position::new(1, 4));

    session.perform("doc:backspace").unwrap();
    session.perform("doc:undo").unwrap();
    assert!(session.doc().can_redo());

    session.perform("doc:newline").unwrap();
    assert!(!session.doc().can_redo());
    assert!(!session.doc_mut().redo());
}

#[test]
fn test_undo_back_to_saved_state_is_clean() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("file.txt");
    std::fs::write(&path, "base").unwrap();
    let mut session = EditorSession::open(&path).unwrap();

    session.perform("doc:select-all").unwrap();
    session.perform("doc:upper-case").unwrap();
    assert!(session.doc().is_dirty());

    session.perform("doc:undo").unwrap();
    assert!(!session.doc().is_dirty());

    session.perform("doc:redo").unwrap();
    session.perform("doc:save").unwrap();
    assert!(!session.doc().is_dirty());

    session.perform("doc:undo").unwrap();
    assert!(session.doc().is_dirty());
}

#[test]
fn test_undo_on_fresh_document_is_noop() {
    let mut session = EditorSession::new("text");

    assert!(session.perform("doc:undo").unwrap());
    assert!(session.perform("doc:redo").unwrap());

    assert_eq!(session.doc().text(), "text");
    assert!(!session.doc().is_dirty());
}

#[test]
fn test_command_larger_than_history_undoes_completely() {
    let text: String = (0..1100).map(|i| format!("line{i}\n")).collect();
    let mut session = EditorSession::new(&text);

    session.perform("doc:select-all").unwrap();
    session.perform("doc:indent").unwrap();
    assert!(session.doc().text().starts_with("  line0\n  line1\n"));
    assert!(session.doc().text().contains("  line1099\n"));

    session.perform("doc:undo").unwrap();
    assert_eq!(session.doc().text(), text);
    assert!(!session.doc().is_dirty());
    assert!(!session.doc().can_undo());
}

#[test]
fn test_history_keeps_most_recent_commands() {
    let mut session = EditorSession::new("");
    for _ in 0..1005 {
        session.perform("doc:newline").unwrap();
    }
    assert_eq!(session.doc().line_count(), 1006);

    let mut undone = 0;
    while session.doc().can_undo() {
        session.perform("doc:undo").unwrap();
        undone += 1;
    }
    assert_eq!(undone, 1000);
    assert_eq!(session.doc().line_count(), 6);
    assert!(session.doc().is_dirty());
}
