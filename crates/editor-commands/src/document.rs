//! Document: rope-backed text, the selection, undo history and persistence.
//!
//! This is the buffer collaborator the commands operate on. All coordinates are 1-based
//! [`Position`]s; columns count Unicode scalar values. Text is stored with LF newlines only,
//! the line ending used for saving is tracked separately (see [`LineEnding`]).
//!
//! # Example
//!
//! ```rust
//! use editor_commands::{Document, Position};
//!
//! let mut doc = Document::new("Hello\nWorld");
//! doc.insert(Position::new(2, 6), "!");
//! assert_eq!(doc.text(), "Hello\nWorld!");
//! assert_eq!(doc.line_count(), 2);
//! ```

use crate::line_ending::LineEnding;
use crate::selection::{Position, Selection};
use crate::text::normalize_newlines;
use editor_commands_lang::{Syntax, SyntaxSet};
use ropey::Rope;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by document persistence.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Reading the file failed.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Writing the file failed.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Saving in place was requested but the document was never saved.
    #[error("document has no filename")]
    NoFilename,
}

#[derive(Debug, Clone)]
struct TextEdit {
    start: usize,
    deleted_text: String,
    inserted_text: String,
}

impl TextEdit {
    fn deleted_len(&self) -> usize {
        self.deleted_text.chars().count()
    }

    fn inserted_len(&self) -> usize {
        self.inserted_text.chars().count()
    }
}

#[derive(Debug, Clone)]
struct UndoStep {
    group_id: usize,
    edit: TextEdit,
    before_selection: Selection,
    after_selection: Selection,
}

#[derive(Debug)]
struct UndoRedoManager {
    undo_stack: Vec<UndoStep>,
    redo_stack: Vec<UndoStep>,
    max_undo: usize,
    /// Clean point tracking. Uses `undo_stack.len()` as the saved position in the linear history.
    /// When `redo_stack` is non-empty, `clean_index` may be greater than `undo_stack.len()`.
    clean_index: Option<usize>,
    next_group_id: usize,
    open_group_id: Option<usize>,
}

impl UndoRedoManager {
    fn new(max_undo: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_undo,
            clean_index: Some(0),
            next_group_id: 0,
            open_group_id: None,
        }
    }

    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn is_clean(&self) -> bool {
        self.clean_index == Some(self.undo_stack.len())
    }

    fn mark_clean(&mut self) {
        self.clean_index = Some(self.undo_stack.len());
        self.end_group();
    }

    fn end_group(&mut self) {
        self.open_group_id = None;
    }

    fn open_step_mut(&mut self) -> Option<&mut UndoStep> {
        let open = self.open_group_id?;
        self.undo_stack.last_mut().filter(|step| step.group_id == open)
    }

    fn clear_redo_and_adjust_clean(&mut self) {
        if self.redo_stack.is_empty() {
            return;
        }

        // If clean point is in redo area, it becomes unreachable after clearing redo.
        if let Some(clean_index) = self.clean_index
            && clean_index > self.undo_stack.len()
        {
            self.clean_index = None;
        }

        self.redo_stack.clear();
    }

    fn push_step(&mut self, mut step: UndoStep) {
        self.clear_redo_and_adjust_clean();

        // Only whole closed groups are evicted; the open group always survives.
        if self.open_group_id.is_none() {
            while self.group_count() >= self.max_undo.max(1) {
                self.evict_oldest_group();
            }
        }

        let group_id = match self.open_group_id {
            Some(open) => open,
            None => {
                let id = self.next_group_id;
                self.next_group_id = self.next_group_id.wrapping_add(1);
                id
            }
        };
        step.group_id = group_id;
        self.open_group_id = Some(group_id);
        self.undo_stack.push(step);
    }

    fn group_count(&self) -> usize {
        self.undo_stack
            .chunk_by(|a, b| a.group_id == b.group_id)
            .count()
    }

    fn evict_oldest_group(&mut self) {
        let Some(oldest) = self.undo_stack.first().map(|s| s.group_id) else {
            return;
        };
        let len = self
            .undo_stack
            .iter()
            .take_while(|s| s.group_id == oldest)
            .count();
        self.undo_stack.drain(..len);
        self.clean_index = match self.clean_index {
            Some(clean_index) if clean_index >= len => Some(clean_index - len),
            _ => None,
        };
    }

    /// Pops the newest group; steps are returned newest first.
    fn pop_undo_group(&mut self) -> Option<Vec<UndoStep>> {
        let last_group_id = self.undo_stack.last().map(|s| s.group_id)?;
        let mut steps = Vec::new();
        while let Some(step) = self.undo_stack.pop_if(|s| s.group_id == last_group_id) {
            steps.push(step);
        }
        Some(steps)
    }

    /// Pops the next group to redo; steps are returned oldest first.
    fn pop_redo_group(&mut self) -> Option<Vec<UndoStep>> {
        let group_id = self.redo_stack.last().map(|s| s.group_id)?;
        let mut steps = Vec::new();
        while let Some(step) = self.redo_stack.pop_if(|s| s.group_id == group_id) {
            steps.push(step);
        }
        Some(steps)
    }
}

/// Shift a char offset across an edit that replaced `deleted` chars at `start` with `inserted`
/// chars. Offsets at or before `start` stay; offsets inside the removed range collapse to `start`.
fn shift_offset(offset: usize, start: usize, deleted: usize, inserted: usize) -> usize {
    if offset <= start {
        offset
    } else if offset < start + deleted {
        start
    } else {
        offset - deleted + inserted
    }
}

/// An open text document.
pub struct Document {
    rope: Rope,
    selection: Selection,
    history: UndoRedoManager,
    filename: Option<PathBuf>,
    line_ending: LineEnding,
    syntax: Syntax,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("line_count", &self.line_count())
            .field("selection", &self.selection)
            .field("filename", &self.filename)
            .field("line_ending", &self.line_ending)
            .field("syntax", &self.syntax.name)
            .finish()
    }
}

impl Document {
    /// Create a document from text. CRLF / CR newlines are normalized to LF; the original line
    /// ending is remembered for saving.
    pub fn new(text: &str) -> Self {
        let line_ending = LineEnding::detect_in_text(text);
        Self {
            rope: Rope::from_str(&normalize_newlines(text)),
            selection: Selection::caret(Position::new(1, 1)),
            history: UndoRedoManager::new(1000),
            filename: None,
            line_ending,
            syntax: Syntax::plain_text(),
        }
    }

    /// Create an empty, unsaved document.
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Load a document from disk and pick its syntax from the filename.
    pub fn open(path: impl AsRef<Path>, syntaxes: &SyntaxSet) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut doc = Self::new(&text);
        doc.filename = Some(path.to_path_buf());
        doc.reset_syntax(syntaxes);
        Ok(doc)
    }

    // ---- queries -------------------------------------------------------------------------

    /// Full text (LF newlines).
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Number of lines; never zero. `N` newlines make `N + 1` lines.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Text of a line without its newline; empty for out-of-range lines.
    pub fn line(&self, line: usize) -> String {
        if line == 0 || line > self.line_count() {
            return String::new();
        }
        let mut text = self.rope.line(line - 1).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        text
    }

    /// Length of a line in chars (excluding the newline).
    pub fn line_len(&self, line: usize) -> usize {
        if line == 0 || line > self.line_count() {
            return 0;
        }
        let slice = self.rope.line(line - 1);
        let len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    /// Clamp a position into the document.
    pub fn sanitize(&self, pos: Position) -> Position {
        let line = pos.line.clamp(1, self.line_count());
        let column = pos.column.clamp(1, self.line_len(line) + 1);
        Position::new(line, column)
    }

    /// Position after the last character of the document.
    pub fn end_of_doc(&self) -> Position {
        let line = self.line_count();
        Position::new(line, self.line_len(line) + 1)
    }

    /// Char offset of a (sanitized) position.
    pub fn char_index(&self, pos: Position) -> usize {
        let pos = self.sanitize(pos);
        self.rope.line_to_char(pos.line - 1) + pos.column - 1
    }

    /// Position of a char offset (clamped to the document length).
    pub fn position_at(&self, char_index: usize) -> Position {
        let char_index = char_index.min(self.rope.len_chars());
        let line = self.rope.char_to_line(char_index);
        let column = char_index - self.rope.line_to_char(line) + 1;
        Position::new(line + 1, column)
    }

    /// The char at a position; `'\n'` at (or past) the end of a line.
    pub fn char_at(&self, pos: Position) -> char {
        let pos = self.sanitize(pos);
        if pos.column > self.line_len(pos.line) {
            '\n'
        } else {
            self.rope.char(self.char_index(pos))
        }
    }

    /// Move a position by `delta` chars, crossing line boundaries, clamped to the document.
    pub fn offset_position(&self, pos: Position, delta: isize) -> Position {
        let index = self.char_index(pos).saturating_add_signed(delta);
        self.position_at(index.min(self.rope.len_chars()))
    }

    /// Text between two positions (in either order).
    pub fn get_text(&self, a: Position, b: Position) -> String {
        let (start, end) = self.ordered_indices(a, b);
        self.rope.slice(start..end).to_string()
    }

    fn ordered_indices(&self, a: Position, b: Position) -> (usize, usize) {
        let a = self.char_index(a);
        let b = self.char_index(b);
        (a.min(b), a.max(b))
    }

    pub(crate) fn rope(&self) -> &Rope {
        &self.rope
    }

    // ---- selection -----------------------------------------------------------------------

    /// Current selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Caret position (the selection's active end).
    pub fn caret(&self) -> Position {
        self.selection.active
    }

    /// Set the selection; both ends are sanitized.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = Selection::new(
            self.sanitize(selection.active),
            self.sanitize(selection.anchor),
        );
    }

    /// Collapse the selection to a caret.
    pub fn set_caret(&mut self, pos: Position) {
        self.set_selection(Selection::caret(pos));
    }

    /// Returns `true` if anchor and caret differ.
    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Text covered by the selection.
    pub fn selected_text(&self) -> String {
        self.get_text(self.selection.active, self.selection.anchor)
    }

    // ---- editing -------------------------------------------------------------------------

    /// Insert text at a position. Newlines are normalized to LF.
    pub fn insert(&mut self, pos: Position, text: &str) {
        let text = normalize_newlines(text);
        if text.is_empty() {
            return;
        }
        let start = self.char_index(pos);
        self.record_edit(start, 0, &text);
    }

    /// Remove the text between two positions (in either order).
    pub fn remove(&mut self, a: Position, b: Position) {
        let (start, end) = self.ordered_indices(a, b);
        if start == end {
            return;
        }
        self.record_edit(start, end - start, "");
    }

    /// Remove the selected text and collapse to its start. No-op without a selection.
    pub fn delete_selection(&mut self) {
        let (start, end, _) = self.selection.sorted();
        if start == end {
            return;
        }
        self.remove(start, end);
        self.set_caret(start);
    }

    /// Typed-text semantics: replace the selection (if any) and leave the caret after `text`.
    pub fn text_input(&mut self, text: &str) {
        self.delete_selection();
        let text = normalize_newlines(text);
        let caret = self.sanitize(self.selection.active);
        self.insert(caret, &text);
        let after = self.char_index(caret) + text.chars().count();
        self.set_caret(self.position_at(after));
    }

    /// Transform the selected text in place (the whole document when nothing is selected).
    ///
    /// With a selection, the transformed text stays selected with the caret on the same side.
    pub fn replace(&mut self, f: impl FnOnce(&str) -> String) {
        let had_selection = self.has_selection();
        let caret = self.selection.active;
        let (start, end, swap) = if had_selection {
            self.selection.sorted()
        } else {
            (Position::new(1, 1), self.end_of_doc(), false)
        };

        let old_text = self.get_text(start, end);
        let new_text = f(&old_text);
        if old_text == new_text {
            return;
        }

        self.remove(start, end);
        self.insert(start, &new_text);
        if had_selection {
            let new_end = self.position_at(self.char_index(start) + new_text.chars().count());
            self.set_selection(Selection::from_sorted(start, new_end, swap));
        } else {
            self.set_caret(caret);
        }
    }

    /// If `line` is the last line (or beyond), append an empty line so a following line exists.
    pub fn ensure_trailing_line(&mut self, line: usize) {
        let last = self.line_count();
        if line >= last {
            self.insert(Position::line_end(last), "\n");
        }
    }

    fn record_edit(&mut self, start: usize, delete_len: usize, insert: &str) {
        let before_selection = self.selection;
        let deleted_text = self.rope.slice(start..start + delete_len).to_string();
        self.apply_edit(start, delete_len, insert);
        self.history.push_step(UndoStep {
            group_id: 0,
            edit: TextEdit {
                start,
                deleted_text,
                inserted_text: insert.to_string(),
            },
            before_selection,
            after_selection: self.selection,
        });
    }

    fn apply_edit(&mut self, start: usize, delete_len: usize, insert: &str) {
        let active = self.char_index(self.selection.active);
        let anchor = self.char_index(self.selection.anchor);

        if delete_len > 0 {
            self.rope.remove(start..start + delete_len);
        }
        let inserted_len = insert.chars().count();
        if inserted_len > 0 {
            self.rope.insert(start, insert);
        }

        let active = shift_offset(active, start, delete_len, inserted_len);
        let anchor = shift_offset(anchor, start, delete_len, inserted_len);
        self.selection = Selection::new(self.position_at(active), self.position_at(anchor));
    }

    // ---- history -------------------------------------------------------------------------

    /// Close the open undo group; the next edit starts a new one.
    pub fn end_undo_group(&mut self) {
        let selection = self.selection;
        if let Some(step) = self.history.open_step_mut() {
            step.after_selection = selection;
        }
        self.history.end_group();
    }

    /// Undo the newest group of edits. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.end_undo_group();
        let Some(steps) = self.history.pop_undo_group() else {
            return false;
        };

        for step in &steps {
            let edit = &step.edit;
            self.apply_edit(edit.start, edit.inserted_len(), &edit.deleted_text);
        }
        if let Some(oldest) = steps.last() {
            self.set_selection(oldest.before_selection);
        }
        self.history.redo_stack.extend(steps);
        true
    }

    /// Redo the most recently undone group. Returns `false` if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.end_undo_group();
        let Some(steps) = self.history.pop_redo_group() else {
            return false;
        };

        for step in &steps {
            let edit = &step.edit;
            self.apply_edit(edit.start, edit.deleted_len(), &edit.inserted_text);
        }
        if let Some(newest) = steps.last() {
            self.set_selection(newest.after_selection);
        }
        self.history.undo_stack.extend(steps);
        true
    }

    /// Can undo
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Can redo
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Returns `true` if the text differs from the last saved (or initial) state.
    pub fn is_dirty(&self) -> bool {
        !self.history.is_clean()
    }

    // ---- metadata & persistence ----------------------------------------------------------

    /// Path the document is saved to, if any.
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Display name: the path, or `unsaved`.
    pub fn name(&self) -> String {
        self.filename
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "unsaved".to_string())
    }

    /// Preferred line ending for saving.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Set the preferred line ending.
    pub fn set_line_ending(&mut self, line_ending: LineEnding) {
        self.line_ending = line_ending;
    }

    /// Flip between LF and CRLF. The text itself is untouched until the next save.
    pub fn toggle_line_ending(&mut self) {
        self.line_ending = self.line_ending.toggled();
    }

    /// Language of the document.
    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    /// Set the language explicitly.
    pub fn set_syntax(&mut self, syntax: Syntax) {
        self.syntax = syntax;
    }

    /// Pick the syntax from the current filename (plain text when unsaved).
    pub fn reset_syntax(&mut self, syntaxes: &SyntaxSet) {
        self.syntax = match &self.filename {
            Some(path) => syntaxes.match_filename(&path.to_string_lossy()).clone(),
            None => Syntax::plain_text(),
        };
    }

    /// Line comment token of the document's language.
    pub fn line_comment(&self) -> Option<&str> {
        self.syntax.line_comment()
    }

    /// Write the document to `path` (or its current filename) using the preferred line ending.
    ///
    /// On success the document adopts `path` as its filename and becomes clean.
    pub fn save(&mut self, path: Option<&Path>) -> Result<(), DocumentError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => self.filename.clone().ok_or(DocumentError::NoFilename)?,
        };

        let contents = self.line_ending.apply_to_text(&self.text());
        std::fs::write(&path, contents).map_err(|source| DocumentError::Write {
            path: path.clone(),
            source,
        })?;

        self.filename = Some(path);
        self.history.mark_clean();
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::END_OF_LINE;

    #[test]
    fn test_line_queries() {
        let doc = Document::new("ab\n你好\n");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line(2), "你好");
        assert_eq!(doc.line_len(2), 2);
        assert_eq!(doc.line(3), "");
        assert_eq!(doc.line(9), "");
        assert_eq!(doc.end_of_doc(), Position::new(3, 1));
    }

    #[test]
    fn test_crlf_is_normalized_and_remembered() {
        let doc = Document::new("a\r\nb\r\n");
        assert_eq!(doc.text(), "a\nb\n");
        assert_eq!(doc.line_ending(), LineEnding::Crlf);

        let doc = Document::new("a\rb");
        assert_eq!(doc.line(2), "b");
    }

    #[test]
    fn test_sanitize_clamps_line_and_column() {
        let doc = Document::new("abc\nde");
        assert_eq!(doc.sanitize(Position::new(0, 0)), Position::new(1, 1));
        assert_eq!(doc.sanitize(Position::new(1, END_OF_LINE)), Position::new(1, 4));
        assert_eq!(doc.sanitize(Position::new(7, 2)), Position::new(2, 2));
    }

    #[test]
    fn test_char_index_round_trip_and_char_at() {
        let doc = Document::new("ABC\nDEF");
        assert_eq!(doc.char_index(Position::new(2, 1)), 4);
        assert_eq!(doc.position_at(4), Position::new(2, 1));
        assert_eq!(doc.position_at(100), Position::new(2, 4));
        assert_eq!(doc.char_at(Position::new(1, 2)), 'B');
        assert_eq!(doc.char_at(Position::new(1, 4)), '\n');
        assert_eq!(doc.offset_position(Position::new(1, 4), 1), Position::new(2, 1));
        assert_eq!(doc.offset_position(Position::new(1, 1), -3), Position::new(1, 1));
    }

    #[test]
    fn test_insert_shifts_caret_after_insertion_point() {
        let mut doc = Document::new("hello world");
        doc.set_caret(Position::new(1, 7));
        doc.insert(Position::new(1, 1), ">> ");
        assert_eq!(doc.caret(), Position::new(1, 10));

        // A caret exactly at the insertion point stays put.
        doc.insert(Position::new(1, 10), "big ");
        assert_eq!(doc.text(), ">> hello big world");
        assert_eq!(doc.caret(), Position::new(1, 10));
    }

    #[test]
    fn test_remove_collapses_selection_inside_range() {
        let mut doc = Document::new("one\ntwo\nthree");
        doc.set_selection(Selection::new(Position::new(2, 2), Position::new(3, 3)));
        doc.remove(Position::new(1, 4), Position::new(2, 3));
        assert_eq!(doc.text(), "oneo\nthree");
        assert_eq!(doc.selection().active, Position::new(1, 4));
        assert_eq!(doc.selection().anchor, Position::new(2, 3));
    }

    #[test]
    fn test_text_input_replaces_selection() {
        let mut doc = Document::new("hello world");
        doc.set_selection(Selection::new(Position::new(1, 12), Position::new(1, 7)));
        doc.text_input("rust\n");
        assert_eq!(doc.text(), "hello rust\n");
        assert_eq!(doc.caret(), Position::new(2, 1));
        assert!(!doc.has_selection());
    }

    #[test]
    fn test_replace_keeps_selection_side() {
        let mut doc = Document::new("abc def");
        doc.set_selection(Selection::new(Position::new(1, 8), Position::new(1, 5)));
        doc.replace(|s| s.to_uppercase());
        assert_eq!(doc.text(), "abc DEF");
        assert_eq!(doc.selection().active, Position::new(1, 8));
        assert_eq!(doc.selection().anchor, Position::new(1, 5));
    }

    #[test]
    fn test_replace_without_selection_transforms_everything() {
        let mut doc = Document::new("abc\ndef");
        doc.set_caret(Position::new(2, 2));
        doc.replace(|s| s.to_uppercase());
        assert_eq!(doc.text(), "ABC\nDEF");
        assert_eq!(doc.caret(), Position::new(2, 2));
    }

    #[test]
    fn test_ensure_trailing_line() {
        let mut doc = Document::new("a\nb");
        doc.ensure_trailing_line(1);
        assert_eq!(doc.line_count(), 2);
        doc.ensure_trailing_line(2);
        assert_eq!(doc.text(), "a\nb\n");
        assert_eq!(doc.line_count(), 3);
    }

    #[test]
    fn test_undo_redo_groups_and_selection() {
        let mut doc = Document::new("abc");
        doc.set_caret(Position::new(1, 4));

        doc.insert(Position::new(1, 4), "d");
        doc.insert(Position::new(1, 5), "e");
        doc.set_caret(Position::new(1, 6));
        doc.end_undo_group();

        doc.insert(Position::new(1, 1), "_");
        doc.end_undo_group();
        assert_eq!(doc.text(), "_abcde");

        assert!(doc.undo());
        assert_eq!(doc.text(), "abcde");
        assert!(doc.undo());
        assert_eq!(doc.text(), "abc");
        assert_eq!(doc.caret(), Position::new(1, 4));
        assert!(!doc.undo());

        assert!(doc.redo());
        assert_eq!(doc.text(), "abcde");
        assert_eq!(doc.caret(), Position::new(1, 6));
        assert!(doc.redo());
        assert_eq!(doc.text(), "_abcde");
        assert!(!doc.can_redo());
    }

    #[test]
    fn test_history_cap_evicts_whole_groups() {
        let mut doc = Document::new("");
        doc.history = UndoRedoManager::new(2);

        for _ in 0..5 {
            doc.insert(Position::new(1, 1), "x");
        }
        doc.end_undo_group();
        doc.insert(Position::new(1, 1), "y");
        doc.end_undo_group();
        doc.insert(Position::new(1, 1), "z");
        doc.end_undo_group();
        assert_eq!(doc.text(), "zyxxxxx");

        assert!(doc.undo());
        assert!(doc.undo());
        assert_eq!(doc.text(), "xxxxx");
        assert!(!doc.can_undo());
        assert!(doc.is_dirty());
    }

    #[test]
    fn test_open_group_is_never_evicted() {
        let mut doc = Document::new("");
        doc.history = UndoRedoManager::new(2);

        for _ in 0..10 {
            doc.insert(Position::new(1, 1), "x");
        }
        doc.end_undo_group();
        assert_eq!(doc.text(), "x".repeat(10));

        assert!(doc.undo());
        assert_eq!(doc.text(), "");
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_dirty_tracking_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");

        let mut doc = Document::new("a\r\nb");
        assert!(!doc.is_dirty());
        doc.insert(Position::line_end(2), "c");
        assert!(doc.is_dirty());

        assert!(matches!(doc.save(None), Err(DocumentError::NoFilename)));
        doc.save(Some(&path)).unwrap();
        assert!(!doc.is_dirty());
        assert_eq!(doc.filename(), Some(path.as_path()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\r\nbc");

        doc.undo();
        assert!(doc.is_dirty());
        doc.redo();
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_open_picks_syntax_from_filename() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.rs");
        std::fs::write(&path, "fn main() {}\n").unwrap();

        let doc = Document::open(&path, &SyntaxSet::builtin()).unwrap();
        assert_eq!(doc.line_comment(), Some("//"));
        assert_eq!(doc.line_count(), 2);

        let missing = Document::open(dir.path().join("nope.rs"), &SyntaxSet::builtin());
        assert!(matches!(missing, Err(DocumentError::Read { .. })));
    }
}
