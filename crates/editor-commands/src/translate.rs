//! Boundary translations: pure functions mapping a position to another one by a semantic rule.
//!
//! Document translations only look at the text; view translations also need the viewport
//! (visible range for paging, tab width to keep the visual column on vertical moves).
//! [`BOUNDARIES`] is the table the navigation commands are generated from.

use crate::document::Document;
use crate::selection::{END_OF_LINE, Position};
use crate::text::{first_non_whitespace_column, is_blank};
use crate::view::{View, column_for_visual_x, visual_x_for_column};
use unicode_segmentation::UnicodeSegmentation;

/// Characters that separate words.
pub const NON_WORD_CHARS: &str = " \t\n/\\()\"':,.;<>~!@#$%^&*|+=[]{}`?-";

/// A translation that only needs the document.
pub type DocTranslate = fn(&Document, Position) -> Position;

/// A translation that also needs the view.
pub type ViewTranslate = fn(&Document, &dyn View, Position) -> Position;

/// One entry of the boundary table.
#[derive(Clone, Copy)]
pub enum Translation {
    /// Document-only translation.
    Doc(DocTranslate),
    /// View-dependent translation.
    View(ViewTranslate),
}

impl Translation {
    /// Apply the translation; the result is always a valid position.
    pub fn apply(&self, doc: &Document, view: &dyn View, pos: Position) -> Position {
        let pos = doc.sanitize(pos);
        let target = match self {
            Self::Doc(f) => f(doc, pos),
            Self::View(f) => f(doc, view, pos),
        };
        doc.sanitize(target)
    }
}

impl std::fmt::Debug for Translation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Doc(_) => f.write_str("Translation::Doc"),
            Self::View(_) => f.write_str("Translation::View"),
        }
    }
}

/// Boundary names and their translations.
pub const BOUNDARIES: &[(&str, Translation)] = &[
    ("previous-char", Translation::Doc(previous_char)),
    ("next-char", Translation::Doc(next_char)),
    ("previous-word-start", Translation::Doc(previous_word_start)),
    ("next-word-end", Translation::Doc(next_word_end)),
    ("previous-block-start", Translation::Doc(previous_block_start)),
    ("next-block-end", Translation::Doc(next_block_end)),
    ("start-of-doc", Translation::Doc(start_of_doc)),
    ("end-of-doc", Translation::Doc(end_of_doc)),
    ("start-of-line", Translation::Doc(start_of_line)),
    ("end-of-line", Translation::Doc(end_of_line)),
    ("start-of-word", Translation::Doc(start_of_word)),
    ("end-of-word", Translation::Doc(end_of_word)),
    ("previous-line", Translation::View(previous_line)),
    ("next-line", Translation::View(next_line)),
    ("previous-page", Translation::View(previous_page)),
    ("next-page", Translation::View(next_page)),
];

/// Look up a boundary by name.
pub fn boundary(name: &str) -> Option<Translation> {
    BOUNDARIES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, translation)| *translation)
}

fn is_non_word(ch: char) -> bool {
    NON_WORD_CHARS.contains(ch)
}

/// Char offsets (0-based) of the grapheme boundaries of a line, including `0` and the length.
fn grapheme_boundaries(line: &str) -> Vec<usize> {
    let mut boundaries = Vec::new();
    let mut chars = 0;
    for grapheme in line.graphemes(true) {
        boundaries.push(chars);
        chars += grapheme.chars().count();
    }
    boundaries.push(chars);
    boundaries
}

/// One grapheme cluster back; crosses to the end of the previous line at column 1.
pub fn previous_char(doc: &Document, pos: Position) -> Position {
    if pos.column <= 1 {
        return doc.offset_position(pos, -1);
    }
    let current = pos.column - 1;
    let column = grapheme_boundaries(&doc.line(pos.line))
        .into_iter()
        .rev()
        .find(|&b| b < current)
        .unwrap_or(0);
    Position::new(pos.line, column + 1)
}

/// One grapheme cluster forward; crosses to the start of the next line at the line end.
pub fn next_char(doc: &Document, pos: Position) -> Position {
    if pos.column > doc.line_len(pos.line) {
        return doc.offset_position(pos, 1);
    }
    let current = pos.column - 1;
    let column = grapheme_boundaries(&doc.line(pos.line))
        .into_iter()
        .find(|&b| b > current)
        .unwrap_or(current + 1);
    Position::new(pos.line, column + 1)
}

/// Start of the word the position is in (or right after).
pub fn start_of_word(doc: &Document, mut pos: Position) -> Position {
    loop {
        let prev = doc.offset_position(pos, -1);
        if prev == pos || is_non_word(doc.char_at(prev)) {
            return pos;
        }
        pos = prev;
    }
}

/// End of the word the position is in (or right before).
pub fn end_of_word(doc: &Document, mut pos: Position) -> Position {
    loop {
        let next = doc.offset_position(pos, 1);
        if next == pos || is_non_word(doc.char_at(pos)) {
            return pos;
        }
        pos = next;
    }
}

/// Skip back over one run of identical separators, then to the start of the word before it.
pub fn previous_word_start(doc: &Document, mut pos: Position) -> Position {
    let mut prev_char: Option<char> = None;
    while pos.line > 1 || pos.column > 1 {
        let prev = doc.offset_position(pos, -1);
        let ch = doc.char_at(prev);
        if prev_char.is_some_and(|p| p != ch) || !is_non_word(ch) {
            break;
        }
        prev_char = Some(ch);
        pos = prev;
    }
    start_of_word(doc, pos)
}

/// Skip forward over one run of identical separators, then to the end of the word after it.
pub fn next_word_end(doc: &Document, mut pos: Position) -> Position {
    let end = doc.end_of_doc();
    let mut prev_char: Option<char> = None;
    while pos < end {
        let ch = doc.char_at(pos);
        if prev_char.is_some_and(|p| p != ch) || !is_non_word(ch) {
            break;
        }
        pos = doc.offset_position(pos, 1);
        prev_char = Some(ch);
    }
    end_of_word(doc, pos)
}

/// First non-blank line after a blank one, searching upwards.
pub fn previous_block_start(doc: &Document, pos: Position) -> Position {
    let mut line = pos.line;
    loop {
        line -= 1;
        if line <= 1 {
            return Position::new(1, 1);
        }
        let text = doc.line(line);
        if is_blank(&doc.line(line - 1)) && !is_blank(&text) {
            let column = first_non_whitespace_column(&text).unwrap_or(1);
            return Position::new(line, column);
        }
    }
}

/// End of the blank line following a non-blank one, searching downwards.
pub fn next_block_end(doc: &Document, pos: Position) -> Position {
    let count = doc.line_count();
    let mut line = pos.line;
    loop {
        if line >= count {
            return Position::new(count, 1);
        }
        if is_blank(&doc.line(line + 1)) && !is_blank(&doc.line(line)) {
            return Position::line_end(line + 1);
        }
        line += 1;
    }
}

/// Column 1 of the line.
pub fn start_of_line(_doc: &Document, pos: Position) -> Position {
    Position::new(pos.line, 1)
}

/// After the last character of the line.
pub fn end_of_line(_doc: &Document, pos: Position) -> Position {
    Position::line_end(pos.line)
}

/// Line 1, column 1.
pub fn start_of_doc(_doc: &Document, _pos: Position) -> Position {
    Position::new(1, 1)
}

/// After the last character of the document.
pub fn end_of_doc(doc: &Document, _pos: Position) -> Position {
    doc.end_of_doc()
}

/// Same visual x on the line above.
pub fn previous_line(doc: &Document, view: &dyn View, pos: Position) -> Position {
    if pos.line <= 1 {
        return Position::new(1, 1);
    }
    let tab_width = view.tab_width();
    let x = visual_x_for_column(&doc.line(pos.line), pos.column, tab_width);
    let column = column_for_visual_x(&doc.line(pos.line - 1), x, tab_width);
    Position::new(pos.line - 1, column)
}

/// Same visual x on the line below.
pub fn next_line(doc: &Document, view: &dyn View, pos: Position) -> Position {
    let count = doc.line_count();
    if pos.line >= count {
        return Position::new(count, END_OF_LINE);
    }
    let tab_width = view.tab_width();
    let x = visual_x_for_column(&doc.line(pos.line), pos.column, tab_width);
    let column = column_for_visual_x(&doc.line(pos.line + 1), x, tab_width);
    Position::new(pos.line + 1, column)
}

fn page_size(view: &dyn View) -> usize {
    let (first, last) = view.visible_line_range();
    last.saturating_sub(first)
}

/// One page up, column 1.
pub fn previous_page(_doc: &Document, view: &dyn View, pos: Position) -> Position {
    Position::new(pos.line.saturating_sub(page_size(view)).max(1), 1)
}

/// One page down, column 1; the end of the document from its last line.
pub fn next_page(doc: &Document, view: &dyn View, pos: Position) -> Position {
    let count = doc.line_count();
    if pos.line >= count {
        return Position::new(count, END_OF_LINE);
    }
    Position::new(pos.line + page_size(view), 1)
}
