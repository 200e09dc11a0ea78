//! Line-scoped editing operations.
//!
//! Each operation works on the [`normalized_selection`] of the document and touches whole lines.
//! A range that ends on the last line first gets a trailing empty line appended
//! ([`Document::ensure_trailing_line`]) so every line in range has a terminator to move or copy.

use crate::document::Document;
use crate::selection::{END_OF_LINE, Position, Selection, normalized_selection};
use crate::text::{char_suffix, first_non_whitespace_column, is_blank};

/// `doc:duplicate-lines`: copy the touched lines below themselves; the selection follows the copy.
pub fn duplicate_lines(doc: &mut Document) {
    let range = normalized_selection(doc, true);
    let (line1, line2) = (range.line1(), range.line2());
    doc.ensure_trailing_line(line2);

    let text = doc.get_text(Position::new(line1, 1), Position::new(line2 + 1, 1));
    doc.insert(Position::new(line2 + 1, 1), &text);

    let n = range.line_span();
    doc.set_selection(Selection::from_sorted(
        Position::new(line1 + n, range.start.column),
        Position::new(line2 + n, range.end.column),
        range.swap,
    ));
}

/// `doc:delete-lines`: remove the touched lines including their terminators.
pub fn delete_lines(doc: &mut Document) {
    let range = normalized_selection(doc, true);
    let (line1, line2) = (range.line1(), range.line2());
    doc.ensure_trailing_line(line2);

    doc.remove(Position::new(line1, 1), Position::new(line2 + 1, 1));
    doc.set_caret(Position::new(line1, range.start.column));
}

/// `doc:move-lines-up`: rotate the line above the range to just below it.
pub fn move_lines_up(doc: &mut Document) {
    let range = normalized_selection(doc, true);
    let (line1, line2) = (range.line1(), range.line2());
    if line1 <= 1 {
        return;
    }
    doc.ensure_trailing_line(line2);

    let text = doc.get_text(Position::new(line1 - 1, 1), Position::new(line1, 1));
    doc.insert(Position::new(line2 + 1, 1), &text);
    doc.remove(Position::new(line1 - 1, 1), Position::new(line1, 1));
    doc.set_selection(Selection::from_sorted(
        Position::new(line1 - 1, range.start.column),
        Position::new(line2 - 1, range.end.column),
        range.swap,
    ));
}

/// `doc:move-lines-down`: rotate the line below the range to just above it.
///
/// A range that already includes the last line is left alone.
pub fn move_lines_down(doc: &mut Document) {
    let range = normalized_selection(doc, true);
    let (line1, line2) = (range.line1(), range.line2());
    if line2 >= doc.line_count() {
        return;
    }
    doc.ensure_trailing_line(line2 + 1);

    let text = doc.get_text(Position::new(line2 + 1, 1), Position::new(line2 + 2, 1));
    doc.remove(Position::new(line2 + 1, 1), Position::new(line2 + 2, 1));
    doc.insert(Position::new(line1, 1), &text);
    doc.set_selection(Selection::from_sorted(
        Position::new(line1 + 1, range.start.column),
        Position::new(line2 + 1, range.end.column),
        range.swap,
    ));
}

/// Collapse newlines and the indentation after them: a single space separates joined segments,
/// nothing is inserted after a blank segment.
pub(crate) fn join_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut segments = text.split('\n').peekable();
    let mut first = true;
    while let Some(segment) = segments.next() {
        let segment = if first {
            segment
        } else {
            segment.trim_start_matches([' ', '\t'])
        };
        first = false;
        out.push_str(segment);
        if segments.peek().is_some() && !is_blank(segment) {
            out.push(' ');
        }
    }
    out
}

/// `doc:join-lines`: join the selected lines, or the caret line with the next one.
pub fn join_lines(doc: &mut Document) {
    let (start, end, _) = doc.selection().sorted();
    let line1 = start.line;
    let line2 = if start.line == end.line {
        end.line + 1
    } else {
        end.line
    };
    if line2 > doc.line_count() {
        return;
    }

    let had_selection = doc.has_selection();
    let caret = doc.caret();
    let from = Position::new(line1, 1);
    let to = Position::new(line2, END_OF_LINE);
    let joined = join_text(&doc.get_text(from, to));

    doc.remove(from, to);
    doc.insert(from, &joined);
    if had_selection {
        doc.set_caret(Position::line_end(line1));
    } else {
        doc.set_caret(caret);
    }
}

/// `doc:toggle-line-comments`: comment or uncomment the touched lines with the document's line
/// comment token. Does nothing when the language has no such token.
///
/// The range is uncommented only when every non-blank line already starts with `token + " "`;
/// otherwise `token + " "` is inserted into each non-blank line at the shallowest indentation.
pub fn toggle_line_comments(doc: &mut Document) {
    let Some(comment) = doc.line_comment() else {
        return;
    };
    let comment_text = format!("{comment} ");
    let comment_len = comment_text.chars().count();

    let range = normalized_selection(doc, true);
    let (line1, line2) = (range.line1(), range.line2());

    let mut uncomment = true;
    let mut start_column = usize::MAX;
    for line in line1..=line2 {
        let text = doc.line(line);
        if let Some(column) = first_non_whitespace_column(&text)
            && !char_suffix(&text, column - 1).starts_with(&comment_text)
        {
            uncomment = false;
            start_column = start_column.min(column);
        }
    }

    for line in line1..=line2 {
        let text = doc.line(line);
        let first = first_non_whitespace_column(&text);
        if uncomment {
            let search_from = first.unwrap_or(1) - 1;
            let tail = char_suffix(&text, search_from);
            if let Some(byte) = tail.find(&comment_text) {
                let column = search_from + tail[..byte].chars().count() + 1;
                doc.remove(
                    Position::new(line, column),
                    Position::new(line, column + comment_len),
                );
            }
        } else if first.is_some() {
            doc.insert(Position::new(line, start_column), &comment_text);
        }
    }
}
