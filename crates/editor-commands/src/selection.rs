//! Positions, selections and the normalized line range used by line-scoped commands.
//!
//! Coordinates are 1-based. A column may equal `line_len + 1` ("after the last character");
//! [`END_OF_LINE`] may be passed anywhere a column is accepted and is clamped to that value.

use crate::document::Document;
use std::cmp::Ordering;

/// Column sentinel meaning "end of line"; clamped by [`Document::sanitize`].
pub const END_OF_LINE: usize = usize::MAX;

/// Position coordinates (1-based line and column numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// 1-based logical line.
    pub line: usize,
    /// 1-based column in characters within the logical line.
    pub column: usize,
}

impl Position {
    /// Create a new logical position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The end of `line` (clamped to the real line length when used).
    pub fn line_end(line: usize) -> Self {
        Self::new(line, END_OF_LINE)
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Selection direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionDirection {
    /// The caret is at the end of the selected range.
    Forward,
    /// The caret is at the start of the selected range.
    Backward,
}

/// A selection: the `anchor` stays fixed while extending, `active` is the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Caret end.
    pub active: Position,
    /// Fixed end.
    pub anchor: Position,
}

impl Selection {
    /// Create a selection from its caret and anchor ends.
    pub fn new(active: Position, anchor: Position) -> Self {
        Self { active, anchor }
    }

    /// A collapsed selection (caret only).
    pub fn caret(pos: Position) -> Self {
        Self::new(pos, pos)
    }

    /// Returns `true` if anchor and caret coincide.
    pub fn is_empty(&self) -> bool {
        self.active == self.anchor
    }

    /// Ordered ends plus the swap flag.
    ///
    /// `swap` is `true` when the caret is the later end, so that
    /// [`Selection::from_sorted`] can put the caret back where it was.
    pub fn sorted(&self) -> (Position, Position, bool) {
        if self.active <= self.anchor {
            (self.active, self.anchor, false)
        } else {
            (self.anchor, self.active, true)
        }
    }

    /// Rebuild a selection from ordered ends and a swap flag.
    pub fn from_sorted(start: Position, end: Position, swap: bool) -> Self {
        if swap {
            Self::new(end, start)
        } else {
            Self::new(start, end)
        }
    }

    /// Direction of the selection relative to the caret.
    pub fn direction(&self) -> SelectionDirection {
        if self.anchor <= self.active {
            SelectionDirection::Forward
        } else {
            SelectionDirection::Backward
        }
    }
}

/// A selection rewritten for line-scoped commands (see [`normalized_selection`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    /// Start of the range.
    pub start: Position,
    /// End of the range.
    pub end: Position,
    /// Whether the caret sat on the `end` side (see [`Selection::sorted`]).
    pub swap: bool,
}

impl LineRange {
    /// First line in range.
    pub fn line1(&self) -> usize {
        self.start.line
    }

    /// Last line in range.
    pub fn line2(&self) -> usize {
        self.end.line
    }

    /// Number of lines spanned (inclusive).
    pub fn line_span(&self) -> usize {
        self.end.line.saturating_sub(self.start.line) + 1
    }
}

/// Fetch the document selection as a line range.
///
/// With `sort`, the ends are ordered. When the range ends at column 1 of a line after its start
/// line, the end is pulled back to the end of the previous line, so a selection that stops at a
/// line boundary does not drag in the following line.
pub fn normalized_selection(doc: &Document, sort: bool) -> LineRange {
    let selection = doc.selection();
    let (mut start, mut end, swap) = if sort {
        selection.sorted()
    } else {
        (selection.active, selection.anchor, false)
    };

    if end.line > start.line && end.column == 1 {
        let line = end.line - 1;
        end = Position::new(line, doc.line_len(line) + 1);
    }
    // Unsorted ranges may run backwards; keep the start column valid regardless.
    start = doc.sanitize(start);

    LineRange { start, end, swap }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_reports_swap_when_caret_is_later() {
        let sel = Selection::new(Position::new(3, 2), Position::new(1, 5));
        let (start, end, swap) = sel.sorted();
        assert_eq!(start, Position::new(1, 5));
        assert_eq!(end, Position::new(3, 2));
        assert!(swap);
        assert_eq!(Selection::from_sorted(start, end, swap), sel);
    }

    #[test]
    fn test_from_sorted_without_swap_puts_caret_first() {
        let sel = Selection::from_sorted(Position::new(1, 1), Position::new(2, 1), false);
        assert_eq!(sel.active, Position::new(1, 1));
        assert_eq!(sel.direction(), SelectionDirection::Backward);
    }

    #[test]
    fn test_caret_is_empty() {
        assert!(Selection::caret(Position::new(4, 4)).is_empty());
    }

    #[test]
    fn test_normalized_selection_pulls_back_line_boundary_end() {
        let mut doc = Document::new("one\ntwo\nthree");
        doc.set_selection(Selection::new(Position::new(3, 1), Position::new(1, 2)));

        let range = normalized_selection(&doc, true);
        assert_eq!(range.start, Position::new(1, 2));
        assert_eq!(range.end, Position::new(2, 4));
        assert!(range.swap);
        assert_eq!(range.line_span(), 2);
    }

    #[test]
    fn test_normalized_selection_keeps_single_line_caret() {
        let mut doc = Document::new("one\ntwo");
        doc.set_caret(Position::new(2, 1));

        let range = normalized_selection(&doc, true);
        assert_eq!(range.start, Position::new(2, 1));
        assert_eq!(range.end, Position::new(2, 1));
        assert!(!range.swap);
    }
}
