//! View collaborator: the visible line range, scroll requests and tab-aware visual columns.
//!
//! Rendering lives outside this crate. The commands only need to know which lines are visible
//! (for page movement), how wide a tab is (to keep the caret's visual x on vertical movement), and
//! a way to ask for a scroll.

use unicode_width::UnicodeWidthChar;

/// What the commands need from the view showing the document.
pub trait View {
    /// First and last visible lines (1-based, inclusive).
    fn visible_line_range(&self) -> (usize, usize);

    /// Ask the view to bring `line` into view, optionally centering it.
    fn scroll_to_line(&mut self, line: usize, center: bool);

    /// Width of a tab stop in cells.
    fn tab_width(&self) -> usize {
        4
    }
}

/// A recorded scroll request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    /// Target line.
    pub line: usize,
    /// Whether centering was requested.
    pub center: bool,
}

/// A headless viewport: a window of `height` lines starting at `scroll_top`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// First visible line (1-based).
    pub scroll_top: usize,
    /// Number of visible lines.
    pub height: usize,
    /// Tab stop width in cells.
    pub tab_width: usize,
    /// The last scroll request, if any.
    pub last_scroll: Option<ScrollRequest>,
}

impl ViewState {
    /// Create a viewport showing `height` lines from the top.
    pub fn new(height: usize) -> Self {
        Self {
            scroll_top: 1,
            height: height.max(1),
            tab_width: 4,
            last_scroll: None,
        }
    }

    /// Builder: set the tab width.
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width.max(1);
        self
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(40)
    }
}

impl View for ViewState {
    fn visible_line_range(&self) -> (usize, usize) {
        (self.scroll_top, self.scroll_top + self.height - 1)
    }

    fn scroll_to_line(&mut self, line: usize, center: bool) {
        let line = line.max(1);
        if center {
            self.scroll_top = line.saturating_sub(self.height / 2).max(1);
        } else {
            let (first, last) = self.visible_line_range();
            if line < first {
                self.scroll_top = line;
            } else if line > last {
                self.scroll_top = line + 1 - self.height;
            }
        }
        self.last_scroll = Some(ScrollRequest { line, center });
    }

    fn tab_width(&self) -> usize {
        self.tab_width
    }
}

/// Visual width of `ch` at cell offset `x`; tabs advance to the next tab stop.
pub fn cell_width_at(ch: char, x: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        let tab_width = tab_width.max(1);
        tab_width - x % tab_width
    } else {
        UnicodeWidthChar::width(ch).unwrap_or(1)
    }
}

/// Cell offset of a 1-based column within `line`.
pub fn visual_x_for_column(line: &str, column: usize, tab_width: usize) -> usize {
    line.chars()
        .take(column.saturating_sub(1))
        .fold(0, |x, ch| x + cell_width_at(ch, x, tab_width))
}

/// The 1-based column whose cell range contains `x` (snapping to the nearer edge of wide cells);
/// past the end of the line this is `len + 1`.
pub fn column_for_visual_x(line: &str, x: usize, tab_width: usize) -> usize {
    let mut cell = 0;
    for (idx, ch) in line.chars().enumerate() {
        let width = cell_width_at(ch, cell, tab_width);
        if x < cell + width {
            return if x - cell > width / 2 { idx + 2 } else { idx + 1 };
        }
        cell += width;
    }
    line.chars().count() + 1
}
