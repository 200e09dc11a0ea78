//! Indentation engine: indent units, leading-whitespace normalisation and `doc:indent` /
//! `doc:unindent`.

use crate::config::{EditorConfig, TabType};
use crate::document::Document;
use crate::selection::{Position, Selection, normalized_selection};
use crate::text::{leading_whitespace, leading_whitespace_len};

/// One indent unit: a tab, or `indent_size` spaces.
pub fn indent_unit(config: &EditorConfig) -> String {
    match config.tab_type {
        TabType::Hard => "\t".to_string(),
        TabType::Soft => " ".repeat(config.indent_size.max(1)),
    }
}

/// Measure a line's leading whitespace and rewrite it in the configured representation.
///
/// Returns the length (in chars) of the raw leading run and the normalised indent text.
///
/// - Hard tabs: every `indent_size` spaces become a tab; leftover space runs become one tab when
///   `round_up`, otherwise they are dropped.
/// - Soft tabs: tabs expand to `indent_size` spaces, then the run is snapped to a whole number
///   of units, padding when rounding up and truncating when rounding down.
pub fn measure_indent(line: &str, round_up: bool, config: &EditorConfig) -> (usize, String) {
    let raw = leading_whitespace(line);
    let size = config.indent_size.max(1);
    let soft_tab = " ".repeat(size);

    let indent = match config.tab_type {
        TabType::Hard => {
            let tabbed = raw.replace(&soft_tab, "\t");
            let mut out = String::with_capacity(tabbed.len());
            let mut in_space_run = false;
            for ch in tabbed.chars() {
                if ch == ' ' {
                    if !in_space_run && round_up {
                        out.push('\t');
                    }
                    in_space_run = true;
                } else {
                    in_space_run = false;
                    out.push(ch);
                }
            }
            out
        }
        TabType::Soft => {
            let spaced = raw.replace('\t', &soft_tab);
            let units = if round_up {
                spaced.len().div_ceil(size)
            } else {
                spaced.len() / size
            };
            " ".repeat(units * size)
        }
    };

    (raw.len(), indent)
}

/// Indent or unindent the lines touched by the selection.
///
/// Line-wise when there is a selection, when unindenting, or when the caret sits inside the
/// leading whitespace of its line; otherwise the indent unit is typed at the caret.
pub fn apply_indent(doc: &mut Document, config: &EditorConfig, unindent: bool) {
    let unit = indent_unit(config);
    let range = normalized_selection(doc, true);
    let (line1, line2) = (range.line1(), range.line2());
    let (col1, col2) = (range.start.column, range.end.column);

    let first_line = doc.line(line1);
    let leading = leading_whitespace_len(&first_line);
    let in_leading_whitespace = col1 == 1 || (leading > 0 && col1 <= leading + 1);
    let had_selection = doc.has_selection();

    if !(unindent || had_selection || in_leading_whitespace) {
        doc.text_input(&unit);
        return;
    }

    let (len1, len2) = (doc.line_len(line1), doc.line_len(line2));
    let unit_len = unit.chars().count();
    for line in line1..=line2 {
        let text = doc.line(line);
        let (raw_end, indent) = measure_indent(&text, !unindent, config);
        let replacement = if unindent {
            let keep = indent.chars().count().saturating_sub(unit_len);
            indent.chars().take(keep).collect()
        } else {
            indent + &unit
        };
        if replacement == text[..raw_end] {
            continue;
        }
        doc.remove(Position::new(line, 1), Position::new(line, raw_end + 1));
        doc.insert(Position::new(line, 1), &replacement);
    }
    let delta1 = doc.line_len(line1) as isize - len1 as isize;
    let delta2 = doc.line_len(line2) as isize - len2 as isize;

    if (unindent || in_leading_whitespace) && !had_selection {
        let column = shift_column(leading + 1, delta1);
        doc.set_selection(Selection::from_sorted(
            Position::new(line1, column),
            Position::new(line2, column),
            range.swap,
        ));
    } else {
        doc.set_selection(Selection::from_sorted(
            Position::new(line1, shift_column(col1, delta1)),
            Position::new(line2, shift_column(col2, delta2)),
            range.swap,
        ));
    }
}

fn shift_column(column: usize, delta: isize) -> usize {
    column.saturating_add_signed(delta).max(1)
}
