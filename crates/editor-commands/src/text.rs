//! Small string helpers shared by the commands. Lengths and columns are in `char`s.

/// Normalize CRLF and lone CR to LF.
pub(crate) fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// The leading run of spaces and tabs.
pub(crate) fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

/// Length in chars of the leading space/tab run.
pub(crate) fn leading_whitespace_len(line: &str) -> usize {
    // Spaces and tabs are single-byte, so byte length equals char length.
    leading_whitespace(line).len()
}

/// Column (1-based) of the first non-whitespace char, or `None` for a blank line.
pub(crate) fn first_non_whitespace_column(line: &str) -> Option<usize> {
    line.chars()
        .position(|c| !c.is_whitespace())
        .map(|idx| idx + 1)
}

/// Returns `true` if the line is empty or whitespace only.
pub(crate) fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

/// Suffix of `s` starting at char index `start` (0-based).
pub(crate) fn char_suffix(s: &str, start: usize) -> &str {
    match s.char_indices().nth(start) {
        Some((byte, _)) => &s[byte..],
        None => "",
    }
}

/// Last `count` chars of `s`.
pub(crate) fn char_tail(s: &str, count: usize) -> &str {
    let len = s.chars().count();
    char_suffix(s, len.saturating_sub(count))
}
