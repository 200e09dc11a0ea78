//! Line ending helpers.
//!
//! Documents store text internally using LF (`'\n'`) newlines.
//! When opening a file that uses CRLF (`"\r\n"`), the content is normalized on load, but the
//! preferred line ending is tracked for saving and can be flipped by `doc:toggle-line-ending`.

/// The preferred newline sequence used when saving a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix-style LF (`'\n'`).
    #[default]
    Lf,
    /// Windows-style CRLF (`"\r\n"`).
    Crlf,
}

impl LineEnding {
    /// Detect the dominant line ending from a source text.
    ///
    /// Policy: if the input contains any CRLF (`"\r\n"`), returns [`LineEnding::Crlf`],
    /// otherwise [`LineEnding::Lf`].
    pub fn detect_in_text(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::Crlf
        } else {
            Self::Lf
        }
    }

    /// Convert an LF-normalized text to this line ending for saving.
    pub fn apply_to_text(self, text: &str) -> String {
        match self {
            Self::Lf => text.to_string(),
            Self::Crlf => text.replace('\n', "\r\n"),
        }
    }

    /// The other line ending.
    pub fn toggled(self) -> Self {
        match self {
            Self::Lf => Self::Crlf,
            Self::Crlf => Self::Lf,
        }
    }

    /// Returns `true` for [`LineEnding::Crlf`].
    pub fn is_crlf(self) -> bool {
        self == Self::Crlf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_and_apply() {
        assert_eq!(LineEnding::detect_in_text("a\r\nb"), LineEnding::Crlf);
        assert_eq!(LineEnding::detect_in_text("a\nb"), LineEnding::Lf);
        assert_eq!(LineEnding::Crlf.apply_to_text("a\nb\n"), "a\r\nb\r\n");
        assert_eq!(LineEnding::Lf.apply_to_text("a\nb"), "a\nb");
    }

    #[test]
    fn test_toggled_round_trips() {
        assert_eq!(LineEnding::Lf.toggled(), LineEnding::Crlf);
        assert_eq!(LineEnding::Lf.toggled().toggled(), LineEnding::Lf);
        assert!(LineEnding::Crlf.is_crlf());
    }
}
