#![warn(missing_docs)]
//! `editor-commands-lang` - data-driven language configuration for `editor-commands`.
//!
//! This crate intentionally stays lightweight: it does not parse or highlight anything. It only
//! answers the two questions the editing commands ask about a document's language:
//!
//! - which language does a filename belong to, and
//! - which token starts a line comment in that language (if any).

use regex::Regex;

/// Language description attached to a document.
#[derive(Debug, Clone)]
pub struct Syntax {
    /// Display name (e.g. `Rust`).
    pub name: String,
    /// Filename patterns; a document matches when any pattern matches its path.
    pub files: Vec<Regex>,
    /// Line comment token (e.g. `//`, `#`). `None` disables comment toggling.
    pub comment: Option<String>,
}

impl Syntax {
    /// Create a syntax from raw filename patterns.
    ///
    /// Returns an error if any pattern is not a valid regular expression.
    pub fn new(
        name: impl Into<String>,
        files: &[&str],
        comment: Option<&str>,
    ) -> Result<Self, regex::Error> {
        let files = files
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: name.into(),
            files,
            comment: comment.map(str::to_string),
        })
    }

    /// The fallback syntax: no filename patterns and no comment token.
    pub fn plain_text() -> Self {
        Self {
            name: "Plain Text".to_string(),
            files: Vec::new(),
            comment: None,
        }
    }

    /// Returns the line comment token if one is configured and non-empty.
    pub fn line_comment(&self) -> Option<&str> {
        self.comment.as_deref().filter(|token| !token.is_empty())
    }

    /// Returns `true` if `filename` matches one of this syntax's patterns.
    pub fn matches(&self, filename: &str) -> bool {
        self.files.iter().any(|re| re.is_match(filename))
    }
}

impl PartialEq for Syntax {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.comment == other.comment
            && self.files.len() == other.files.len()
            && self
                .files
                .iter()
                .zip(&other.files)
                .all(|(a, b)| a.as_str() == b.as_str())
    }
}

impl Eq for Syntax {}

/// An ordered set of syntaxes; later registrations win when several patterns match.
#[derive(Debug, Clone)]
pub struct SyntaxSet {
    syntaxes: Vec<Syntax>,
    plain_text: Syntax,
}

impl SyntaxSet {
    /// Create an empty set (every file resolves to plain text).
    pub fn new() -> Self {
        Self {
            syntaxes: Vec::new(),
            plain_text: Syntax::plain_text(),
        }
    }

    /// A set with comment tokens for a handful of common languages.
    pub fn builtin() -> Self {
        const BUILTIN: &[(&str, &[&str], &str)] = &[
            ("Rust", &[r"\.rs$"], "//"),
            ("C", &[r"\.c$", r"\.h$"], "//"),
            ("C++", &[r"\.cpp$", r"\.cc$", r"\.hpp$"], "//"),
            ("JavaScript", &[r"\.js$", r"\.mjs$", r"\.ts$"], "//"),
            ("Go", &[r"\.go$"], "//"),
            ("Python", &[r"\.py$", r"\.pyw$"], "#"),
            ("Shell", &[r"\.sh$", r"\.bash$", r"^\.bashrc$", r"[/\\]\.bashrc$"], "#"),
            ("TOML", &[r"\.toml$"], "#"),
            ("YAML", &[r"\.ya?ml$"], "#"),
            ("Makefile", &[r"^Makefile$", r"[/\\]Makefile$", r"\.mk$"], "#"),
            ("Lua", &[r"\.lua$"], "--"),
            ("SQL", &[r"\.sql$"], "--"),
        ];

        let mut set = Self::new();
        for (name, files, comment) in BUILTIN {
            if let Ok(syntax) = Syntax::new(*name, files, Some(comment)) {
                set.add(syntax);
            }
        }
        set
    }

    /// Register a syntax.
    pub fn add(&mut self, syntax: Syntax) {
        self.syntaxes.push(syntax);
    }

    /// Number of registered syntaxes (excluding the plain-text fallback).
    pub fn len(&self) -> usize {
        self.syntaxes.len()
    }

    /// Returns `true` if no syntax is registered.
    pub fn is_empty(&self) -> bool {
        self.syntaxes.is_empty()
    }

    /// Find a syntax by display name.
    pub fn by_name(&self, name: &str) -> Option<&Syntax> {
        self.syntaxes.iter().rev().find(|s| s.name == name)
    }

    /// Resolve the syntax for a filename, falling back to plain text.
    pub fn match_filename(&self, filename: &str) -> &Syntax {
        self.syntaxes
            .iter()
            .rev()
            .find(|s| s.matches(filename))
            .unwrap_or(&self.plain_text)
    }
}

impl Default for SyntaxSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_resolves_comment_tokens() {
        let set = SyntaxSet::builtin();
        assert_eq!(set.match_filename("src/main.rs").line_comment(), Some("//"));
        assert_eq!(set.match_filename("setup.py").line_comment(), Some("#"));
        assert_eq!(set.match_filename("init.lua").line_comment(), Some("--"));
        assert_eq!(set.match_filename("/tmp/Makefile").line_comment(), Some("#"));
    }

    #[test]
    fn test_unknown_file_is_plain_text() {
        let set = SyntaxSet::builtin();
        let syntax = set.match_filename("notes.txt");
        assert_eq!(syntax.name, "Plain Text");
        assert_eq!(syntax.line_comment(), None);
    }

    #[test]
    fn test_later_registration_wins() {
        let mut set = SyntaxSet::builtin();
        set.add(Syntax::new("Custom", &[r"\.rs$"], Some("#!")).unwrap());
        assert_eq!(set.match_filename("a.rs").name, "Custom");
        assert_eq!(set.by_name("Custom").unwrap().line_comment(), Some("#!"));
    }

    #[test]
    fn test_empty_comment_token_is_disabled() {
        let syntax = Syntax::new("Empty", &[r"\.x$"], Some("")).unwrap();
        assert_eq!(syntax.line_comment(), None);
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        assert!(Syntax::new("Broken", &["("], None).is_err());
    }
}
