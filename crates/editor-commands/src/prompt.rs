//! Prompt collaborator: interactive text entry with suggestions.
//!
//! Interactive commands (`doc:go-to-line`, `doc:save-as`, `doc:rename`) do not block. They hand a
//! [`PromptRequest`] to the [`Prompt`] and return; the host later confirms (running the one-shot
//! continuation with a fresh [`DocContext`]) or cancels (dropping the request). Nothing is mutated
//! before confirmation.
//!
//! Fuzzy ranking is delegated to `nucleo`.

use crate::commands::CommandResult;
use crate::context::DocContext;
use nucleo::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo::{Config, Matcher};
use std::cell::RefCell;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// A candidate offered while the user types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Text shown (and matched against).
    pub text: String,
    /// Secondary text, e.g. `line: 12`.
    pub info: Option<String>,
    /// Line the candidate refers to, for line pickers.
    pub line: Option<usize>,
}

impl Suggestion {
    /// A plain text candidate.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            info: None,
            line: None,
        }
    }

    /// A candidate standing for a document line.
    pub fn for_line(text: impl Into<String>, line: usize) -> Self {
        Self {
            text: text.into(),
            info: Some(format!("line: {line}")),
            line: Some(line),
        }
    }
}

impl AsRef<str> for Suggestion {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Continuation run when the prompt is confirmed: `(ctx, text, selected suggestion)`.
pub type ConfirmFn =
    Box<dyn FnOnce(&mut DocContext<'_>, &str, Option<&Suggestion>) -> CommandResult>;

/// Callback producing suggestions for the current text.
pub type SuggestFn = Box<dyn FnMut(&str) -> Vec<Suggestion>>;

/// A pending prompt.
pub struct PromptRequest {
    /// Label shown before the input.
    pub title: String,
    /// Pre-filled input text.
    pub text: String,
    /// Run once on confirm.
    pub on_confirm: ConfirmFn,
    /// Run on every edit of the input.
    pub on_suggest: SuggestFn,
}

impl PromptRequest {
    /// Create a request with no suggestions.
    pub fn new(
        title: impl Into<String>,
        on_confirm: impl FnOnce(&mut DocContext<'_>, &str, Option<&Suggestion>) -> CommandResult
        + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            text: String::new(),
            on_confirm: Box::new(on_confirm),
            on_suggest: Box::new(|_| Vec::new()),
        }
    }

    /// Builder: pre-fill the input.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder: set the suggestion callback.
    pub fn with_suggest(mut self, on_suggest: impl FnMut(&str) -> Vec<Suggestion> + 'static) -> Self {
        self.on_suggest = Box::new(on_suggest);
        self
    }
}

impl std::fmt::Debug for PromptRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptRequest")
            .field("title", &self.title)
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

/// Where interactive commands post their requests.
pub trait Prompt {
    /// Open a prompt. A prompt that is already open is replaced.
    fn enter(&mut self, request: PromptRequest);
}

/// Holds at most one pending request.
#[derive(Debug, Default)]
pub struct PromptSlot {
    pending: Option<PromptRequest>,
}

impl PromptSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a request is waiting.
    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    /// The pending request.
    pub fn pending(&self) -> Option<&PromptRequest> {
        self.pending.as_ref()
    }

    /// Remove and return the pending request.
    pub fn take(&mut self) -> Option<PromptRequest> {
        self.pending.take()
    }

    /// Suggestions of the pending request for `text` (empty when idle).
    pub fn suggest(&mut self, text: &str) -> Vec<Suggestion> {
        self.pending
            .as_mut()
            .map(|request| (request.on_suggest)(text))
            .unwrap_or_default()
    }
}

impl Prompt for PromptSlot {
    fn enter(&mut self, request: PromptRequest) {
        tracing::debug!(title = %request.title, "prompt opened");
        self.pending = Some(request);
    }
}

thread_local! {
    static MATCHER: RefCell<Matcher> = RefCell::new(Matcher::new(Config::DEFAULT));
}

/// Rank `items` against `pattern` (smart case), best first. Non-matching items are dropped;
/// an empty pattern keeps everything.
pub fn fuzzy_filter(pattern: &str, items: &[Suggestion]) -> Vec<Suggestion> {
    let atom = Atom::new(
        pattern,
        CaseMatching::Smart,
        Normalization::Smart,
        AtomKind::Fuzzy,
        false,
    );
    MATCHER.with(|matcher| {
        atom.match_list(items, &mut matcher.borrow_mut())
            .into_iter()
            .map(|(item, _score)| item.clone())
            .collect()
    })
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

/// Expand a leading `~` to `home`.
pub fn home_expand_with(text: &str, home: Option<&Path>) -> String {
    match (text.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with(['/', '\\']) => {
            format!("{}{rest}", home.display())
        }
        _ => text.to_string(),
    }
}

/// Expand a leading `~` to `$HOME`.
pub fn home_expand(text: &str) -> String {
    home_expand_with(text, home_dir().as_deref())
}

/// Shorten a path under `home` to `~/...`.
pub fn home_encode_with(text: &str, home: Option<&Path>) -> String {
    let Some(home) = home.map(|h| h.display().to_string()) else {
        return text.to_string();
    };
    match text.strip_prefix(home.as_str()) {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => format!("~{rest}"),
        _ => text.to_string(),
    }
}

/// Shorten a path under `$HOME` to `~/...`.
pub fn home_encode(text: &str) -> String {
    home_encode_with(text, home_dir().as_deref())
}

/// Directory entries whose path starts (case-insensitively) with `text`. Directories get a
/// trailing separator. Unreadable directories yield nothing.
pub fn path_suggest(text: &str) -> Vec<Suggestion> {
    let split = text.rfind(['/', '\\']).map_or(0, |idx| idx + 1);
    let dir = &text[..split];
    let wanted = text.to_lowercase();

    let read_dir = match std::fs::read_dir(if dir.is_empty() { "." } else { dir }) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(%err, dir, "path suggestions unavailable");
            return Vec::new();
        }
    };

    let mut paths: Vec<String> = read_dir
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let mut path = format!("{dir}{}", entry.file_name().to_string_lossy());
            if entry.file_type().is_ok_and(|ty| ty.is_dir()) {
                path.push(MAIN_SEPARATOR);
            }
            path.to_lowercase().starts_with(&wanted).then_some(path)
        })
        .collect();
    paths.sort();
    paths.into_iter().map(Suggestion::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzzy_filter_ranks_and_drops() {
        let items = vec![
            Suggestion::new("fn main() {"),
            Suggestion::new("let x = 1;"),
            Suggestion::new("main loop"),
        ];
        let results = fuzzy_filter("main", &items);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|s| s.text.contains("main")));
        assert!(fuzzy_filter("zzz", &items).is_empty());
        assert_eq!(fuzzy_filter("", &items).len(), 3);
    }

    #[test]
    fn test_home_expand_and_encode() {
        let home = Path::new("/home/user");
        assert_eq!(home_expand_with("~/a.txt", Some(home)), "/home/user/a.txt");
        assert_eq!(home_expand_with("~", Some(home)), "/home/user");
        assert_eq!(home_expand_with("~other", Some(home)), "~other");
        assert_eq!(home_expand_with("~/a", None), "~/a");
        assert_eq!(home_encode_with("/home/user/a.txt", Some(home)), "~/a.txt");
        assert_eq!(home_encode_with("/home/username", Some(home)), "/home/username");
    }

    #[test]
    fn test_path_suggest_lists_matching_entries() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Alpha.txt"), "").unwrap();
        std::fs::write(dir.path().join("beta.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("alpine")).unwrap();

        let base = format!("{}{}", dir.path().display(), MAIN_SEPARATOR);
        let found: Vec<_> = path_suggest(&format!("{base}al"))
            .into_iter()
            .map(|s| s.text)
            .collect();
        assert_eq!(
            found,
            vec![format!("{base}Alpha.txt"), format!("{base}alpine{MAIN_SEPARATOR}")]
        );
        assert!(path_suggest(&format!("{base}missing/x")).is_empty());
    }

    #[test]
    fn test_prompt_slot_replaces_and_suggests() {
        let mut slot = PromptSlot::new();
        assert!(!slot.is_active());
        slot.enter(
            PromptRequest::new("First", |_, _, _| Ok(()))
                .with_suggest(|text| vec![Suggestion::new(text.to_uppercase())]),
        );
        assert_eq!(slot.suggest("ab"), vec![Suggestion::new("AB")]);

        slot.enter(PromptRequest::new("Second", |_, _, _| Ok(())).with_text("pre"));
        let pending = slot.pending().unwrap();
        assert_eq!(pending.title, "Second");
        assert_eq!(pending.text, "pre");
        assert!(slot.take().is_some());
        assert!(slot.suggest("x").is_empty());
    }
}
