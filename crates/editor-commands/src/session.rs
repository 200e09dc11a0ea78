//! `EditorSession`: one document with default collaborators, ready to run commands.
//!
//! The session owns the document, a [`ViewState`], a clipboard, a prompt slot, a
//! [`MessageLog`], the configuration and the language table, and shares the (immutable)
//! [`CommandRegistry`]. It is the focus the registry runs `doc:*` commands against.
//!
//! # Example
//!
//! ```rust
//! use editor_commands::{EditorSession, Position};
//!
//! let mut session = EditorSession::new("one\ntwo\nthree\n");
//! session.perform("doc:go-to-line").unwrap();
//! session.confirm_prompt("3").unwrap();
//! assert_eq!(session.doc().caret(), Position::new(3, 1));
//! ```

use crate::clipboard::{Clipboard, MemoryClipboard};
use crate::commands::CommandError;
use crate::config::EditorConfig;
use crate::context::{DocContext, MessageLog};
use crate::document::{Document, DocumentError};
use crate::prompt::{PromptRequest, PromptSlot, Suggestion};
use crate::registry::{CommandRegistry, Focus};
use crate::view::ViewState;
use editor_commands_lang::SyntaxSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A single-document editor host.
pub struct EditorSession {
    doc: Document,
    view: ViewState,
    clipboard: Box<dyn Clipboard>,
    prompt: PromptSlot,
    messages: MessageLog,
    config: EditorConfig,
    syntaxes: SyntaxSet,
    registry: Arc<CommandRegistry>,
    sibling_path: Option<PathBuf>,
}

impl EditorSession {
    /// A session over an unsaved document with the given text.
    pub fn new(text: &str) -> Self {
        Self::with_document(Document::new(text))
    }

    /// A session over an existing document.
    pub fn with_document(doc: Document) -> Self {
        Self {
            doc,
            view: ViewState::default(),
            clipboard: Box::new(MemoryClipboard::new()),
            prompt: PromptSlot::new(),
            messages: MessageLog::new(),
            config: EditorConfig::default(),
            syntaxes: SyntaxSet::builtin(),
            registry: Arc::new(CommandRegistry::doc_commands()),
            sibling_path: None,
        }
    }

    /// Open a file with the built-in language table.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let syntaxes = SyntaxSet::builtin();
        let doc = Document::open(path, &syntaxes)?;
        Ok(Self::with_document(doc).with_syntaxes(syntaxes))
    }

    /// Builder: indentation settings.
    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    /// Builder: language table (the document's syntax is re-detected).
    pub fn with_syntaxes(mut self, syntaxes: SyntaxSet) -> Self {
        self.doc.reset_syntax(&syntaxes);
        self.syntaxes = syntaxes;
        self
    }

    /// Builder: share a registry with other sessions.
    pub fn with_registry(mut self, registry: Arc<CommandRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Builder: a host clipboard.
    pub fn with_clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    /// Builder: viewport.
    pub fn with_view(mut self, view: ViewState) -> Self {
        self.view = view;
        self
    }

    /// Record the path of the previously active document (seeds `doc:save-as`).
    pub fn set_sibling_path(&mut self, path: Option<PathBuf>) {
        self.sibling_path = path;
    }

    /// The document.
    pub fn doc(&self) -> &Document {
        &self.doc
    }

    /// The document, mutably.
    pub fn doc_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// The viewport.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The viewport, mutably.
    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    /// The clipboard.
    pub fn clipboard_mut(&mut self) -> &mut dyn Clipboard {
        self.clipboard.as_mut()
    }

    /// User messages emitted so far.
    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    /// Indentation settings.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The shared registry.
    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// The open prompt, if any.
    pub fn pending_prompt(&self) -> Option<&PromptRequest> {
        self.prompt.pending()
    }

    /// Run a command by name. `Ok(false)` means the name is not registered.
    pub fn perform(&mut self, name: &str) -> Result<bool, CommandError> {
        let registry = Arc::clone(&self.registry);
        registry.perform(name, self)
    }

    /// Suggestions of the open prompt for `text`.
    pub fn suggest(&mut self, text: &str) -> Vec<Suggestion> {
        self.prompt.suggest(text)
    }

    /// Confirm the open prompt with `text`; the best suggestion for `text` (if any) is passed as
    /// the selected item. Returns `Ok(false)` when no prompt is open.
    pub fn confirm_prompt(&mut self, text: &str) -> Result<bool, CommandError> {
        let Some(mut request) = self.prompt.take() else {
            return Ok(false);
        };
        tracing::debug!(title = %request.title, "prompt confirmed");

        let suggestions = (request.on_suggest)(text);
        let mut ctx = self.context();
        let result = (request.on_confirm)(&mut ctx, text, suggestions.first());
        ctx.doc.end_undo_group();
        result.map(|()| true)
    }

    /// Close the open prompt without running its continuation.
    pub fn cancel_prompt(&mut self) -> bool {
        let cancelled = self.prompt.take();
        if let Some(request) = &cancelled {
            tracing::debug!(title = %request.title, "prompt cancelled");
        }
        cancelled.is_some()
    }

    fn context(&mut self) -> DocContext<'_> {
        DocContext {
            doc: &mut self.doc,
            view: &mut self.view,
            clipboard: self.clipboard.as_mut(),
            prompt: &mut self.prompt,
            notifier: &mut self.messages,
            config: &self.config,
            syntaxes: &self.syntaxes,
            sibling_path: self.sibling_path.as_deref(),
        }
    }
}

impl Focus for EditorSession {
    fn doc_view(&mut self) -> Option<DocContext<'_>> {
        Some(self.context())
    }
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("doc", &self.doc)
            .field("view", &self.view)
            .field("prompt", &self.prompt)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Position;

    #[test]
    fn test_perform_unknown_command() {
        let mut session = EditorSession::new("x");
        assert!(!session.perform("doc:nope").unwrap());
        assert!(session.perform("doc:select-all").unwrap());
    }

    #[test]
    fn test_one_command_is_one_undo_step() {
        let mut session = EditorSession::new("a\nb\n");
        session.perform("doc:duplicate-lines").unwrap();
        session.perform("doc:duplicate-lines").unwrap();
        assert_eq!(session.doc().text(), "a\na\na\nb\n");

        session.perform("doc:undo").unwrap();
        assert_eq!(session.doc().text(), "a\na\nb\n");
        assert_eq!(session.doc().caret(), Position::new(2, 1));
    }

    #[test]
    fn test_cancel_prompt_never_confirms() {
        let mut session = EditorSession::new("one\ntwo");
        session.perform("doc:go-to-line").unwrap();
        assert!(session.pending_prompt().is_some());
        assert!(session.cancel_prompt());
        assert!(!session.confirm_prompt("2").unwrap());
        assert_eq!(session.doc().caret(), Position::new(1, 1));
    }
}
