//! The context handed to every document command, and the user-message sink.

use crate::clipboard::Clipboard;
use crate::config::EditorConfig;
use crate::document::Document;
use crate::prompt::Prompt;
use crate::view::View;
use editor_commands_lang::SyntaxSet;
use std::path::Path;

/// Severity of a user-visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Informational status.
    Info,
    /// A user input error.
    Error,
}

/// A user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Severity.
    pub level: MessageLevel,
    /// Text shown to the user.
    pub text: String,
}

/// Sink for user-visible status and error messages.
pub trait Notifier {
    /// Report an informational message.
    fn log(&mut self, text: &str);
    /// Report a non-fatal user error.
    fn error(&mut self, text: &str);
}

/// A [`Notifier`] that keeps every message; each one is also emitted as a `tracing` event.
#[derive(Debug, Default, Clone)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The newest message.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Only the errors.
    pub fn errors(&self) -> impl Iterator<Item = &Message> {
        self.messages
            .iter()
            .filter(|m| m.level == MessageLevel::Error)
    }

    /// Drop all messages.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Notifier for MessageLog {
    fn log(&mut self, text: &str) {
        tracing::info!(text, "user message");
        self.messages.push(Message {
            level: MessageLevel::Info,
            text: text.to_string(),
        });
    }

    fn error(&mut self, text: &str) {
        tracing::warn!(text, "user error");
        self.messages.push(Message {
            level: MessageLevel::Error,
            text: text.to_string(),
        });
    }
}

/// Everything a document command may touch during one invocation.
///
/// Handlers get exclusive access for the duration of the call; nothing here outlives it.
pub struct DocContext<'a> {
    /// The focused document.
    pub doc: &'a mut Document,
    /// The view showing it.
    pub view: &'a mut dyn View,
    /// System clipboard.
    pub clipboard: &'a mut dyn Clipboard,
    /// Prompt collaborator for interactive commands.
    pub prompt: &'a mut dyn Prompt,
    /// User message sink.
    pub notifier: &'a mut dyn Notifier,
    /// Indentation settings.
    pub config: &'a EditorConfig,
    /// Languages, for re-detecting the syntax after a save under a new name.
    pub syntaxes: &'a SyntaxSet,
    /// Path of the previously active document; seeds `doc:save-as` for unsaved documents.
    pub sibling_path: Option<&'a Path>,
}
