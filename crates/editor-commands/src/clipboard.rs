//! Clipboard collaborator.
//!
//! The core only defines the interface; hosts plug in a platform clipboard. [`MemoryClipboard`]
//! is the in-process default used by [`crate::EditorSession`] and the tests.

use thiserror::Error;

/// Clipboard failures.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// No clipboard is available in this environment.
    #[error("clipboard is unavailable")]
    Unavailable,
    /// The platform clipboard reported an error.
    #[error("clipboard error: {0}")]
    Platform(String),
}

/// Clipboard result alias.
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// System clipboard access.
pub trait Clipboard {
    /// Current clipboard text.
    fn get_text(&mut self) -> Result<String>;
    /// Replace the clipboard text.
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// A clipboard that lives in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    text: String,
    writes: usize,
}

impl MemoryClipboard {
    /// Create an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents without going through the trait.
    pub fn contents(&self) -> &str {
        &self.text
    }

    /// How many times `set_text` was called.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.text = text.to_string();
        self.writes += 1;
        Ok(())
    }
}

/// A clipboard for headless hosts: reads fail, writes are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn get_text(&mut self) -> Result<String> {
        Err(ClipboardError::Unavailable)
    }

    fn set_text(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }
}
