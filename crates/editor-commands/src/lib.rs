#![warn(missing_docs)]
//! Editor Commands - the editing-command core of a text editor
//!
//! # Overview
//!
//! `editor-commands` turns discrete user intents (indent, delete line, join lines, move lines,
//! toggle comment, duplicate, case-convert, navigate) into edits of a multi-line document and its
//! selection. It renders nothing and owns no event loop: a host feeds it command names and supplies
//! the collaborators (view, clipboard, prompt, message sink) through small traits.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Command Registry (name -> handler, scope)  │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Static commands  │  Navigation generator   │  ← doc:* commands
//! ├─────────────────────────────────────────────┤
//! │  Line operations  │  Indentation engine     │  ← Line-scoped edits
//! ├─────────────────────────────────────────────┤
//! │  Selections & boundary translations         │  ← Coordinates
//! ├─────────────────────────────────────────────┤
//! │  Document (Rope, undo groups, persistence)  │  ← Buffer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use editor_commands::{EditorSession, Position, Selection};
//!
//! let mut session = EditorSession::new("a\nb\nc\n");
//! session.doc_mut().set_caret(Position::new(3, 1));
//!
//! session.perform("doc:move-lines-up").unwrap();
//! assert_eq!(session.doc().text(), "a\nc\nb\n");
//!
//! session.perform("doc:undo").unwrap();
//! assert_eq!(session.doc().text(), "a\nb\nc\n");
//!
//! session
//!     .doc_mut()
//!     .set_selection(Selection::new(Position::new(2, 1), Position::new(1, 1)));
//! session.perform("doc:join-lines").unwrap();
//! assert_eq!(session.doc().text(), "a b\nc\n");
//! ```
//!
//! # Coordinates
//!
//! Lines and columns are 1-based; columns count Unicode scalar values and may equal
//! `line_len + 1`. [`END_OF_LINE`] can be passed wherever a column is expected. Every position
//! stored in a [`Selection`] is clamped into the document.
//!
//! # Module Description
//!
//! - [`document`] - rope-backed document, undo groups, persistence
//! - [`selection`] - positions, selections, normalized line ranges
//! - [`indent`] - indent units and `doc:indent` / `doc:unindent`
//! - [`line_ops`] - duplicate / delete / move / join / comment lines
//! - [`commands`] - the static `doc:*` commands
//! - [`translate`] - boundary translation functions
//! - [`navigation`] - generated move-to / select-to / delete-to commands
//! - [`view`], [`clipboard`], [`prompt`], [`context`] - collaborator traits and defaults
//! - [`registry`] - the command registry and focus capability
//! - [`session`] - a single-document host with default collaborators
//! - [`config`] - indentation settings

pub mod clipboard;
pub mod commands;
pub mod config;
pub mod context;
pub mod document;
pub mod indent;
pub mod line_ending;
pub mod line_ops;
pub mod navigation;
pub mod prompt;
pub mod registry;
pub mod selection;
pub mod session;
mod text;
pub mod translate;
pub mod view;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard, NoClipboard};
pub use commands::{CommandError, CommandResult, DocCommand, UnknownCommand};
pub use config::{ConfigError, EditorConfig, TabType};
pub use context::{DocContext, Message, MessageLevel, MessageLog, Notifier};
pub use document::{Document, DocumentError};
pub use line_ending::LineEnding;
pub use prompt::{Prompt, PromptRequest, PromptSlot, Suggestion};
pub use registry::{CommandRegistry, Focus, Handler, RegistryBuilder, Scope};
pub use selection::{
    END_OF_LINE, LineRange, Position, Selection, SelectionDirection, normalized_selection,
};
pub use session::EditorSession;
pub use translate::Translation;
pub use view::{ScrollRequest, View, ViewState};

pub use editor_commands_lang::{Syntax, SyntaxSet};
