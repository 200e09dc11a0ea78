//! Static document commands.
//!
//! # Overview
//!
//! [`DocCommand`] enumerates every fixed `doc:*` command: history, clipboard, newline variants,
//! delete / backspace, selection commands, indentation, the line-scoped operations, case
//! conversion, go-to-line, line endings and persistence. The generated `doc:move-to-*`,
//! `doc:select-to-*` and `doc:delete-to-*` families live in [`crate::navigation`].
//!
//! Commands take no arguments. Their effect is observed through the document, the clipboard, the
//! view's scroll requests and the user messages in [`DocContext::notifier`].
//!
//! # Example
//!
//! ```rust
//! use editor_commands::{DocCommand, EditorSession};
//!
//! let mut session = EditorSession::new("  foo\n  bar\n");
//! session.perform("doc:select-all").unwrap();
//! session.perform("doc:indent").unwrap();
//! assert_eq!(session.doc().text(), "    foo\n    bar\n");
//!
//! assert_eq!("doc:join-lines".parse::<DocCommand>().unwrap(), DocCommand::JoinLines);
//! ```

use crate::clipboard::ClipboardError;
use crate::context::DocContext;
use crate::document::DocumentError;
use crate::indent::apply_indent;
use crate::line_ops;
use crate::navigation::delete_to;
use crate::prompt::{PromptRequest, Suggestion, fuzzy_filter, home_encode, home_expand, path_suggest};
use crate::selection::{Position, Selection};
use crate::text::{char_suffix, char_tail, is_blank, leading_whitespace};
use crate::translate;
use ropey::Rope;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Failures a command cannot handle itself. User input errors are not among them: those are
/// reported through the notifier and the command returns `Ok`.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Saving or loading the document failed.
    #[error(transparent)]
    Document(#[from] DocumentError),
    /// The clipboard failed.
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
    /// `doc:rename` wrote the new file but could not remove the old one.
    #[error("failed to remove {}: {source}", .path.display())]
    RemoveFile {
        /// The old path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Result of running a command.
pub type CommandResult = Result<(), CommandError>;

/// A name that is not a static document command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown document command: {0}")]
pub struct UnknownCommand(pub String);

/// Every static `doc:*` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocCommand {
    /// Undo the last command's edits.
    Undo,
    /// Redo the last undone command.
    Redo,
    /// Copy the selection to the clipboard and delete it.
    Cut,
    /// Copy the selection to the clipboard.
    Copy,
    /// Insert the clipboard text (carriage returns stripped).
    Paste,
    /// Break the line, inheriting its indentation.
    Newline,
    /// Open an indented line below the caret line.
    NewlineBelow,
    /// Open an indented line above the caret line.
    NewlineAbove,
    /// Forward delete; swallows a whitespace-only tail first.
    Delete,
    /// Backward delete; removes a whole soft indent unit inside leading spaces.
    Backspace,
    /// Select the whole document, caret at the start.
    SelectAll,
    /// Collapse the selection to the caret.
    SelectNone,
    /// Extend the selection to whole lines.
    SelectLines,
    /// Select the word at the caret.
    SelectWord,
    /// Join the selected lines (or the caret line with the next).
    JoinLines,
    /// Indent.
    Indent,
    /// Unindent.
    Unindent,
    /// Duplicate the touched lines.
    DuplicateLines,
    /// Delete the touched lines.
    DeleteLines,
    /// Move the touched lines up.
    MoveLinesUp,
    /// Move the touched lines down.
    MoveLinesDown,
    /// Comment / uncomment the touched lines.
    ToggleLineComments,
    /// Upper-case the selection.
    UpperCase,
    /// Lower-case the selection.
    LowerCase,
    /// Prompt for a line number or a fuzzy line match and jump there.
    GoToLine,
    /// Flip the line ending used for saving.
    ToggleLineEnding,
    /// Save in place (or prompt when unsaved).
    Save,
    /// Prompt for a path and save there.
    SaveAs,
    /// Prompt for a new path, save there and remove the old file.
    Rename,
}

impl DocCommand {
    /// All static commands, in registration order.
    pub const ALL: [DocCommand; 29] = [
        Self::Undo,
        Self::Redo,
        Self::Cut,
        Self::Copy,
        Self::Paste,
        Self::Newline,
        Self::NewlineBelow,
        Self::NewlineAbove,
        Self::Delete,
        Self::Backspace,
        Self::SelectAll,
        Self::SelectNone,
        Self::SelectLines,
        Self::SelectWord,
        Self::JoinLines,
        Self::Indent,
        Self::Unindent,
        Self::DuplicateLines,
        Self::DeleteLines,
        Self::MoveLinesUp,
        Self::MoveLinesDown,
        Self::ToggleLineComments,
        Self::UpperCase,
        Self::LowerCase,
        Self::GoToLine,
        Self::ToggleLineEnding,
        Self::Save,
        Self::SaveAs,
        Self::Rename,
    ];

    /// The command identifier, e.g. `doc:move-lines-up`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Undo => "doc:undo",
            Self::Redo => "doc:redo",
            Self::Cut => "doc:cut",
            Self::Copy => "doc:copy",
            Self::Paste => "doc:paste",
            Self::Newline => "doc:newline",
            Self::NewlineBelow => "doc:newline-below",
            Self::NewlineAbove => "doc:newline-above",
            Self::Delete => "doc:delete",
            Self::Backspace => "doc:backspace",
            Self::SelectAll => "doc:select-all",
            Self::SelectNone => "doc:select-none",
            Self::SelectLines => "doc:select-lines",
            Self::SelectWord => "doc:select-word",
            Self::JoinLines => "doc:join-lines",
            Self::Indent => "doc:indent",
            Self::Unindent => "doc:unindent",
            Self::DuplicateLines => "doc:duplicate-lines",
            Self::DeleteLines => "doc:delete-lines",
            Self::MoveLinesUp => "doc:move-lines-up",
            Self::MoveLinesDown => "doc:move-lines-down",
            Self::ToggleLineComments => "doc:toggle-line-comments",
            Self::UpperCase => "doc:upper-case",
            Self::LowerCase => "doc:lower-case",
            Self::GoToLine => "doc:go-to-line",
            Self::ToggleLineEnding => "doc:toggle-line-ending",
            Self::Save => "doc:save",
            Self::SaveAs => "doc:save-as",
            Self::Rename => "doc:rename",
        }
    }

    /// Run the command against a document context.
    pub fn execute(self, ctx: &mut DocContext<'_>) -> CommandResult {
        match self {
            Self::Undo => {
                ctx.doc.undo();
            }
            Self::Redo => {
                ctx.doc.redo();
            }
            Self::Cut => {
                if ctx.doc.has_selection() {
                    ctx.clipboard.set_text(&ctx.doc.selected_text())?;
                    ctx.doc.delete_selection();
                }
            }
            Self::Copy => {
                if ctx.doc.has_selection() {
                    ctx.clipboard.set_text(&ctx.doc.selected_text())?;
                }
            }
            Self::Paste => {
                let text = ctx.clipboard.get_text()?;
                ctx.doc.text_input(&text.replace('\r', ""));
            }
            Self::Newline => newline(ctx),
            Self::NewlineBelow => {
                let line = ctx.doc.caret().line;
                let indent = leading_whitespace(&ctx.doc.line(line)).to_string();
                ctx.doc.insert(Position::line_end(line), &format!("\n{indent}"));
                ctx.doc.set_caret(Position::line_end(line + 1));
            }
            Self::NewlineAbove => {
                let line = ctx.doc.caret().line;
                let indent = leading_whitespace(&ctx.doc.line(line)).to_string();
                ctx.doc.insert(Position::new(line, 1), &format!("{indent}\n"));
                ctx.doc.set_caret(Position::line_end(line));
            }
            Self::Delete => delete(ctx),
            Self::Backspace => backspace(ctx),
            Self::SelectAll => {
                let end = ctx.doc.end_of_doc();
                ctx.doc.set_selection(Selection::new(Position::new(1, 1), end));
            }
            Self::SelectNone => {
                let caret = ctx.doc.caret();
                ctx.doc.set_caret(caret);
            }
            Self::SelectLines => {
                let (start, end, swap) = ctx.doc.selection().sorted();
                ctx.doc.ensure_trailing_line(end.line);
                ctx.doc.set_selection(Selection::from_sorted(
                    Position::new(start.line, 1),
                    Position::new(end.line + 1, 1),
                    swap,
                ));
            }
            Self::SelectWord => {
                let (start, _, _) = ctx.doc.selection().sorted();
                let word_start = translate::start_of_word(ctx.doc, start);
                let word_end = translate::end_of_word(ctx.doc, word_start);
                ctx.doc.set_selection(Selection::new(word_end, word_start));
            }
            Self::JoinLines => line_ops::join_lines(ctx.doc),
            Self::Indent => apply_indent(ctx.doc, ctx.config, false),
            Self::Unindent => apply_indent(ctx.doc, ctx.config, true),
            Self::DuplicateLines => line_ops::duplicate_lines(ctx.doc),
            Self::DeleteLines => line_ops::delete_lines(ctx.doc),
            Self::MoveLinesUp => line_ops::move_lines_up(ctx.doc),
            Self::MoveLinesDown => line_ops::move_lines_down(ctx.doc),
            Self::ToggleLineComments => line_ops::toggle_line_comments(ctx.doc),
            Self::UpperCase => ctx.doc.replace(|text| text.to_uppercase()),
            Self::LowerCase => ctx.doc.replace(|text| text.to_lowercase()),
            Self::GoToLine => go_to_line(ctx),
            Self::ToggleLineEnding => ctx.doc.toggle_line_ending(),
            Self::Save => {
                if ctx.doc.filename().is_some() {
                    return save(ctx, None);
                }
                save_as(ctx);
            }
            Self::SaveAs => save_as(ctx),
            Self::Rename => rename(ctx),
        }
        Ok(())
    }
}

impl FromStr for DocCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.name() == s)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

impl std::fmt::Display for DocCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn newline(ctx: &mut DocContext<'_>) {
    let caret = ctx.doc.caret();
    let line = ctx.doc.line(caret.line);
    let mut indent = leading_whitespace(&line);
    // Inside the indentation, inherit no more indent than precedes the caret.
    if caret.column <= indent.len() {
        indent = char_tail(indent, caret.column - 1);
    }
    ctx.doc.text_input(&format!("\n{indent}"));
}

fn delete(ctx: &mut DocContext<'_>) {
    if !ctx.doc.has_selection() {
        let caret = ctx.doc.caret();
        let line = ctx.doc.line(caret.line);
        if is_blank(char_suffix(&line, caret.column - 1)) {
            ctx.doc.remove(caret, Position::line_end(caret.line));
        }
    }
    delete_to(ctx.doc, translate::next_char);
}

fn backspace(ctx: &mut DocContext<'_>) {
    if !ctx.doc.has_selection() {
        let caret = ctx.doc.caret();
        let prefix = ctx.doc.get_text(Position::new(caret.line, 1), caret);
        let unit = ctx.config.indent_size.max(1);
        if prefix.len() >= unit && prefix.chars().all(|c| c == ' ') {
            let target = Position::new(caret.line, caret.column - unit);
            ctx.doc.remove(target, caret);
            ctx.doc.set_caret(target);
            return;
        }
    }
    delete_to(ctx.doc, translate::previous_char);
}

/// Lines of a document snapshot, built on the first non-numeric query of one go-to-line prompt.
struct LineItems {
    snapshot: Rope,
    items: Option<Vec<Suggestion>>,
}

impl LineItems {
    fn new(snapshot: Rope) -> Self {
        Self {
            snapshot,
            items: None,
        }
    }

    fn suggest(&mut self, text: &str) -> Vec<Suggestion> {
        if text.chars().all(|c| c.is_ascii_digit()) {
            return Vec::new();
        }
        let snapshot = &self.snapshot;
        let items = self.items.get_or_insert_with(|| {
            snapshot
                .lines()
                .enumerate()
                .map(|(idx, line)| {
                    let mut text = line.to_string();
                    if text.ends_with('\n') {
                        text.pop();
                    }
                    Suggestion::for_line(text, idx + 1)
                })
                .collect()
        });
        fuzzy_filter(text, items)
    }
}

fn go_to_line(ctx: &mut DocContext<'_>) {
    let mut items = LineItems::new(ctx.doc.rope().clone());
    let request = PromptRequest::new("Go To Line", |ctx, text, item| {
        let target = item
            .and_then(|item| item.line)
            .or_else(|| text.trim().parse::<usize>().ok());
        let Some(line) = target else {
            ctx.notifier.error("Invalid line number or unmatched string");
            return Ok(());
        };
        let line = line.clamp(1, ctx.doc.line_count());
        ctx.doc.set_caret(Position::new(line, 1));
        ctx.view.scroll_to_line(line, true);
        Ok(())
    })
    .with_suggest(move |text| items.suggest(text));
    ctx.prompt.enter(request);
}

fn save(ctx: &mut DocContext<'_>, path: Option<&Path>) -> CommandResult {
    ctx.doc.save(path)?;
    ctx.doc.reset_syntax(ctx.syntaxes);
    let name = ctx.doc.name();
    tracing::info!(file = %name, "saved document");
    ctx.notifier.log(&format!("Saved \"{name}\""));
    Ok(())
}

fn path_display(path: &Path) -> String {
    home_encode(&path.display().to_string())
}

fn save_as(ctx: &mut DocContext<'_>) {
    let text = match ctx.doc.filename() {
        Some(path) => path_display(path),
        None => ctx
            .sibling_path
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| format!("{}{MAIN_SEPARATOR}", path_display(dir)))
            .unwrap_or_default(),
    };

    let request = PromptRequest::new("Save As", |ctx, text, _| {
        let filename = home_expand(text);
        if filename.is_empty() {
            ctx.notifier.error("Cannot save: empty filename");
            return Ok(());
        }
        save(ctx, Some(Path::new(&filename)))
    })
    .with_text(text)
    .with_suggest(|text| {
        path_suggest(&home_expand(text))
            .into_iter()
            .map(|suggestion| Suggestion::new(home_encode(&suggestion.text)))
            .collect()
    });
    ctx.prompt.enter(request);
}

fn rename(ctx: &mut DocContext<'_>) {
    let Some(old) = ctx.doc.filename().map(Path::to_path_buf) else {
        ctx.notifier.error("Cannot rename unsaved doc");
        return;
    };

    let request = PromptRequest::new("Rename", {
        let old = old.clone();
        move |ctx: &mut DocContext<'_>, text: &str, _: Option<&Suggestion>| {
            let filename = home_expand(text);
            if filename.is_empty() {
                ctx.notifier.error("Cannot rename: empty filename");
                return Ok(());
            }
            let new = PathBuf::from(&filename);
            save(ctx, Some(&new))?;
            tracing::info!(from = %old.display(), to = %new.display(), "renamed document");
            ctx.notifier
                .log(&format!("Renamed \"{}\" to \"{filename}\"", old.display()));
            if new != old {
                std::fs::remove_file(&old)
                    .map_err(|source| CommandError::RemoveFile { path: old, source })?;
            }
            Ok(())
        }
    })
    .with_text(path_display(&old))
    .with_suggest(|text| path_suggest(&home_expand(text)));
    ctx.prompt.enter(request);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for command in DocCommand::ALL {
            assert!(command.name().starts_with("doc:"));
            assert_eq!(command.name().parse::<DocCommand>(), Ok(command));
        }
        assert_eq!(
            "doc:frobnicate".parse::<DocCommand>(),
            Err(UnknownCommand("doc:frobnicate".to_string()))
        );
    }

    #[test]
    fn test_line_items_are_lazy_and_skip_numbers() {
        let mut items = LineItems::new(Rope::from_str("alpha\nbeta\n"));
        assert!(items.suggest("12").is_empty());
        assert!(items.items.is_none());

        let found = items.suggest("bet");
        assert_eq!(found, vec![Suggestion::for_line("beta", 2)]);
        assert_eq!(items.items.as_ref().map(Vec::len), Some(3));
    }
}
