//! Navigation commands generated from the boundary table.
//!
//! Every boundary `<b>` in [`BOUNDARIES`] yields `doc:move-to-<b>`, `doc:select-to-<b>` and
//! `doc:delete-to-<b>`. `doc:move-to-previous-char` / `doc:move-to-next-char` are then replaced so
//! that an existing selection collapses to its start / end instead of moving the caret.

use crate::commands::CommandResult;
use crate::context::DocContext;
use crate::document::Document;
use crate::registry::Handler;
use crate::selection::{Position, Selection};
use crate::translate::{BOUNDARIES, Translation, next_char, previous_char};
use std::sync::Arc;

/// The three command families derived from each boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// Collapse the selection at the translated caret.
    MoveTo,
    /// Move the caret, keep the anchor.
    SelectTo,
    /// Delete from the caret to the translated position.
    DeleteTo,
}

impl Family {
    /// All families.
    pub const ALL: [Family; 3] = [Family::MoveTo, Family::SelectTo, Family::DeleteTo];

    /// Command name for a boundary, e.g. `doc:select-to-end-of-line`.
    pub fn command_name(self, boundary: &str) -> String {
        let prefix = match self {
            Family::MoveTo => "move-to",
            Family::SelectTo => "select-to",
            Family::DeleteTo => "delete-to",
        };
        format!("doc:{prefix}-{boundary}")
    }

    /// Run the family's action for a translation.
    pub fn run(self, ctx: &mut DocContext<'_>, translation: Translation) -> CommandResult {
        match self {
            Family::MoveTo => move_to(ctx, translation),
            Family::SelectTo => select_to(ctx, translation),
            Family::DeleteTo => {
                let view = &*ctx.view;
                delete_to(ctx.doc, |doc, pos| translation.apply(doc, view, pos));
            }
        }
        Ok(())
    }

    fn handler(self, translation: Translation) -> Handler {
        Arc::new(move |ctx: &mut DocContext<'_>| self.run(ctx, translation))
    }
}

/// Set the caret to the translated position, dropping any selection.
pub fn move_to(ctx: &mut DocContext<'_>, translation: Translation) {
    let target = translation.apply(ctx.doc, &*ctx.view, ctx.doc.caret());
    ctx.doc.set_caret(target);
}

/// Move the caret to the translated position, keeping the anchor.
pub fn select_to(ctx: &mut DocContext<'_>, translation: Translation) {
    let selection = ctx.doc.selection();
    let target = translation.apply(ctx.doc, &*ctx.view, selection.active);
    ctx.doc.set_selection(Selection::new(target, selection.anchor));
}

/// Delete the selection, or the text between the caret and `target(caret)`.
pub(crate) fn delete_to(
    doc: &mut Document,
    target: impl FnOnce(&Document, Position) -> Position,
) {
    if doc.has_selection() {
        doc.delete_selection();
        return;
    }
    let caret = doc.caret();
    let target = doc.sanitize(target(doc, caret));
    doc.remove(caret, target);
    doc.set_caret(caret.min(target));
}

fn move_to_previous_char(ctx: &mut DocContext<'_>) -> CommandResult {
    if ctx.doc.has_selection() {
        let (start, _, _) = ctx.doc.selection().sorted();
        ctx.doc.set_caret(start);
    } else {
        move_to(ctx, Translation::Doc(previous_char));
    }
    Ok(())
}

fn move_to_next_char(ctx: &mut DocContext<'_>) -> CommandResult {
    if ctx.doc.has_selection() {
        let (_, end, _) = ctx.doc.selection().sorted();
        ctx.doc.set_caret(end);
    } else {
        move_to(ctx, Translation::Doc(next_char));
    }
    Ok(())
}

/// All generated navigation commands, overrides last.
pub fn commands() -> Vec<(String, Handler)> {
    let mut commands: Vec<(String, Handler)> = BOUNDARIES
        .iter()
        .flat_map(|&(boundary, translation)| {
            Family::ALL
                .into_iter()
                .map(move |family| (family.command_name(boundary), family.handler(translation)))
        })
        .collect();

    commands.push((
        Family::MoveTo.command_name("previous-char"),
        Arc::new(move_to_previous_char),
    ));
    commands.push((
        Family::MoveTo.command_name("next-char"),
        Arc::new(move_to_next_char),
    ));
    commands
}
