//! Key routing into the edit engine.
//!
//! Movement keys go to `motion`. Backspace/Delete become delete-by-motion
//! (Ctrl deletes a word). Enter inserts the model's configured row ending,
//! Tab a tab character, printable characters themselves. Esc drops secondary
//! cursors and collapses selections. Anything else is ignored.

use super::{DispatchResult, motion};
use crate::EditError;
use crate::edit::{delete_by_motion, delete_by_range, insert_text};
use core_events::{KeyCode, KeyEvent, MotionKind};
use core_model::{TextModel, View};

pub(crate) fn handle_key(
    key: &KeyEvent,
    model: &mut TextModel,
    view: &mut View,
) -> Result<DispatchResult, EditError> {
    if let Some(m) = key.motion() {
        if m.is_movement() {
            return motion::handle_motion(key, model, view);
        }
        return handle_delete_motion(m, key.ctrl(), model, view);
    }
    match key.code {
        KeyCode::Enter => {
            let ending = model.using_row_ending_kind().as_str();
            handle_insert(ending, model, view)
        }
        KeyCode::Tab => handle_insert("\t", model, view),
        KeyCode::Char(c) if !key.ctrl() && !key.alt() => {
            let mut tmp = [0u8; 4];
            handle_insert(c.encode_utf8(&mut tmp), model, view)
        }
        KeyCode::Esc => Ok(handle_escape(view)),
        _ => {
            tracing::trace!(target: "actions.dispatch", op = "ignored", key = %key, "edit");
            Ok(DispatchResult::clean())
        }
    }
}

pub(crate) fn handle_insert(
    text: &str,
    model: &mut TextModel,
    view: &mut View,
) -> Result<DispatchResult, EditError> {
    let before = model.revision();
    insert_text(model, view.cursors_mut(), text)?;
    tracing::trace!(target: "actions.dispatch", op = "insert", cursors = view.cursors().len(), revision = model.revision(), "edit");
    Ok(changed_since(before, model))
}

pub(crate) fn handle_delete_motion(
    motion: MotionKind,
    word: bool,
    model: &mut TextModel,
    view: &mut View,
) -> Result<DispatchResult, EditError> {
    let before = model.revision();
    delete_by_motion(model, view.cursors_mut(), motion, word)?;
    tracing::trace!(target: "actions.dispatch", op = "delete_motion", %motion, word, "edit");
    Ok(changed_since(before, model))
}

pub(crate) fn handle_delete_range(
    start: usize,
    count: usize,
    model: &mut TextModel,
    view: &mut View,
) -> Result<DispatchResult, EditError> {
    let before = model.revision();
    delete_by_range(model, view.cursors_mut(), start, count)?;
    tracing::trace!(target: "actions.dispatch", op = "delete_range", start, count, "edit");
    Ok(changed_since(before, model))
}

fn handle_escape(view: &mut View) -> DispatchResult {
    let had_extra = view.cursors().len() > 1;
    let had_selection = view.cursors().iter().any(|c| c.selection.has_selection());
    view.clear_secondary();
    view.primary_mut().selection.collapse();
    tracing::trace!(target: "actions.dispatch", op = "escape", had_extra, had_selection, "edit");
    if had_extra || had_selection {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

fn changed_since(revision: u64, model: &TextModel) -> DispatchResult {
    if model.revision() != revision {
        DispatchResult::edited()
    } else {
        DispatchResult::clean()
    }
}
