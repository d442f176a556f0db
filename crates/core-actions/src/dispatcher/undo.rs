//! Undo / Redo dispatch.
//!
//! History restores whole snapshots, so cursor offsets cannot be shifted the
//! way the edit engine shifts them. Every cursor of the view is clamped into
//! the restored buffer instead and its selection collapsed.

use super::DispatchResult;
use core_model::{TextModel, View};

pub(crate) fn handle_undo(model: &mut TextModel, view: &mut View) -> DispatchResult {
    if model.undo() {
        view.clamp_cursors(model.buffer());
        tracing::trace!(target: "actions.dispatch", op = "undo", revision = model.revision(), "undo");
        DispatchResult::buffer_replaced()
    } else {
        DispatchResult::clean()
    }
}

pub(crate) fn handle_redo(model: &mut TextModel, view: &mut View) -> DispatchResult {
    if model.redo() {
        view.clamp_cursors(model.buffer());
        tracing::trace!(target: "actions.dispatch", op = "redo", revision = model.revision(), "redo");
        DispatchResult::buffer_replaced()
    } else {
        DispatchResult::clean()
    }
}
