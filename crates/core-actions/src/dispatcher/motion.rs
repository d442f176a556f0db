//! Movement keys applied to every cursor of a view.

use super::DispatchResult;
use crate::EditError;
use crate::motion::move_cursor;
use core_events::KeyEvent;
use core_model::{TextModel, View};

pub(crate) fn handle_motion(
    key: &KeyEvent,
    model: &TextModel,
    view: &mut View,
) -> Result<DispatchResult, EditError> {
    let buf = model.buffer();
    // Compute every move first so a failing cursor leaves the view untouched.
    let moved = view
        .cursors()
        .iter()
        .map(|c| move_cursor(key, c, buf))
        .collect::<Result<Vec<_>, _>>()?;
    let mut changed = false;
    for (slot, mut next) in view.cursors_mut().iter_mut().zip(moved) {
        next.should_reveal = next.is_primary;
        changed |= next.row != slot.row || next.column != slot.column || next.selection != slot.selection;
        *slot = next;
    }
    tracing::trace!(target: "actions.dispatch", op = "motion", key = %key, changed, "motion");
    Ok(if changed {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    })
}
