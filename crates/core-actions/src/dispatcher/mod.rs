//! Dispatcher applying `Command`s to a model and one of its views.
//!
//! Sub-modules:
//! * `motion` - cursor movement for every cursor of the view
//! * `edit`   - key routing into the edit engine
//! * `undo`   - undo / redo plus cursor repair
//!
//! The dispatcher never holds state of its own; callers own the model (via
//! the registry) and the view, and pass both in per command.

use core_events::{KeyEvent, MotionKind};
use core_model::{TextModel, View};

use crate::EditError;

mod edit;
mod motion;
mod undo;

/// Host-level request routed through `dispatch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Raw key: movement, deletion, Enter/Tab/printable insertion, Esc.
    Key(KeyEvent),
    InsertText(String),
    /// Backspace/Delete as an explicit motion. `word` extends to the nearest
    /// character-kind boundary.
    DeleteByMotion { motion: MotionKind, word: bool },
    DeleteByRange { start: usize, count: usize },
    Undo,
    Redo,
}

/// Result of dispatching a single `Command`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// Something visible changed (cursor, selection or text).
    pub dirty: bool,
    /// Buffer content changed; the owner should schedule a lex pass.
    pub content_changed: bool,
    /// Whole buffer content was swapped (undo/redo); cursors were clamped
    /// rather than shifted and any per-row caches are invalid.
    pub buffer_replaced: bool,
}

impl DispatchResult {
    pub fn clean() -> Self {
        Self {
            dirty: false,
            content_changed: false,
            buffer_replaced: false,
        }
    }
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            content_changed: false,
            buffer_replaced: false,
        }
    }
    pub fn edited() -> Self {
        Self {
            dirty: true,
            content_changed: true,
            buffer_replaced: false,
        }
    }
    pub fn buffer_replaced() -> Self {
        Self {
            dirty: true,
            content_changed: true,
            buffer_replaced: true,
        }
    }
}

/// Apply `command` to `model` through `view`'s cursors.
///
/// On error nothing was mutated: the buffer, history, revision and cursors
/// are exactly as before the call.
pub fn dispatch(
    command: Command,
    model: &mut TextModel,
    view: &mut View,
) -> Result<DispatchResult, EditError> {
    debug_assert_eq!(view.model, model.id(), "view dispatched against a foreign model");
    match command {
        Command::Key(key) => edit::handle_key(&key, model, view),
        Command::InsertText(text) => edit::handle_insert(&text, model, view),
        Command::DeleteByMotion { motion, word } => {
            edit::handle_delete_motion(motion, word, model, view)
        }
        Command::DeleteByRange { start, count } => {
            edit::handle_delete_range(start, count, model, view)
        }
        Command::Undo => Ok(undo::handle_undo(model, view)),
        Command::Redo => Ok(undo::handle_redo(model, view)),
    }
}
