//! Editing operations over a `TextModel` and the cursors of a `View`.
//!
//! * `motion`: pure cursor movement (arrow keys, Home/End, word skip, shift
//!   selection).
//! * `edit`: the multi-cursor edit engine (insert, delete-by-motion,
//!   delete-by-range). Each request is validated before any mutation and
//!   produces exactly one undo step.
//! * `dispatcher`: maps `Command`s onto the two engines plus undo/redo and
//!   reports what changed.

use core_events::MotionKind;
use core_text::TextError;
use thiserror::Error;

pub mod dispatcher;
pub mod edit;
pub mod motion;

pub use dispatcher::{Command, DispatchResult, dispatch};
pub use edit::{adjust_offset_after_edit, delete_by_motion, delete_by_range, insert_text};
pub use motion::move_cursor;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error(transparent)]
    Text(#[from] TextError),
    #[error("motion `{0}` is not a deletion")]
    UnrecognizedMotion(MotionKind),
    #[error("view has no cursors")]
    NoCursors,
}
