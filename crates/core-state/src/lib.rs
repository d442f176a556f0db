//! Position and history state layered over a `core_text::Buffer`.
//!
//! - `Selection` / `Cursor`: per-view caret state. Many cursors may reference
//!   one buffer; none of them is owned by it.
//! - `EditHistory`: linear undo/redo over full-content snapshots taken at
//!   edit-kind transitions. Same-kind edits coalesce, so a typing burst undoes
//!   as one step.
//!
//! Telemetry: history lifecycle emits `trace!` events on target `state.undo`
//! (`persist_block`, `coalesce`, `undo`, `redo`, trims and clears). Only counts
//! and indices are logged, never content.

pub mod cursor;
pub mod selection;
pub mod undo;

pub use cursor::Cursor;
pub use selection::Selection;
pub use undo::{EditBlock, EditHistory, EditKind, UNDO_HISTORY_MAX};
