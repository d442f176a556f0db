//! Cursor movement engine.
//!
//! `move_cursor` is pure: it reads the buffer and returns the moved cursor.
//! Row/column movement clamps at document edges; coordinates that are already
//! invalid when the call starts are reported as errors.
//!
//! Selection rules:
//! * Shift held with no live selection: the current offset becomes the anchor
//!   before moving. The ending follows the cursor afterwards.
//! * Shift not held: the anchor is dropped. ArrowLeft/ArrowRight with a live
//!   selection jump to its lower/upper bound instead of moving.

use core_events::{KeyEvent, MotionKind};
use core_state::{Cursor, Selection};
use core_text::{Buffer, TextError, motion::column_of_differing_kind};
use tracing::trace;

/// Apply one movement key to `cursor`. Keys that are not movements return the
/// cursor unchanged.
pub fn move_cursor(key: &KeyEvent, cursor: &Cursor, buf: &Buffer) -> Result<Cursor, TextError> {
    let mut c = *cursor;
    let Some(motion) = key.motion().filter(|m| m.is_movement()) else {
        return Ok(c);
    };
    let start = buf.position_index(c.row, c.column)?;
    let (shift, ctrl) = (key.shift(), key.ctrl());

    if shift {
        if !c.selection.has_selection() {
            c.selection.anchor = Some(start);
        }
    } else {
        if let Some((lo, hi)) = c.selection.bounds() {
            let target = match motion {
                MotionKind::ArrowLeft => Some(lo),
                MotionKind::ArrowRight => Some(hi),
                _ => None,
            };
            if let Some(target) = target {
                c.set_position(buf.coordinates(target)?);
                c.selection = Selection::at(target);
                trace!(target: "actions.motion", ?motion, to = target, "collapse_selection");
                return Ok(c);
            }
        }
        c.selection.anchor = None;
    }

    let last_row = buf.last_row();
    match motion {
        MotionKind::ArrowLeft => {
            if c.column == 0 {
                if c.row > 0 {
                    c.row -= 1;
                    c.column = buf.row_length(c.row, false)?;
                }
            } else if ctrl {
                c.column = column_of_differing_kind(buf, c.row, c.column, true)?.unwrap_or(0);
            } else {
                c.column -= 1;
            }
            c.preferred_column = c.column;
        }
        MotionKind::ArrowRight => {
            let len = buf.row_length(c.row, false)?;
            if c.column >= len {
                if c.row < last_row {
                    c.row += 1;
                    c.column = 0;
                }
            } else if ctrl {
                c.column = column_of_differing_kind(buf, c.row, c.column, false)?.unwrap_or(len);
            } else {
                c.column += 1;
            }
            c.preferred_column = c.column;
        }
        MotionKind::ArrowUp => {
            if c.row > 0 {
                c.row -= 1;
                c.column = c.preferred_column.min(buf.row_length(c.row, false)?);
            }
        }
        MotionKind::ArrowDown => {
            if c.row < last_row {
                c.row += 1;
                c.column = c.preferred_column.min(buf.row_length(c.row, false)?);
            }
        }
        MotionKind::Home => {
            if ctrl {
                c.row = 0;
            }
            c.column = 0;
            c.preferred_column = 0;
        }
        MotionKind::End => {
            if ctrl {
                c.row = last_row;
            }
            c.column = buf.row_length(c.row, false)?;
            c.preferred_column = c.column;
        }
        MotionKind::Backspace | MotionKind::Delete => {}
    }

    c.selection.ending = buf.position_index(c.row, c.column)?;
    trace!(target: "actions.motion", ?motion, shift, ctrl, from = start, to = c.selection.ending, "move");
    Ok(c)
}
