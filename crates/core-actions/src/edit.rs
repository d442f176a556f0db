//! Multi-cursor edit engine.
//!
//! Every request is validated against the current buffer before anything is
//! mutated, then records exactly one history boundary, then applies each
//! cursor's edit as a single splice. After each splice the offsets of every
//! other cursor (and selection anchor) are shifted, so no cursor ever acts on
//! a stale offset. Row/column coordinates are recomputed from the final
//! offsets once all cursors are done.

use core_events::MotionKind;
use core_model::TextModel;
use core_state::{Cursor, EditKind, Selection};
use core_text::{Buffer, TextError, motion::column_of_differing_kind};
use tracing::trace;

use crate::EditError;

/// New position of `offset` after `[start, end)` was replaced by
/// `inserted_len` cells. Offsets inside the replaced range land at its end.
pub fn adjust_offset_after_edit(offset: usize, start: usize, end: usize, inserted_len: usize) -> usize {
    if offset < start {
        return offset;
    }
    if offset < end {
        return start + inserted_len;
    }
    offset - (end - start) + inserted_len
}

#[derive(Debug, Clone, Copy)]
struct EditRecord {
    offset: usize,
    anchor: Option<usize>,
}

impl EditRecord {
    fn selection_bounds(&self) -> Option<(usize, usize)> {
        match self.anchor {
            Some(a) if a != self.offset => Some((a.min(self.offset), a.max(self.offset))),
            _ => None,
        }
    }
}

/// Offsets of every cursor, validated against `buf`.
fn take_records(cursors: &[Cursor], buf: &Buffer) -> Result<Vec<EditRecord>, EditError> {
    if cursors.is_empty() {
        return Err(EditError::NoCursors);
    }
    cursors
        .iter()
        .map(|c| {
            let offset = c.position_index(buf)?;
            let anchor = match c.selection.anchor {
                Some(a) if a > buf.len() => {
                    return Err(TextError::PositionOutOfRange {
                        position: a,
                        len: buf.len(),
                    }
                    .into());
                }
                Some(a) if a != offset => Some(a),
                _ => None,
            };
            Ok(EditRecord { offset, anchor })
        })
        .collect()
}

fn shift_others(records: &mut [EditRecord], current: usize, start: usize, end: usize, inserted: usize) {
    for (idx, r) in records.iter_mut().enumerate() {
        if idx == current {
            continue;
        }
        r.offset = adjust_offset_after_edit(r.offset, start, end, inserted);
        if let Some(a) = r.anchor {
            let a = adjust_offset_after_edit(a, start, end, inserted);
            r.anchor = (a != r.offset).then_some(a);
        }
    }
}

/// Remove `[start, end)` on behalf of cursor `current`.
fn remove_range(
    buf: &mut Buffer,
    records: &mut [EditRecord],
    current: usize,
    start: usize,
    end: usize,
) -> Result<(), TextError> {
    if end <= start {
        return Ok(());
    }
    buf.remove(start, end - start)?;
    shift_others(records, current, start, end, 0);
    records[current] = EditRecord {
        offset: start,
        anchor: None,
    };
    Ok(())
}

/// Remove cursor `current`'s selection, if it has one.
fn remove_selection(
    buf: &mut Buffer,
    records: &mut [EditRecord],
    current: usize,
) -> Result<bool, TextError> {
    match records[current].selection_bounds() {
        Some((lo, hi)) => {
            remove_range(buf, records, current, lo, hi)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// An offset a range deletion left between the halves of a CRLF settles on
/// the end of the row's content.
fn write_back(cursors: &mut [Cursor], records: &[EditRecord], buf: &Buffer) -> Result<(), TextError> {
    for (c, r) in cursors.iter_mut().zip(records) {
        let mut pos = buf.coordinates(r.offset)?;
        pos.clamp_to(buf);
        c.set_position(pos);
        c.selection = Selection::at(buf.position_of(pos)?);
        c.should_reveal = c.is_primary;
    }
    Ok(())
}

/// Insert `text` at every cursor, replacing selections. One history step.
pub fn insert_text(model: &mut TextModel, cursors: &mut [Cursor], text: &str) -> Result<(), EditError> {
    let mut records = take_records(cursors, model.buffer())?;
    if text.is_empty() && records.iter().all(|r| r.selection_bounds().is_none()) {
        return Ok(());
    }
    model.record_boundary(EditKind::Insertion);
    let buf = model.buffer_mut();
    for i in 0..records.len() {
        remove_selection(buf, &mut records, i)?;
        let at = records[i].offset;
        let inserted = buf.insert_str(at, text)?;
        shift_others(&mut records, i, at, at, inserted);
        records[i].offset = at + inserted;
    }
    write_back(cursors, &records, buf)?;
    trace!(target: "actions.edit", cursors = records.len(), cells = text.chars().count(), "insert_text");
    Ok(())
}

/// Extent removed by a deletion motion at `offset`. Row endings are one unit.
fn deletion_extent(buf: &Buffer, offset: usize, motion: MotionKind, word: bool) -> Result<(usize, usize), EditError> {
    let cells = buf.cells();
    let is_crlf = |i: usize| {
        cells.get(i).is_some_and(|c| c.value == '\r') && cells.get(i + 1).is_some_and(|c| c.value == '\n')
    };
    match motion {
        MotionKind::Backspace => {
            if offset == 0 {
                return Ok((0, 0));
            }
            if word {
                let pos = buf.coordinates(offset)?;
                if pos.column > 0 {
                    let col = column_of_differing_kind(buf, pos.row, pos.column, true)?.unwrap_or(0);
                    return Ok((offset - (pos.column - col), offset));
                }
            }
            let unit = if offset >= 2 && is_crlf(offset - 2) { 2 } else { 1 };
            Ok((offset - unit, offset))
        }
        MotionKind::Delete => {
            if offset >= buf.len() {
                return Ok((offset, offset));
            }
            if word {
                let pos = buf.coordinates(offset)?;
                let len = buf.row_length(pos.row, false)?;
                if pos.column < len {
                    let col = column_of_differing_kind(buf, pos.row, pos.column, false)?.unwrap_or(len);
                    return Ok((offset, offset + (col - pos.column)));
                }
            }
            let unit = if is_crlf(offset) { 2 } else { 1 };
            Ok((offset, offset + unit))
        }
        other => Err(EditError::UnrecognizedMotion(other)),
    }
}

/// Backspace/Delete at every cursor. A live selection is deleted instead of
/// the neighbouring character. With `word`, the deletion extends to the
/// nearest character-kind boundary on the row.
pub fn delete_by_motion(
    model: &mut TextModel,
    cursors: &mut [Cursor],
    motion: MotionKind,
    word: bool,
) -> Result<(), EditError> {
    if !motion.is_deletion() {
        return Err(EditError::UnrecognizedMotion(motion));
    }
    let mut records = take_records(cursors, model.buffer())?;
    let mut removes_anything = false;
    for r in &records {
        let (start, end) = deletion_extent(model.buffer(), r.offset, motion, word)?;
        removes_anything |= r.selection_bounds().is_some() || end > start;
    }
    if !removes_anything {
        trace!(target: "actions.edit", cursors = records.len(), ?motion, "delete_by_motion_noop");
        return Ok(());
    }
    model.record_boundary(EditKind::Deletion);
    let buf = model.buffer_mut();
    for i in 0..records.len() {
        if remove_selection(buf, &mut records, i)? {
            continue;
        }
        let (start, end) = deletion_extent(buf, records[i].offset, motion, word)?;
        remove_range(buf, &mut records, i, start, end)?;
    }
    write_back(cursors, &records, buf)?;
    trace!(target: "actions.edit", cursors = records.len(), ?motion, word, "delete_by_motion");
    Ok(())
}

/// Remove `count` cells starting at `start` as one atomic step. Cursors inside
/// the range collapse to `start`; later cursors shift left.
pub fn delete_by_range(
    model: &mut TextModel,
    cursors: &mut [Cursor],
    start: usize,
    count: usize,
) -> Result<(), EditError> {
    let mut records = take_records(cursors, model.buffer())?;
    let len = model.buffer().len();
    let end = start
        .checked_add(count)
        .filter(|end| *end <= len)
        .ok_or(TextError::RangeOutOfBounds { start, count, len })?;
    if count == 0 {
        return Ok(());
    }
    model.record_boundary(EditKind::Deletion);
    let buf = model.buffer_mut();
    buf.remove(start, count)?;
    shift_others(&mut records, usize::MAX, start, end, 0);
    write_back(cursors, &records, buf)?;
    trace!(target: "actions.edit", start, count, cursors = records.len(), "delete_by_range");
    Ok(())
}
