//! Buffer-level motion helpers.
//!
//! These operate purely on a `Buffer` and row/column coordinates and are free
//! of cursor or selection state; the cursor movement engine in `core-actions`
//! builds on them.

use crate::{Buffer, TextError};

/// Column of the first cell whose `CharacterKind` differs from the cell the
/// scan starts on, scanning within the row (terminator excluded).
///
/// Forward scans start at the cell under `column`; backward scans start at the
/// cell just before it and report the column *after* the differing cell, so
/// the result is the start of the run the cursor was in. `None` means the scan
/// hit the row boundary without a change of kind.
pub fn column_of_differing_kind(
    buf: &Buffer,
    row: usize,
    column: usize,
    backwards: bool,
) -> Result<Option<usize>, TextError> {
    let row_start = buf.start_of_row(row)?.end;
    let row_end = row_start + buf.row_length(row, false)?;
    let cells = buf.cells();
    let mut pos = buf.position_index(row, column)?;
    if backwards {
        if pos <= row_start {
            return Ok(None);
        }
        pos -= 1;
    }
    if pos >= row_end {
        return Ok(None);
    }
    let starting_kind = cells[pos].kind();
    if backwards {
        loop {
            if cells[pos].kind() != starting_kind {
                return Ok(Some(pos + 1 - row_start));
            }
            if pos == row_start {
                return Ok(None);
            }
            pos -= 1;
        }
    }
    while pos < row_end {
        if cells[pos].kind() != starting_kind {
            return Ok(Some(pos - row_start));
        }
        pos += 1;
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_stops_at_end_of_word() {
        let buf = Buffer::new("foo bar");
        assert_eq!(column_of_differing_kind(&buf, 0, 0, false).unwrap(), Some(3));
        assert_eq!(column_of_differing_kind(&buf, 0, 3, false).unwrap(), Some(4));
        // Last run reaches the row boundary.
        assert_eq!(column_of_differing_kind(&buf, 0, 4, false).unwrap(), None);
        assert_eq!(column_of_differing_kind(&buf, 0, 7, false).unwrap(), None);
    }

    #[test]
    fn backward_returns_start_of_run() {
        let buf = Buffer::new("foo bar");
        assert_eq!(column_of_differing_kind(&buf, 0, 7, true).unwrap(), Some(4));
        assert_eq!(column_of_differing_kind(&buf, 0, 4, true).unwrap(), Some(3));
        assert_eq!(column_of_differing_kind(&buf, 0, 3, true).unwrap(), None);
        assert_eq!(column_of_differing_kind(&buf, 0, 0, true).unwrap(), None);
    }

    #[test]
    fn scan_never_crosses_row_terminator() {
        let buf = Buffer::new("ab\ncd");
        assert_eq!(column_of_differing_kind(&buf, 0, 0, false).unwrap(), None);
        assert_eq!(column_of_differing_kind(&buf, 1, 2, true).unwrap(), None);
        assert_eq!(column_of_differing_kind(&buf, 1, 0, true).unwrap(), None);
    }

    #[test]
    fn punctuation_is_its_own_kind() {
        let buf = Buffer::new("a.b");
        assert_eq!(column_of_differing_kind(&buf, 0, 1, false).unwrap(), Some(2));
        assert_eq!(column_of_differing_kind(&buf, 0, 2, true).unwrap(), Some(1));
    }

    #[test]
    fn invalid_row_is_an_error() {
        let buf = Buffer::new("ab");
        assert!(column_of_differing_kind(&buf, 3, 0, false).is_err());
    }
}
