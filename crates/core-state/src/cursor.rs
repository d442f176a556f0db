use core_text::{Buffer, Position, TextError};

use crate::selection::Selection;

/// Caret state owned by a view over a buffer.
///
/// Coordinates are only meaningful against the buffer revision they were
/// computed for; the edit engine recomputes them after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub column: usize,
    /// Column vertical motion tries to return to.
    pub preferred_column: usize,
    pub selection: Selection,
    pub is_primary: bool,
    pub should_reveal: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Cursor {
    pub fn new(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            preferred_column: column,
            selection: Selection::default(),
            is_primary: false,
            should_reveal: false,
        }
    }

    pub fn primary() -> Self {
        Self {
            is_primary: true,
            ..Self::new(0, 0)
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.column)
    }

    /// Move to `pos`, resetting the preferred column.
    pub fn set_position(&mut self, pos: Position) {
        self.row = pos.row;
        self.column = pos.column;
        self.preferred_column = pos.column;
    }

    pub fn position_index(&self, buf: &Buffer) -> Result<usize, TextError> {
        buf.position_index(self.row, self.column)
    }

    /// Text between the selection bounds, `None` when nothing is selected.
    pub fn selected_text(&self, buf: &Buffer) -> Result<Option<String>, TextError> {
        match self.selection.bounds() {
            Some((lo, hi)) => buf.text_range(lo, hi - lo).map(Some),
            None => Ok(None),
        }
    }

    /// Pull coordinates back inside `buf`, reset the preferred column and
    /// collapse the selection onto the resulting offset. Used after content is replaced wholesale.
    pub fn clamp_to(&mut self, buf: &Buffer) {
        let mut pos = self.position();
        pos.clamp_to(buf);
        self.set_position(pos);
        let ending = buf.position_of(pos).unwrap_or(0);
        self.selection = Selection::at(ending);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn selected_text_uses_bounds() {
        let buf = Buffer::new("abcdef");
        let mut c = Cursor::new(0, 1);
        assert_eq!(c.selected_text(&buf).unwrap(), None);
        c.selection = Selection::anchored(4, 1);
        assert_eq!(c.selected_text(&buf).unwrap().as_deref(), Some("bcd"));
    }

    #[test]
    fn clamp_after_shrink_collapses_selection() {
        let mut c = Cursor::new(2, 2);
        c.selection = Selection::anchored(0, 8);
        let shrunk = Buffer::new("xyz");
        c.clamp_to(&shrunk);
        assert_eq!(c.position(), Position::new(0, 2));
        assert_eq!(c.selection, Selection::at(2));
    }

    #[test]
    fn clamp_resets_preferred_column() {
        let mut c = Cursor::new(0, 3);
        c.preferred_column = 12;
        c.clamp_to(&Buffer::new("ab\nlonger row"));
        assert_eq!(c.position(), Position::new(0, 2));
        assert_eq!(c.preferred_column, 2);
    }
}
