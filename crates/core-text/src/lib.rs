//! Character-cell text buffer with row/column addressing.
//!
//! The buffer is a flat sequence of `Cell`s plus two derived structures kept
//! in lock-step with it: the `RowIndex` (row boundaries) and the ordered tab
//! offsets. Every mutation patches both before returning, so readers never
//! observe a stale index.
//!
//! Offsets are cell (character) indices, not byte indices. Coordinates are
//! `(row, column)` with `column` counted in cells from the row start.

use thiserror::Error;
use tracing::trace;

pub mod cell;
pub mod motion;
pub mod row;
pub mod span;
pub mod width;

pub use cell::{CharacterKind, Cell, DECORATION_NONE, DecorationTag, cells_from_str};
pub use row::{RowEnding, RowEndingCensus, RowEndingKind, RowIndex, detect_row_ending};
pub use span::TextSpan;

/// Contract violations reported by buffer operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("position {position} is outside the buffer (length {len})")]
    PositionOutOfRange { position: usize, len: usize },
    #[error("row {row} does not exist (row count {row_count})")]
    RowOutOfRange { row: usize, row_count: usize },
    #[error("column {column} exceeds row {row} (length {row_length} including its ending)")]
    ColumnOutOfRange {
        row: usize,
        column: usize,
        row_length: usize,
    },
    #[error("range {start}..{start}+{count} exceeds buffer length {len}")]
    RangeOutOfBounds {
        start: usize,
        count: usize,
        len: usize,
    },
    #[error("span {start}..{end} is invalid for buffer length {len}")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },
}

/// A location expressed as (row, column) coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    pub fn origin() -> Self {
        Self { row: 0, column: 0 }
    }

    /// Clamp into the valid coordinate space of `buf` (last row, row length).
    pub fn clamp_to(&mut self, buf: &Buffer) {
        let row_count = buf.row_count();
        if row_count == 0 {
            *self = Self::origin();
            return;
        }
        if self.row >= row_count {
            self.row = row_count - 1;
        }
        let max_len = buf.rows.row_length(self.row, false).unwrap_or(0);
        if self.column > max_len {
            self.column = max_len;
        }
    }
}

#[derive(Debug, Clone)]
pub struct Buffer {
    cells: Vec<Cell>,
    rows: RowIndex,
    tab_offsets: Vec<usize>,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new("")
    }
}

impl From<&str> for Buffer {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

impl Buffer {
    /// Construct a buffer from an in-memory string slice.
    pub fn new(content: &str) -> Self {
        Self::from_cells(cells_from_str(content))
    }

    /// Construct a buffer from existing cells (decoration preserved).
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        let rows = RowIndex::build(&cells);
        let tab_offsets = tab_offsets_in(&cells, 0);
        Self {
            cells,
            rows,
            tab_offsets,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn row_index(&self) -> &RowIndex {
        &self.rows
    }

    /// Total number of rows (at least 1).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn last_row(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Ordered offsets of every tab cell.
    pub fn tab_offsets(&self) -> &[usize] {
        &self.tab_offsets
    }

    fn row_out_of_range(&self, row: usize) -> TextError {
        TextError::RowOutOfRange {
            row,
            row_count: self.rows.len(),
        }
    }

    /// `(0, StartOfFile)` for row 0, else the previous row's ending.
    pub fn start_of_row(&self, row: usize) -> Result<RowEnding, TextError> {
        self.rows
            .start_of_row(row)
            .ok_or_else(|| self.row_out_of_range(row))
    }

    /// Length of a row, excluding its terminator unless `include_line_ending`.
    pub fn row_length(&self, row: usize, include_line_ending: bool) -> Result<usize, TextError> {
        self.rows
            .row_length(row, include_line_ending)
            .ok_or_else(|| self.row_out_of_range(row))
    }

    /// Offset of `(row, column)`: row start plus column. The column may reach
    /// the row terminator but not into it.
    pub fn position_index(&self, row: usize, column: usize) -> Result<usize, TextError> {
        let start = self.start_of_row(row)?.end;
        let row_length = self.row_length(row, false)?;
        if column > row_length {
            return Err(TextError::ColumnOutOfRange {
                row,
                column,
                row_length,
            });
        }
        Ok(start + column)
    }

    pub fn position_of(&self, pos: Position) -> Result<usize, TextError> {
        self.position_index(pos.row, pos.column)
    }

    /// Coordinates of an offset in `[0, len]`.
    pub fn coordinates(&self, position: usize) -> Result<Position, TextError> {
        if position > self.cells.len() {
            return Err(TextError::PositionOutOfRange {
                position,
                len: self.cells.len(),
            });
        }
        let row = self.rows.row_of_position(position);
        let start = self.rows.start_of_row(row).map_or(0, |e| e.end);
        Ok(Position::new(row, position - start))
    }

    /// Up to `count` rows starting at `start_row`, each including its
    /// terminator cells. Rows past the end are simply not returned.
    pub fn rows(&self, start_row: usize, count: usize) -> Vec<&[Cell]> {
        let end_row = start_row.saturating_add(count).min(self.rows.len());
        (start_row..end_row)
            .filter_map(|row| {
                let start = self.rows.start_of_row(row)?.end;
                let end = self.rows.ending(row)?.end;
                Some(&self.cells[start..end])
            })
            .collect()
    }

    pub fn all_text(&self) -> String {
        self.cells.iter().map(|c| c.value).collect()
    }

    fn check_range(&self, start: usize, count: usize) -> Result<(), TextError> {
        match start.checked_add(count) {
            Some(end) if end <= self.cells.len() => Ok(()),
            _ => Err(TextError::RangeOutOfBounds {
                start,
                count,
                len: self.cells.len(),
            }),
        }
    }

    pub fn text_range(&self, start: usize, count: usize) -> Result<String, TextError> {
        self.check_range(start, count)?;
        Ok(self.cells[start..start + count]
            .iter()
            .map(|c| c.value)
            .collect())
    }

    /// Number of tab cells on `row` before `column`.
    pub fn tabs_before(&self, row: usize, column: usize) -> Result<usize, TextError> {
        let row_start = self.start_of_row(row)?.end;
        let position = self.position_index(row, column)?;
        let first = self.tab_offsets.partition_point(|&t| t < row_start);
        let last = self.tab_offsets.partition_point(|&t| t < position);
        Ok(last - first)
    }

    /// Display column of `(row, column)`; see [`width::display_column`].
    pub fn display_column(
        &self,
        row: usize,
        column: usize,
        tab_width: usize,
    ) -> Result<usize, TextError> {
        width::display_column(self, row, column, tab_width)
    }

    /// Insert `text` at `position` as one contiguous splice. Returns the
    /// number of cells inserted.
    pub fn insert_str(&mut self, position: usize, text: &str) -> Result<usize, TextError> {
        if position > self.cells.len() {
            return Err(TextError::PositionOutOfRange {
                position,
                len: self.cells.len(),
            });
        }
        let inserted = cells_from_str(text);
        let count = inserted.len();
        if count == 0 {
            return Ok(0);
        }
        self.cells.splice(position..position, inserted);
        self.reindex_from(position);
        trace!(target: "text.edit", position, count, len = self.cells.len(), "insert");
        Ok(count)
    }

    /// Remove `count` cells starting at `start`, returning them.
    pub fn remove(&mut self, start: usize, count: usize) -> Result<Vec<Cell>, TextError> {
        self.check_range(start, count)?;
        if count == 0 {
            return Ok(Vec::new());
        }
        let removed: Vec<Cell> = self.cells.drain(start..start + count).collect();
        self.reindex_from(start);
        trace!(target: "text.edit", start, count, len = self.cells.len(), "remove");
        Ok(removed)
    }

    /// Replace all content with `cells` (history restore). Full rebuild.
    pub fn replace_cells(&mut self, cells: Vec<Cell>) {
        *self = Self::from_cells(cells);
    }

    /// Replace all content with `content`, dropping decoration.
    pub fn set_content(&mut self, content: &str) {
        self.replace_cells(cells_from_str(content));
    }

    /// Overwrite the decoration tag of every cell covered by each span, in
    /// the order supplied (later spans win on overlap). All spans are
    /// validated before any cell is painted.
    pub fn apply_decoration(&mut self, spans: &[TextSpan]) -> Result<(), TextError> {
        let len = self.cells.len();
        if let Some(bad) = spans.iter().find(|s| s.start > s.end || s.end > len) {
            return Err(TextError::SpanOutOfBounds {
                start: bad.start,
                end: bad.end,
                len,
            });
        }
        for span in spans {
            for cell in &mut self.cells[span.start..span.end] {
                cell.decoration = span.decoration;
            }
        }
        Ok(())
    }

    fn reindex_from(&mut self, edit_start: usize) {
        self.rows.patch(&self.cells, edit_start);
        let keep = self.tab_offsets.partition_point(|&t| t < edit_start);
        self.tab_offsets.truncate(keep);
        self.tab_offsets
            .extend(tab_offsets_in(&self.cells[edit_start..], edit_start));
        trace!(target: "text.rows", edit_start, rows = self.rows.len(), tabs = self.tab_offsets.len(), "reindex");
    }
}

fn tab_offsets_in(cells: &[Cell], base: usize) -> Vec<usize> {
    cells
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_tab_marker)
        .map(|(i, _)| base + i)
        .collect()
}
