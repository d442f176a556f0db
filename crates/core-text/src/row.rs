//! Row index: maps row numbers to buffer offsets.
//!
//! One `RowEnding` per row, in row order. Row `i` spans
//! `[start_of_row(i).end, entries[i].end)`; the final entry is always an
//! `EndOfFile` marker at the buffer length.
//!
//! Invariants (checked by `debug_validate` in tests):
//! * the index is never empty once built;
//! * line-break entries have strictly increasing end offsets;
//! * the `EndOfFile` entry is last and its end is `>=` the previous entry
//!   (equal when the document ends with a row ending, i.e. an empty last row).

use crate::cell::Cell;

/// Classification of a row terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowEndingKind {
    StartOfFile,
    EndOfFile,
    LineFeed,
    CarriageReturnLineFeed,
    CarriageReturn,
}

impl RowEndingKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RowEndingKind::StartOfFile | RowEndingKind::EndOfFile => "",
            RowEndingKind::LineFeed => "\n",
            RowEndingKind::CarriageReturnLineFeed => "\r\n",
            RowEndingKind::CarriageReturn => "\r",
        }
    }

    /// Number of cells the terminator occupies.
    pub fn len(self) -> usize {
        self.as_str().len()
    }

    pub fn is_line_break(self) -> bool {
        self.len() > 0
    }
}

/// A row terminator and the exclusive end offset of the row it closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowEnding {
    pub end: usize,
    pub kind: RowEndingKind,
}

impl RowEnding {
    pub const fn new(end: usize, kind: RowEndingKind) -> Self {
        Self { end, kind }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowIndex {
    entries: Vec<RowEnding>,
}

impl RowIndex {
    /// Full rebuild from scratch.
    pub fn build(cells: &[Cell]) -> Self {
        let mut index = Self::default();
        index.patch(cells, 0);
        index
    }

    /// Re-derive every entry that could be affected by a mutation starting at
    /// `edit_start`. Entries ending strictly before `edit_start` are kept
    /// (their terminator lies wholly in unchanged content); the tail is
    /// rescanned. Produces the same entries as `build`.
    pub fn patch(&mut self, cells: &[Cell], edit_start: usize) {
        let keep = self
            .entries
            .partition_point(|e| e.kind.is_line_break() && e.end < edit_start);
        self.entries.truncate(keep);
        let mut i = self.entries.last().map_or(0, |e| e.end);
        while i < cells.len() {
            match cells[i].value {
                '\r' => {
                    if cells.get(i + 1).is_some_and(|c| c.value == '\n') {
                        i += 2;
                        self.push(i, RowEndingKind::CarriageReturnLineFeed);
                    } else {
                        i += 1;
                        self.push(i, RowEndingKind::CarriageReturn);
                    }
                }
                '\n' => {
                    i += 1;
                    self.push(i, RowEndingKind::LineFeed);
                }
                _ => i += 1,
            }
        }
        self.push(cells.len(), RowEndingKind::EndOfFile);
    }

    fn push(&mut self, end: usize, kind: RowEndingKind) {
        self.entries.push(RowEnding::new(end, kind));
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RowEnding] {
        &self.entries
    }

    /// Terminator closing `row`.
    pub fn ending(&self, row: usize) -> Option<RowEnding> {
        self.entries.get(row).copied()
    }

    /// The entry a row starts after: `(0, StartOfFile)` for row 0, else the
    /// previous row's ending.
    pub fn start_of_row(&self, row: usize) -> Option<RowEnding> {
        if row == 0 {
            return Some(RowEnding::new(0, RowEndingKind::StartOfFile));
        }
        if row < self.entries.len() {
            Some(self.entries[row - 1])
        } else {
            None
        }
    }

    /// Length of `row`, excluding its terminator unless `include_line_ending`.
    pub fn row_length(&self, row: usize, include_line_ending: bool) -> Option<usize> {
        let start = self.start_of_row(row)?.end;
        let ending = self.ending(row)?;
        let with_ending = ending.end - start;
        if include_line_ending {
            Some(with_ending)
        } else {
            Some(with_ending - ending.kind.len())
        }
    }

    /// Row containing `position`: scan from the last row backward for the
    /// first row whose start offset is `<= position`. Ties resolve toward the
    /// later row. An empty index maps everything to row 0.
    pub fn row_of_position(&self, position: usize) -> usize {
        for row in (0..self.entries.len()).rev() {
            let start = if row == 0 { 0 } else { self.entries[row - 1].end };
            if start <= position {
                return row;
            }
        }
        debug_assert!(
            self.entries.is_empty(),
            "row 0 starts at offset 0 so the scan always matches"
        );
        0
    }

    #[cfg(test)]
    pub(crate) fn debug_validate(&self, len: usize) {
        assert!(!self.entries.is_empty(), "index must not be empty");
        let last = self.entries[self.entries.len() - 1];
        assert_eq!(last.kind, RowEndingKind::EndOfFile);
        assert_eq!(last.end, len);
        let breaks = &self.entries[..self.entries.len() - 1];
        for pair in breaks.windows(2) {
            assert!(pair[1].end > pair[0].end, "row ends must increase");
        }
        if let Some(prev) = breaks.last() {
            assert!(last.end >= prev.end);
        }
    }
}

/// Counts of each row ending style found in a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowEndingCensus {
    pub crlf: usize,
    pub lf: usize,
    pub cr: usize,
}

impl RowEndingCensus {
    pub fn count(input: &str) -> Self {
        let bytes = input.as_bytes();
        let mut census = Self::default();
        let mut i = 0usize;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' => {
                    if i + 1 < bytes.len() && bytes[i + 1] == b'\n' {
                        census.crlf += 1;
                        i += 2;
                    } else {
                        census.cr += 1;
                        i += 1;
                    }
                }
                b'\n' => {
                    census.lf += 1;
                    i += 1;
                }
                _ => i += 1,
            }
        }
        census
    }

    /// Majority style; ties resolved by precedence CRLF > LF > CR. `None`
    /// when the text has no row endings.
    pub fn dominant(&self) -> Option<RowEndingKind> {
        let mut best = None;
        let mut max = 0usize;
        for (kind, count) in [
            (RowEndingKind::CarriageReturnLineFeed, self.crlf),
            (RowEndingKind::LineFeed, self.lf),
            (RowEndingKind::CarriageReturn, self.cr),
        ] {
            if count > max {
                max = count;
                best = Some(kind);
            }
        }
        best
    }

    /// True if more than one style occurs.
    pub fn is_mixed(&self) -> bool {
        [self.crlf, self.lf, self.cr].iter().filter(|c| **c > 0).count() > 1
    }
}

/// Row ending a document predominantly uses, if any.
pub fn detect_row_ending(input: &str) -> Option<RowEndingKind> {
    RowEndingCensus::count(input).dominant()
}
