//! Display-column computation for renderers.
//!
//! Cells are characters; on screen a tab advances to the next tab stop and
//! East Asian wide characters take two columns. Zero-width and control
//! characters count as zero.

use unicode_width::UnicodeWidthChar;

use crate::{Buffer, TextError};

/// Width in display columns of a single non-tab character.
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Display column of `(row, column)` with tabs expanded to `tab_width` stops.
pub fn display_column(
    buf: &Buffer,
    row: usize,
    column: usize,
    tab_width: usize,
) -> Result<usize, TextError> {
    let start = buf.start_of_row(row)?.end;
    let end = buf.position_index(row, column)?;
    let tab_width = tab_width.max(1);
    let mut col = 0usize;
    for cell in &buf.cells()[start..end] {
        if cell.is_tab_marker {
            col += tab_width - (col % tab_width);
        } else {
            col += char_width(cell.value);
        }
    }
    Ok(col)
}
