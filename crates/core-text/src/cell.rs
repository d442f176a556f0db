//! Character cells: the smallest unit of buffer content.

/// Syntax-highlight class identifier painted onto a cell by the lexer pipeline.
pub type DecorationTag = u8;

/// Tag carried by freshly inserted cells and by plain text.
pub const DECORATION_NONE: DecorationTag = 0;

/// One character of buffer content plus its highlight tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub value: char,
    pub decoration: DecorationTag,
    pub is_tab_marker: bool,
}

impl Cell {
    pub fn new(value: char) -> Self {
        Self {
            value,
            decoration: DECORATION_NONE,
            is_tab_marker: value == '\t',
        }
    }

    pub fn kind(&self) -> CharacterKind {
        CharacterKind::of(self.value)
    }
}

impl From<char> for Cell {
    fn from(value: char) -> Self {
        Self::new(value)
    }
}

/// Classification used by word-skip cursor motion.
///
/// Every character falls into exactly one class: whitespace is checked first
/// (so row endings are whitespace), then alphanumerics, everything else is
/// punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterKind {
    LetterOrDigit,
    Whitespace,
    Punctuation,
}

impl CharacterKind {
    pub fn of(c: char) -> Self {
        if c.is_whitespace() {
            CharacterKind::Whitespace
        } else if c.is_alphanumeric() {
            CharacterKind::LetterOrDigit
        } else {
            CharacterKind::Punctuation
        }
    }
}

/// Convert text into undecorated cells.
pub fn cells_from_str(text: &str) -> Vec<Cell> {
    text.chars().map(Cell::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_marker_follows_value() {
        assert!(Cell::new('\t').is_tab_marker);
        assert!(!Cell::new(' ').is_tab_marker);
        assert_eq!(Cell::new('x').decoration, DECORATION_NONE);
    }

    #[test]
    fn character_kinds() {
        assert_eq!(CharacterKind::of('a'), CharacterKind::LetterOrDigit);
        assert_eq!(CharacterKind::of('7'), CharacterKind::LetterOrDigit);
        assert_eq!(CharacterKind::of('é'), CharacterKind::LetterOrDigit);
        assert_eq!(CharacterKind::of(' '), CharacterKind::Whitespace);
        assert_eq!(CharacterKind::of('\t'), CharacterKind::Whitespace);
        assert_eq!(CharacterKind::of('\n'), CharacterKind::Whitespace);
        assert_eq!(CharacterKind::of('\r'), CharacterKind::Whitespace);
        assert_eq!(CharacterKind::of('_'), CharacterKind::Punctuation);
        assert_eq!(CharacterKind::of('('), CharacterKind::Punctuation);
        assert_eq!(CharacterKind::of('😀'), CharacterKind::Punctuation);
    }
}
