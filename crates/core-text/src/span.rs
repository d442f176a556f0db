use crate::cell::DecorationTag;

/// Half-open range of cell offsets `[start, end)` carrying a decoration tag.
///
/// Produced by lexers and consumed by `Buffer::apply_decoration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
    pub decoration: DecorationTag,
}

impl TextSpan {
    pub fn new(start: usize, end: usize, decoration: DecorationTag) -> Self {
        Self {
            start,
            end,
            decoration,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}
