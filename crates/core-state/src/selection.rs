/// Anchor/ending pair over buffer offsets.
///
/// `anchor == None` or `anchor == Some(ending)` means nothing is selected.
/// The anchor is not guaranteed to be the lower bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Option<usize>,
    pub ending: usize,
}

impl Selection {
    /// Empty selection sitting at `position`.
    pub fn at(position: usize) -> Self {
        Self {
            anchor: None,
            ending: position,
        }
    }

    pub fn anchored(anchor: usize, ending: usize) -> Self {
        Self {
            anchor: Some(anchor),
            ending,
        }
    }

    pub fn has_selection(&self) -> bool {
        matches!(self.anchor, Some(a) if a != self.ending)
    }

    /// `(lower, upper)` when something is selected.
    pub fn bounds(&self) -> Option<(usize, usize)> {
        match self.anchor {
            Some(a) if a != self.ending => Some((a.min(self.ending), a.max(self.ending))),
            _ => None,
        }
    }

    pub fn lower_bound(&self) -> usize {
        self.bounds().map_or(self.ending, |(lo, _)| lo)
    }

    pub fn upper_bound(&self) -> usize {
        self.bounds().map_or(self.ending, |(_, hi)| hi)
    }

    /// Drop the anchor, leaving the ending where it is.
    pub fn collapse(&mut self) {
        self.anchor = None;
    }
}
