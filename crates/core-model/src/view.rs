use core_state::Cursor;
use core_text::Buffer;

use crate::ModelId;

/// Stable identifier for a `View`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

/// Cursor set of one view over a model.
///
/// Invariants (hold after every public call):
/// * `cursors` is never empty.
/// * exactly one cursor has `is_primary` set.
#[derive(Debug, Clone)]
pub struct View {
    pub id: ViewId,
    pub model: ModelId,
    cursors: Vec<Cursor>,
}

impl View {
    /// New view with a single primary cursor at the origin.
    pub fn new(id: ViewId, model: ModelId) -> Self {
        Self {
            id,
            model,
            cursors: vec![Cursor::primary()],
        }
    }

    pub fn cursors(&self) -> &[Cursor] {
        &self.cursors
    }

    /// Mutable access to the cursors. The set cannot grow or shrink through
    /// this; primary flags are re-normalised on the next structural call.
    pub fn cursors_mut(&mut self) -> &mut [Cursor] {
        &mut self.cursors
    }

    pub fn primary(&self) -> &Cursor {
        let idx = self.primary_index();
        &self.cursors[idx]
    }

    pub fn primary_mut(&mut self) -> &mut Cursor {
        let idx = self.primary_index();
        &mut self.cursors[idx]
    }

    fn primary_index(&self) -> usize {
        self.cursors.iter().position(|c| c.is_primary).unwrap_or(0)
    }

    /// Add a secondary cursor.
    pub fn add_cursor(&mut self, mut cursor: Cursor) {
        cursor.is_primary = false;
        self.cursors.push(cursor);
    }

    /// Make cursor `index` the primary one. Out of range is ignored.
    pub fn set_primary(&mut self, index: usize) {
        if index >= self.cursors.len() {
            return;
        }
        for (i, c) in self.cursors.iter_mut().enumerate() {
            c.is_primary = i == index;
        }
    }

    /// Drop every cursor except the primary.
    pub fn clear_secondary(&mut self) {
        let primary = *self.primary();
        self.cursors = vec![Cursor {
            is_primary: true,
            ..primary
        }];
    }

    /// Clamp every cursor into `buf` and collapse selections.
    pub fn clamp_cursors(&mut self, buf: &Buffer) {
        for c in &mut self.cursors {
            c.clamp_to(buf);
        }
        let idx = self.primary_index();
        self.set_primary(idx);
    }
}
