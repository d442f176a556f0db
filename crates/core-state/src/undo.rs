use core_text::{Buffer, Cell};
use tracing::trace;

/// Default cap on persisted edit blocks.
pub const UNDO_HISTORY_MAX: usize = 200;

/// Grouping label deciding whether consecutive edits coalesce.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditKind {
    Insertion,
    Deletion,
    /// Persists a pending block ahead of an undo.
    ForcePersist,
    /// Caller-defined grouping (e.g. "paste", "format").
    Other(String),
}

/// Full-content snapshot taken at an edit-kind transition.
#[derive(Debug, Clone)]
pub struct EditBlock {
    pub kind: EditKind,
    pub content: Vec<Cell>,
}

/// Linear undo/redo history over full-content snapshots.
///
/// Each persisted block holds the content as it was when an edit of that kind
/// began. `current_index == blocks.len()` means an edit run is in progress
/// and its result has not been captured yet.
#[derive(Debug, Clone)]
pub struct EditHistory {
    blocks: Vec<EditBlock>,
    current_index: usize,
    max_blocks: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EditHistory {
    pub fn new() -> Self {
        Self::with_capacity_limit(UNDO_HISTORY_MAX)
    }

    /// History keeping at most `max_blocks` persisted blocks (at least 2, so a
    /// pending run can always be persisted next to its starting snapshot).
    pub fn with_capacity_limit(max_blocks: usize) -> Self {
        Self {
            blocks: Vec::new(),
            current_index: 0,
            max_blocks: max_blocks.max(2),
        }
    }

    pub fn blocks(&self) -> &[EditBlock] {
        &self.blocks
    }
    pub fn current_index(&self) -> usize {
        self.current_index
    }
    pub fn max_blocks(&self) -> usize {
        self.max_blocks
    }
    pub fn is_pending(&self) -> bool {
        !self.blocks.is_empty() && self.current_index == self.blocks.len()
    }
    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }
    pub fn can_redo(&self) -> bool {
        self.current_index + 1 < self.blocks.len()
    }

    /// Mark the start of an edit of `kind` against `buffer`'s current content.
    ///
    /// Consecutive edits of the same kind while a run is pending coalesce into
    /// that run. Anything else persists a new block; redo entries beyond the
    /// current index are discarded first.
    pub fn record_boundary(&mut self, kind: EditKind, buffer: &Buffer) {
        if self.current_index == self.blocks.len()
            && self.blocks.last().is_some_and(|b| b.kind == kind)
        {
            trace!(target: "state.undo", index = self.current_index, ?kind, "coalesce");
            return;
        }
        if self.current_index < self.blocks.len() {
            let dropped = self.blocks.len() - self.current_index;
            self.blocks.truncate(self.current_index);
            trace!(target: "state.undo", dropped, "redo_entries_discarded");
        }
        self.blocks.push(EditBlock {
            kind,
            content: buffer.cells().to_vec(),
        });
        self.current_index = self.blocks.len();
        trace!(target: "state.undo", blocks = self.blocks.len(), cells = buffer.len(), "persist_block");
        while self.blocks.len() > self.max_blocks {
            self.blocks.remove(0);
            self.current_index = self.current_index.saturating_sub(1);
            trace!(target: "state.undo", "history_trimmed");
        }
    }

    /// Step back one block. Returns the content to restore, or `None` when
    /// there is nothing to undo. A pending run is persisted first so it can
    /// be redone.
    pub fn undo(&mut self, buffer: &Buffer) -> Option<Vec<Cell>> {
        if self.current_index == 0 {
            return None;
        }
        if self.current_index == self.blocks.len() {
            self.record_boundary(EditKind::ForcePersist, buffer);
            self.current_index -= 1;
        }
        self.current_index -= 1;
        trace!(target: "state.undo", index = self.current_index, blocks = self.blocks.len(), "undo");
        self.blocks.get(self.current_index).map(|b| b.content.clone())
    }

    /// Step forward one block; `None` at the newest persisted block.
    pub fn redo(&mut self) -> Option<Vec<Cell>> {
        if !self.can_redo() {
            return None;
        }
        self.current_index += 1;
        trace!(target: "state.undo", index = self.current_index, blocks = self.blocks.len(), "redo");
        self.blocks.get(self.current_index).map(|b| b.content.clone())
    }

    /// Drop every block; used when content is reloaded.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.current_index = 0;
        trace!(target: "state.undo", "history_cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(cells: &[Cell]) -> String {
        cells.iter().map(|c| c.value).collect()
    }

    /// Simulates the edit engine: boundary first, then mutation.
    fn edit(h: &mut EditHistory, buf: &mut Buffer, kind: EditKind, f: impl FnOnce(&mut Buffer)) {
        h.record_boundary(kind, buf);
        f(buf);
    }

    fn restore(buf: &mut Buffer, cells: Option<Vec<Cell>>) {
        if let Some(cells) = cells {
            buf.replace_cells(cells);
        }
    }

    #[test]
    fn same_kind_run_is_one_step() {
        let mut h = EditHistory::new();
        let mut buf = Buffer::default();
        for (i, ch) in "hello".chars().enumerate() {
            edit(&mut h, &mut buf, EditKind::Insertion, |b| {
                b.insert_str(i, &ch.to_string()).unwrap();
            });
        }
        assert_eq!(h.blocks().len(), 1);
        assert!(h.is_pending());
        let restored = h.undo(&buf);
        restore(&mut buf, restored);
        assert_eq!(buf.all_text(), "");
        assert!(!h.can_undo());
        assert_eq!(h.undo(&buf).map(|c| text(&c)), None);
    }

    #[test]
    fn kind_switch_makes_two_steps() {
        let mut h = EditHistory::new();
        let mut buf = Buffer::default();
        edit(&mut h, &mut buf, EditKind::Insertion, |b| {
            b.insert_str(0, "ab").unwrap();
        });
        edit(&mut h, &mut buf, EditKind::Deletion, |b| {
            b.remove(1, 1).unwrap();
        });
        let r = h.undo(&buf);
        restore(&mut buf, r);
        assert_eq!(buf.all_text(), "ab");
        let r = h.undo(&buf);
        restore(&mut buf, r);
        assert_eq!(buf.all_text(), "");
        assert!(h.undo(&buf).is_none());
    }

    #[test]
    fn undo_then_redo_restores_content() {
        let mut h = EditHistory::new();
        let mut buf = Buffer::default();
        edit(&mut h, &mut buf, EditKind::Insertion, |b| {
            b.insert_str(0, "one").unwrap();
        });
        edit(&mut h, &mut buf, EditKind::Deletion, |b| {
            b.remove(0, 1).unwrap();
        });
        let before = buf.all_text();
        let r = h.undo(&buf);
        restore(&mut buf, r);
        let r = h.redo();
        restore(&mut buf, r);
        assert_eq!(buf.all_text(), before);
        assert!(h.redo().is_none());
    }

    #[test]
    fn new_edit_after_undo_discards_redo() {
        let mut h = EditHistory::new();
        let mut buf = Buffer::default();
        edit(&mut h, &mut buf, EditKind::Insertion, |b| {
            b.insert_str(0, "abc").unwrap();
        });
        let r = h.undo(&buf);
        restore(&mut buf, r);
        assert!(h.can_redo());
        edit(&mut h, &mut buf, EditKind::Insertion, |b| {
            b.insert_str(0, "x").unwrap();
        });
        assert!(!h.can_redo());
        let r = h.undo(&buf);
        restore(&mut buf, r);
        assert_eq!(buf.all_text(), "");
    }

    #[test]
    fn cap_drops_oldest_blocks() {
        let mut h = EditHistory::with_capacity_limit(3);
        let mut buf = Buffer::default();
        for i in 0..6 {
            let kind = if i % 2 == 0 {
                EditKind::Insertion
            } else {
                EditKind::Other(format!("k{i}"))
            };
            edit(&mut h, &mut buf, kind, |b| {
                b.insert_str(b.len(), "x").unwrap();
            });
        }
        assert_eq!(h.blocks().len(), 3);
        assert_eq!(h.current_index(), 3);
        let mut steps = 0;
        while let Some(cells) = h.undo(&buf) {
            buf.replace_cells(cells);
            steps += 1;
        }
        assert_eq!(steps, 2);
        assert_eq!(buf.all_text(), "xxxx");
    }

    #[test]
    fn clear_resets() {
        let mut h = EditHistory::new();
        let buf = Buffer::new("a");
        h.record_boundary(EditKind::Insertion, &buf);
        h.clear();
        assert_eq!(h.current_index(), 0);
        assert!(h.blocks().is_empty());
        assert!(h.undo(&buf).is_none());
    }
}
