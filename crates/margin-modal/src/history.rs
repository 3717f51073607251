//! Bounded undo/redo history of content snapshots.

use std::collections::VecDeque;

/// Content and caret offset at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub content: String,
    pub offset: usize,
}

impl Snapshot {
    pub fn new(content: impl Into<String>, offset: usize) -> Self {
        Self {
            content: content.into(),
            offset,
        }
    }
}

/// Undo and redo stacks for one editing session.
///
/// The undo stack holds at most `limit` snapshots and drops the oldest one
/// first. The redo stack is unbounded but emptied by every new snapshot.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    limit: usize,
}

impl UndoHistory {
    /// Create an empty history. A limit of 0 is treated as 1.
    pub fn new(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record the state before a mutating operation.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.redo.clear();
        self.push_undo(snapshot);
    }

    /// Step back. `current` is the state being left; it becomes redoable.
    /// Returns the state to restore, or `None` when there is nothing to undo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo.pop()?;
        self.push_undo(current);
        Some(next)
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        self.undo.push_back(snapshot);
        while self.undo.len() > self.limit {
            self.undo.pop_front();
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo_round_trip() {
        let mut history = UndoHistory::new(10);
        history.record(Snapshot::new("a", 0));

        let restored = history.undo(Snapshot::new("ab", 2)).unwrap();
        assert_eq!(restored, Snapshot::new("a", 0));
        assert!(history.can_redo());

        let again = history.redo(Snapshot::new("a", 0)).unwrap();
        assert_eq!(again, Snapshot::new("ab", 2));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut history = UndoHistory::new(10);
        assert!(history.undo(Snapshot::new("x", 0)).is_none());
        assert!(history.redo(Snapshot::new("x", 0)).is_none());
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = UndoHistory::new(10);
        history.record(Snapshot::new("a", 0));
        history.undo(Snapshot::new("b", 0));
        assert_eq!(history.redo_len(), 1);

        history.record(Snapshot::new("a", 0));
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn test_bound_evicts_oldest() {
        let mut history = UndoHistory::new(3);
        for i in 0..5 {
            history.record(Snapshot::new(i.to_string(), i));
        }
        assert_eq!(history.undo_len(), 3);

        let newest = history.undo(Snapshot::new("5", 5)).unwrap();
        assert_eq!(newest.content, "4");
        history.undo(Snapshot::new("4", 4));
        let oldest = history.undo(Snapshot::new("3", 3)).unwrap();
        assert_eq!(oldest.content, "2");
        assert!(!history.can_undo());
    }

    #[test]
    fn test_zero_limit_keeps_one() {
        let history = UndoHistory::new(0);
        assert_eq!(history.limit(), 1);
    }
}
