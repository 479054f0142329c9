//! # Snapshot History
//!
//! Linear undo/redo over whole-tree snapshots.
//!
//! ## Design
//!
//! - Every committed edit pushes an immutable snapshot of the tree
//! - Undo/redo move a cursor; history contents never change
//! - A push after undo discards the redo tail
//! - A push equal to the current entry is skipped
//! - Oldest entries are dropped once `max_entries` is exceeded
//! - Batches collapse several pushes into one entry
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new();
//! history.reset(initial);
//!
//! history.push(after_insert, Some("Insert text".into()));
//!
//! let previous = history.undo(); // Some(initial)
//! let next = history.redo();     // Some(after_insert)
//! ```

use pagecraft_common::Component;
use std::sync::Arc;
use tracing::trace;

pub type Snapshot = Arc<Vec<Component>>;

/// One point in history
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub snapshot: Snapshot,

    /// Label of the edit that produced this snapshot
    pub label: Option<String>,
}

/// Pending batch: only the latest snapshot is kept
#[derive(Debug, Default)]
struct PendingBatch {
    label: Option<String>,
    snapshot: Option<Snapshot>,
}

/// Bounded snapshot history with a cursor
#[derive(Debug)]
pub struct History {
    entries: Vec<HistoryEntry>,

    /// Index of the current entry
    cursor: usize,

    /// Maximum number of entries kept (0 = unlimited)
    max_entries: usize,

    current_batch: Option<PendingBatch>,
}

impl History {
    /// Create an empty history with the default limit (100)
    pub fn new() -> Self {
        Self::with_max_entries(100)
    }

    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            max_entries,
            current_batch: None,
        }
    }

    /// Replace all history with a single initial snapshot
    pub fn reset(&mut self, snapshot: Vec<Component>) {
        self.entries = vec![HistoryEntry {
            snapshot: Arc::new(snapshot),
            label: None,
        }];
        self.cursor = 0;
        self.current_batch = None;
    }

    /// Record a new snapshot; returns false if it was skipped or deferred
    pub fn push(&mut self, snapshot: Vec<Component>, label: Option<String>) -> bool {
        if let Some(batch) = &mut self.current_batch {
            if batch.label.is_none() {
                batch.label = label;
            }
            batch.snapshot = Some(Arc::new(snapshot));
            return false;
        }

        self.commit(Arc::new(snapshot), label)
    }

    fn commit(&mut self, snapshot: Snapshot, label: Option<String>) -> bool {
        if self.current().is_some_and(|current| **current == *snapshot) {
            trace!("Skipping identical snapshot");
            return false;
        }

        // Discard the redo tail
        self.entries.truncate(self.cursor + 1);
        self.entries.push(HistoryEntry { snapshot, label });

        if self.max_entries > 0 && self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }

        self.cursor = self.entries.len() - 1;
        trace!("History cursor at {} of {}", self.cursor, self.entries.len());
        true
    }

    /// Start grouping pushes into one entry
    pub fn begin_batch(&mut self, label: Option<String>) {
        self.current_batch = Some(PendingBatch {
            label,
            snapshot: None,
        });
    }

    /// Close the current batch; returns true if an entry was added
    pub fn end_batch(&mut self) -> bool {
        match self.current_batch.take() {
            Some(PendingBatch {
                label,
                snapshot: Some(snapshot),
            }) => self.commit(snapshot, label),
            _ => false,
        }
    }

    pub fn is_batching(&self) -> bool {
        self.current_batch.is_some()
    }

    /// Move back one entry and return its snapshot
    pub fn undo(&mut self) -> Option<Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.current()
    }

    /// Move forward one entry and return its snapshot
    pub fn redo(&mut self) -> Option<Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.current()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Label of the edit `undo` would revert
    pub fn undo_label(&self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.entries[self.cursor].label.as_deref()
    }

    /// Label of the edit `redo` would reapply
    pub fn redo_label(&self) -> Option<&str> {
        self.entries.get(self.cursor + 1)?.label.as_deref()
    }

    pub fn current(&self) -> Option<Snapshot> {
        self.entries.get(self.cursor).map(|entry| entry.snapshot.clone())
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
        self.current_batch = None;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(ids: &[&str]) -> Vec<Component> {
        ids.iter().map(|id| Component::new(*id, "text")).collect()
    }

    #[test]
    fn test_undo_redo() {
        let mut history = History::new();
        history.reset(tree(&[]));

        assert!(history.push(tree(&["a"]), Some("Insert text".to_string())));
        assert!(history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo_label(), Some("Insert text"));

        let previous = history.undo().unwrap();
        assert!(previous.is_empty());
        assert!(!history.can_undo());
        assert_eq!(history.redo_label(), Some("Insert text"));

        let next = history.redo().unwrap();
        assert_eq!(*next, tree(&["a"]));
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_push_after_undo_truncates_redo() {
        let mut history = History::new();
        history.reset(tree(&[]));
        history.push(tree(&["a"]), None);
        history.push(tree(&["a", "b"]), None);

        history.undo();
        history.push(tree(&["a", "c"]), None);

        assert_eq!(history.len(), 3);
        assert!(!history.can_redo());
        assert_eq!(*history.current().unwrap(), tree(&["a", "c"]));
    }

    #[test]
    fn test_identical_snapshot_is_skipped() {
        let mut history = History::new();
        history.reset(tree(&["a"]));

        assert!(!history.push(tree(&["a"]), None));
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_max_entries_drops_oldest() {
        let mut history = History::with_max_entries(3);
        history.reset(tree(&[]));
        history.push(tree(&["a"]), None);
        history.push(tree(&["a", "b"]), None);
        history.push(tree(&["a", "b", "c"]), None);

        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);

        history.undo();
        history.undo();
        assert!(!history.can_undo());
        assert_eq!(*history.current().unwrap(), tree(&["a"]));
    }

    #[test]
    fn test_batch_collapses_to_one_entry() {
        let mut history = History::new();
        history.reset(tree(&[]));

        history.begin_batch(Some("Paste".to_string()));
        assert!(!history.push(tree(&["a"]), Some("Insert text".to_string())));
        assert!(!history.push(tree(&["a", "b"]), Some("Insert text".to_string())));
        assert!(history.end_batch());

        assert_eq!(history.len(), 2);
        assert_eq!(history.undo_label(), Some("Paste"));

        let previous = history.undo().unwrap();
        assert!(previous.is_empty());
    }

    #[test]
    fn test_empty_batch_adds_nothing() {
        let mut history = History::new();
        history.reset(tree(&[]));

        history.begin_batch(None);
        assert!(!history.end_batch());
        assert_eq!(history.len(), 1);
    }
}
