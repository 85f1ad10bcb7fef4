//! Snapshot-based undo/redo.
//!
//! Two stacks of full scene snapshots (value copies). Every mutating
//! operation records the pre-mutation scene, which also invalidates the redo
//! stack (standard linear-undo semantics with no branching). Snapshots are
//! full value copies, not structural sharing.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::shape::Shape;

/// A full, independent copy of the scene's shape list.
pub type Snapshot = Vec<Shape>;

/// Undo/redo stacks of scene snapshots. Session-scoped; never persisted.
#[derive(Debug, Default)]
pub struct History {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
}

impl History {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pre-mutation scene. Clears the redo stack: any new edit
    /// invalidates the redone future.
    pub fn record(&mut self, before: Snapshot) {
        self.undo.push(before);
        self.redo.clear();
    }

    /// Pop the most recent undo snapshot, pushing `current` onto the redo
    /// stack. Returns `None` (and leaves `current` unused) when there is
    /// nothing to undo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo.pop()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Mirror image of [`History::undo`].
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo.pop()?;
        self.undo.push(current);
        Some(next)
    }

    /// Whether an undo snapshot is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether a redo snapshot is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}
