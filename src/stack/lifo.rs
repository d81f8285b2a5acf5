//! The LIFO stack container.
//!
//! Entries are appended at the top and removed only by [`Stack::pop`].
//! Countered entries stay in place until their own pop so that each
//! pushed entry is popped exactly once; they are hidden from
//! [`Stack::peek_pending`] as soon as they leave `Pending`.

use im::Vector;
use rustc_hash::FxHashMap;

use crate::core::{Action, ActionOrder};

use super::entry::{EntryStatus, StackEntry};

/// Ordered container of stack entries (index 0 = bottom, last = top).
#[derive(Clone, Debug, Default)]
pub struct Stack {
    entries: Vec<StackEntry>,

    /// Order -> index into `entries`.
    index: FxHashMap<ActionOrder, usize>,
}

impl Stack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an action on top. Its position is the new height.
    pub fn push(&mut self, action: Action) -> &StackEntry {
        let position = self.entries.len() as u32 + 1;
        tracing::trace!(order = %action.order(), card = action.card(), position, "push");

        self.index.insert(action.order(), self.entries.len());
        self.entries.push(StackEntry::new(action, position));
        &self.entries[self.entries.len() - 1]
    }

    /// Remove and return the top entry, or `None` when the stack is empty.
    pub fn pop(&mut self) -> Option<StackEntry> {
        let entry = self.entries.pop()?;
        self.index.remove(&entry.order());
        tracing::trace!(order = %entry.order(), position = entry.position, status = %entry.status(), "pop");
        Some(entry)
    }

    /// Pending entries, highest position first.
    #[must_use]
    pub fn peek_pending(&self) -> Vector<StackEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| e.is_pending())
            .cloned()
            .collect()
    }

    /// Peek at the top entry without removing it.
    #[must_use]
    pub fn peek_top(&self) -> Option<&StackEntry> {
        self.entries.last()
    }

    /// Find an entry still on the stack.
    #[must_use]
    pub fn find(&self, order: ActionOrder) -> Option<&StackEntry> {
        self.index.get(&order).map(|&i| &self.entries[i])
    }

    /// Settle a pending entry still on the stack.
    ///
    /// Returns `None` if the entry is not on the stack, otherwise whether
    /// its status changed.
    pub(crate) fn settle(&mut self, order: ActionOrder, status: EntryStatus) -> Option<bool> {
        let &i = self.index.get(&order)?;
        Some(self.entries[i].settle(status))
    }

    /// Number of entries physically on the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries still `Pending`.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_pending()).count()
    }

    /// All entries, bottom to top.
    #[must_use]
    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }
}
