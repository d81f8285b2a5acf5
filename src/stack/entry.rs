//! Stack entries and their lifecycle status.

use serde::{Deserialize, Serialize};

use crate::core::{Action, ActionOrder};

/// Lifecycle of a stack entry.
///
/// Every entry starts `Pending` and moves to exactly one terminal status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryStatus {
    /// On the stack, not yet resolved.
    Pending,
    /// Resolved and its effect happened.
    Resolved,
    /// Removed by another effect before it could resolve.
    Countered,
    /// Resolved with no legal target left; nothing happened.
    Fizzled,
}

impl EntryStatus {
    /// Check if the status is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Resolved => "resolved",
            Self::Countered => "countered",
            Self::Fizzled => "fizzled",
        };
        f.write_str(name)
    }
}

/// An action on the stack.
///
/// The status is read-only outside the crate:
///
/// ```compile_fail
/// use tolaria_stack::core::{Action, ActionOrder};
/// use tolaria_stack::stack::{EntryStatus, Stack};
///
/// let mut stack = Stack::new();
/// stack.push(Action::new(ActionOrder::new(1), "Opt", "P1", []).unwrap());
/// let mut entry = stack.pop().unwrap();
/// entry.status = EntryStatus::Resolved;
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackEntry {
    /// The action, exclusively owned by this entry.
    pub action: Action,

    /// 1-based height at push time. Display only; resolution is LIFO.
    pub position: u32,

    status: EntryStatus,
}

impl StackEntry {
    pub(crate) fn new(action: Action, position: u32) -> Self {
        Self {
            action,
            position,
            status: EntryStatus::Pending,
        }
    }

    #[must_use]
    pub fn order(&self) -> ActionOrder {
        self.action.order()
    }

    #[must_use]
    pub fn card(&self) -> &str {
        self.action.card()
    }

    /// Current status. Changes only through a one-way settle.
    #[must_use]
    pub fn status(&self) -> EntryStatus {
        self.status
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == EntryStatus::Pending
    }

    /// Move to a terminal status. Returns `false` if already terminal.
    pub(crate) fn settle(&mut self, status: EntryStatus) -> bool {
        if self.status.is_terminal() || !status.is_terminal() {
            return false;
        }
        self.status = status;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bolt() -> Action {
        Action::new(ActionOrder::new(1), "Lightning Bolt", "P1", []).unwrap()
    }

    #[test]
    fn test_entry_starts_pending() {
        let entry = StackEntry::new(bolt(), 1);
        assert!(entry.is_pending());
        assert_eq!(entry.position, 1);
        assert_eq!(entry.card(), "Lightning Bolt");
    }

    #[test]
    fn test_settle_once() {
        let mut entry = StackEntry::new(bolt(), 1);

        assert!(!entry.settle(EntryStatus::Pending));
        assert!(entry.settle(EntryStatus::Countered));
        assert!(!entry.settle(EntryStatus::Resolved));
        assert_eq!(entry.status(), EntryStatus::Countered);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(EntryStatus::Fizzled.to_string(), "fizzled");
        assert!(EntryStatus::Resolved.is_terminal());
        assert!(!EntryStatus::Pending.is_terminal());
    }
}
