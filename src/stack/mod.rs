//! Stack: LIFO container with position bookkeeping.
//!
//! The stack owns no rules. It assigns positions on push, removes only
//! from the top, and lets the rule set settle entries still on it.
//!
//! ## Example Usage
//!
//! ```
//! use tolaria_stack::core::{Action, ActionOrder};
//! use tolaria_stack::stack::Stack;
//!
//! let mut stack = Stack::new();
//! stack.push(Action::new(ActionOrder::new(1), "Lightning Bolt", "P1", []).unwrap());
//! stack.push(Action::new(ActionOrder::new(2), "Opt", "P2", []).unwrap());
//!
//! // Last in, first out
//! assert_eq!(stack.pop().unwrap().card(), "Opt");
//! assert_eq!(stack.peek_pending().len(), 1);
//! ```

mod entry;
mod lifo;

pub use entry::{EntryStatus, StackEntry};
pub use lifo::Stack;
