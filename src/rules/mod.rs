//! Resolution rule set: effect classification and consequences.
//!
//! Everything here is a pure function of a popped entry and the stack
//! below it. The resolver decides *when* to call it; the rule set decides
//! *what* happens.

pub mod effect;
pub mod engine;

pub use effect::{EffectKind, ParseEffectKindError, SideEffect};
pub use engine::{Outcome, RuleSet};
