//! Resolver: the state machine that drains a stack into a step log.
//!
//! [`resolve`] is the crate's single entry point for a request: ingest and
//! validate every action, push them in declaration order, then pop until
//! the stack is empty. Nothing is shared between calls.
//!
//! ## Example Usage
//!
//! ```
//! use tolaria_stack::core::ActionInput;
//! use tolaria_stack::resolver::resolve;
//! use tolaria_stack::stack::EntryStatus;
//!
//! let result = resolve(&[
//!     ActionInput::new("Lightning Bolt", "P1", ["P2"]),
//!     ActionInput::new("Counterspell", "P2", ["Lightning Bolt"]),
//! ])
//! .unwrap();
//!
//! assert_eq!(result.steps.len(), 2);
//! assert_eq!(result.steps[0].status(), EntryStatus::Resolved);
//! assert_eq!(result.steps[1].status(), EntryStatus::Countered);
//! assert!(result.final_stack.is_empty());
//! ```

mod machine;
mod step;

pub use machine::{Phase, Resolver};
pub use step::{ResolutionResult, ResolutionStep, StackSnapshot, StepLog};

use crate::core::{ingest, ActionInput, ResolverConfig};
use crate::error::ResolveError;
use crate::stack::EntryStatus;

/// Resolve a declared action sequence with the default configuration.
pub fn resolve(actions: &[ActionInput]) -> Result<ResolutionResult, ResolveError> {
    resolve_with(actions, &ResolverConfig::default())
}

/// Resolve a declared action sequence.
///
/// Validation failures are reported before anything is pushed.
pub fn resolve_with(
    actions: &[ActionInput],
    config: &ResolverConfig,
) -> Result<ResolutionResult, ResolveError> {
    let validated = ingest(actions, config).map_err(|err| {
        tracing::warn!(error = %err, "rejected action sequence");
        err
    })?;

    let mut resolver = Resolver::new();
    for action in validated {
        resolver.push(action)?;
    }
    let result = resolver.finish()?;

    tracing::info!(
        actions = actions.len(),
        countered = result.with_status(EntryStatus::Countered).count(),
        fizzled = result.with_status(EntryStatus::Fizzled).count(),
        "resolved stack"
    );
    Ok(result)
}
