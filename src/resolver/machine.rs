//! The resolver state machine.
//!
//! ```text
//! Building ──(first step)──▶ Draining ──(pop signals empty)──▶ Done
//!                              │  ▲
//!                              └──┘ pop, resolve, record
//! ```
//!
//! One resolver serves one request. [`Resolver::finish`] consumes it, so
//! there is no way back to `Building`.

use serde::{Deserialize, Serialize};

use crate::core::{Action, ActionOrder};
use crate::error::{InvalidAction, ResolutionError, ResolveError};
use crate::rules::RuleSet;
use crate::stack::Stack;

use super::step::{ResolutionResult, ResolutionStep, StepLog};

/// Resolver lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Accepting pushes.
    Building,
    /// Popping and resolving.
    Draining,
    /// Stack empty, log final.
    Done,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Building => "building",
            Self::Draining => "draining",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Drives one stack from pushes to an empty stack and a full step log.
///
/// ## Example
///
/// ```
/// use tolaria_stack::core::{Action, ActionOrder, TargetRef};
/// use tolaria_stack::resolver::Resolver;
/// use tolaria_stack::stack::EntryStatus;
///
/// let mut resolver = Resolver::new();
/// resolver
///     .push(Action::new(ActionOrder::new(1), "Lightning Bolt", "P1", [TargetRef::player("P2")]).unwrap())
///     .unwrap();
/// resolver
///     .push(
///         Action::new(
///             ActionOrder::new(2),
///             "Counterspell",
///             "P2",
///             [TargetRef::action(ActionOrder::new(1), "Lightning Bolt")],
///         )
///         .unwrap(),
///     )
///     .unwrap();
///
/// let result = resolver.finish().unwrap();
/// assert_eq!(result.resolution_order(), vec!["Counterspell", "Lightning Bolt"]);
/// assert_eq!(result.status_of(ActionOrder::new(1)), Some(EntryStatus::Countered));
/// ```
#[derive(Debug)]
pub struct Resolver {
    phase: Phase,
    stack: Stack,
    log: StepLog,
    pushed: usize,
    last_order: Option<ActionOrder>,
    failure: Option<ResolutionError>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    /// Create a resolver in the `Building` phase.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Building,
            stack: Stack::new(),
            log: StepLog::new(),
            pushed: 0,
            last_order: None,
            failure: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    #[must_use]
    pub fn log(&self) -> &StepLog {
        &self.log
    }

    /// Push the next declared action. Returns its stack position.
    ///
    /// Orders must be strictly increasing across pushes.
    pub fn push(&mut self, action: Action) -> Result<u32, ResolveError> {
        self.expect_phase(Phase::Building)?;

        if let Some(previous) = self.last_order {
            if action.order() <= previous {
                return Err(InvalidAction::OutOfOrder {
                    order: action.order(),
                    previous,
                }
                .into());
            }
        }

        self.last_order = Some(action.order());
        self.pushed += 1;
        Ok(self.stack.push(action).position)
    }

    /// Run one pop-resolve-record cycle.
    ///
    /// Returns the recorded step, or `None` once the resolver is `Done`.
    pub fn step(&mut self) -> Result<Option<&ResolutionStep>, ResolutionError> {
        match self.phase {
            Phase::Done => return Ok(None),
            Phase::Building => {
                tracing::debug!(entries = self.pushed, "draining stack");
                self.phase = Phase::Draining;
            }
            Phase::Draining => {}
        }

        let Some(mut entry) = self.stack.pop() else {
            self.phase = Phase::Done;
            return Ok(None);
        };

        let outcome = match RuleSet::apply(&entry, &mut self.stack) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(order = %entry.order(), card = entry.card(), error = %err, "resolution aborted");
                self.phase = Phase::Done;
                self.failure = Some(err.clone());
                return Err(err);
            }
        };
        if entry.is_pending() {
            entry.settle(outcome.status);
        }

        let step_number = self.log.next_step_number();
        tracing::debug!(
            step = step_number,
            order = %entry.order(),
            card = entry.card(),
            status = %entry.status(),
            kind = ?outcome.kind,
            "resolved entry"
        );

        let pending = self.stack.peek_pending();
        let stack_empty = self.stack.is_empty();
        let step = ResolutionStep::new(step_number, entry, outcome, pending, stack_empty);
        Ok(Some(self.log.push(step)))
    }

    /// Step until `Done`.
    pub fn drain(&mut self) -> Result<(), ResolutionError> {
        while self.step()?.is_some() {}
        Ok(())
    }

    /// Drain whatever is left and hand over the result.
    ///
    /// Fails if any cycle failed, now or earlier; no partial log escapes.
    pub fn finish(mut self) -> Result<ResolutionResult, ResolutionError> {
        if let Some(err) = self.failure.take() {
            return Err(err);
        }
        self.drain()?;

        if self.log.len() != self.pushed {
            return Err(ResolutionError::Incomplete {
                steps: self.log.len(),
                pushed: self.pushed,
            });
        }

        Ok(ResolutionResult {
            steps: self.log.into_steps(),
            final_stack: self.stack.peek_pending(),
        })
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), ResolutionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(ResolutionError::PhaseViolation {
                expected,
                actual: self.phase,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TargetRef;

    fn order(n: u32) -> ActionOrder {
        ActionOrder::new(n)
    }

    fn generic(n: u32, card: &str) -> Action {
        Action::new(order(n), card, "P1", []).unwrap()
    }

    #[test]
    fn test_resolver_new() {
        let resolver = Resolver::new();
        assert_eq!(resolver.phase(), Phase::Building);
        assert!(resolver.stack().is_empty());
        assert!(resolver.log().is_empty());
    }

    #[test]
    fn test_push_returns_positions() {
        let mut resolver = Resolver::new();
        assert_eq!(resolver.push(generic(1, "Opt")).unwrap(), 1);
        assert_eq!(resolver.push(generic(4, "Shock")).unwrap(), 2);
    }

    #[test]
    fn test_push_rejects_out_of_order() {
        let mut resolver = Resolver::new();
        resolver.push(generic(2, "Opt")).unwrap();

        let err = resolver.push(generic(2, "Shock")).unwrap_err();
        assert_eq!(
            err,
            ResolveError::Invalid(InvalidAction::OutOfOrder {
                order: order(2),
                previous: order(2),
            })
        );
    }

    #[test]
    fn test_no_push_after_building() {
        let mut resolver = Resolver::new();
        resolver.push(generic(1, "Opt")).unwrap();
        resolver.step().unwrap();
        assert_eq!(resolver.phase(), Phase::Draining);

        let err = resolver.push(generic(2, "Shock")).unwrap_err();
        assert_eq!(
            err,
            ResolveError::Resolution(ResolutionError::PhaseViolation {
                expected: Phase::Building,
                actual: Phase::Draining,
            })
        );
    }

    #[test]
    fn test_step_by_step_phases() {
        let mut resolver = Resolver::new();
        resolver.push(generic(1, "Opt")).unwrap();
        resolver.push(generic(2, "Shock")).unwrap();

        let first = resolver.step().unwrap().unwrap();
        assert_eq!(first.step_number, 1);
        assert_eq!(first.entry.card(), "Shock");
        assert_eq!(first.state_after.pending.len(), 1);

        let second = resolver.step().unwrap().unwrap();
        assert_eq!(second.step_number, 2);
        assert!(second.description.ends_with("The stack is now empty."));

        assert!(resolver.step().unwrap().is_none());
        assert_eq!(resolver.phase(), Phase::Done);
        assert!(resolver.step().unwrap().is_none());
    }

    #[test]
    fn test_empty_resolver_finishes() {
        let result = Resolver::new().finish().unwrap();
        assert!(result.steps.is_empty());
        assert!(result.final_stack.is_empty());
    }

    #[test]
    fn test_failure_is_sticky() {
        let mut resolver = Resolver::new();
        resolver
            .push(
                Action::new(order(7), "Counterspell", "P2", [TargetRef::action(order(3), "Opt")])
                    .unwrap(),
            )
            .unwrap();

        let err = resolver.step().unwrap_err();
        assert!(matches!(err, ResolutionError::UnknownTarget { .. }));
        assert_eq!(resolver.phase(), Phase::Done);

        assert_eq!(resolver.finish().unwrap_err(), err);
    }
}
