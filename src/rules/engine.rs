//! Resolution rule set.
//!
//! Classification happens when an entry is popped, not when it is pushed:
//! by then some of its targets may already have been countered.
//!
//! ## Implementation Notes
//!
//! - A stack target is legal iff its entry is still `Pending`
//! - Player targets are always legal
//! - Counter kinds only look at their stack targets
//! - An entry with relevant targets but none legal fizzles

use crate::core::{Action, TargetRef};
use crate::error::ResolutionError;
use crate::stack::{EntryStatus, Stack, StackEntry};

use super::effect::{EffectKind, SideEffect};

/// The consequence of resolving one popped entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// Terminal status for the popped entry.
    pub status: EntryStatus,

    /// The kind it resolved as. `None` if it never got to resolve.
    pub kind: Option<EffectKind>,

    pub side_effects: Vec<SideEffect>,
}

impl Outcome {
    fn settled(status: EntryStatus) -> Self {
        Self {
            status,
            kind: None,
            side_effects: Vec::new(),
        }
    }
}

/// Pure functions over an entry and the stack below it.
pub struct RuleSet;

impl RuleSet {
    /// The kind an action resolves as.
    ///
    /// A declared kind wins. Otherwise an action aimed at another stack
    /// entry is a counter and everything else is generic.
    #[must_use]
    pub fn classify(action: &Action) -> EffectKind {
        if let Some(kind) = action.declared_kind() {
            return kind;
        }
        if action.stack_targets().next().is_some() {
            EffectKind::Counter
        } else {
            EffectKind::Generic
        }
    }

    /// Legal targets among those relevant to `kind`.
    ///
    /// Fails if a stack target is no longer (or never was) on the stack.
    pub fn legal_targets<'a>(
        action: &'a Action,
        kind: EffectKind,
        stack: &Stack,
    ) -> Result<Vec<&'a TargetRef>, ResolutionError> {
        let mut legal = Vec::new();
        for target in action.targets() {
            match target {
                TargetRef::Action { order, .. } => {
                    let entry = stack.find(*order).ok_or(ResolutionError::UnknownTarget {
                        order: action.order(),
                        target: *order,
                    })?;
                    if entry.is_pending() {
                        legal.push(target);
                    }
                }
                TargetRef::Player(_) if !kind.acts_on_stack() => legal.push(target),
                TargetRef::Player(_) => {}
            }
        }
        Ok(legal)
    }

    /// Resolve a popped entry against the remaining stack.
    ///
    /// Settles countered targets on `stack`; the caller settles the
    /// popped entry itself with [`Outcome::status`].
    pub fn apply(entry: &StackEntry, stack: &mut Stack) -> Result<Outcome, ResolutionError> {
        if entry.status().is_terminal() {
            return Ok(Outcome::settled(entry.status()));
        }

        let action = &entry.action;
        let kind = Self::classify(action);
        let legal = Self::legal_targets(action, kind, stack)?;

        let relevant = if kind.acts_on_stack() {
            action.stack_targets().count()
        } else {
            action.targets().len()
        };
        if relevant > 0 && legal.is_empty() {
            return Ok(Outcome {
                status: EntryStatus::Fizzled,
                kind: Some(kind),
                side_effects: Vec::new(),
            });
        }

        let side_effects = match kind {
            EffectKind::Counter | EffectKind::TargetedRemoval => {
                let mut removed = Vec::with_capacity(legal.len());
                for target in legal {
                    let TargetRef::Action { order, card } = target else {
                        continue;
                    };
                    stack.settle(*order, EntryStatus::Countered);
                    let by = action.card().to_string();
                    removed.push(if kind == EffectKind::Counter {
                        SideEffect::Countered {
                            order: *order,
                            card: card.clone(),
                            by,
                        }
                    } else {
                        SideEffect::Exiled {
                            order: *order,
                            card: card.clone(),
                            by,
                        }
                    });
                }
                removed
            }
            EffectKind::Generic => vec![SideEffect::EffectApplied {
                card: action.card().to_string(),
                effect: action.effect_text().map(str::to_string),
                targets: legal.iter().map(|t| t.label().to_string()).collect(),
            }],
        };

        Ok(Outcome {
            status: EntryStatus::Resolved,
            kind: Some(kind),
            side_effects,
        })
    }
}
