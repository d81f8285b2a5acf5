//! Step Log: the resolver's output records.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::ActionOrder;
use crate::rules::{EffectKind, Outcome, SideEffect};
use crate::stack::{EntryStatus, StackEntry};

/// State of the stack right after a step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackSnapshot {
    /// Entries still `Pending`, top first.
    pub pending: Vector<StackEntry>,

    /// What this step did to entries other than its own.
    pub side_effects: Vec<SideEffect>,
}

impl StackSnapshot {
    /// Check if nothing is left to resolve.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.pending.is_empty()
    }

    /// Summary line in the style "Stack contains: A, B (top to bottom)".
    ///
    /// An empty stack also notes that priority goes back to the active
    /// player.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.pending.is_empty() {
            return "Stack is empty. Priority returns to active player.".to_string();
        }
        let cards: Vec<_> = self.pending.iter().map(StackEntry::card).collect();
        format!("Stack contains: {} (top to bottom)", cards.join(", "))
    }
}

/// Immutable record of one pop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionStep {
    /// 1-based, in pop order.
    pub step_number: u32,

    /// The popped entry with its final status.
    pub entry: StackEntry,

    /// The kind it resolved as, if it got to resolve.
    pub kind: Option<EffectKind>,

    pub description: String,

    pub state_after: StackSnapshot,
}

impl ResolutionStep {
    pub(crate) fn new(
        step_number: u32,
        entry: StackEntry,
        outcome: Outcome,
        pending: Vector<StackEntry>,
        stack_empty: bool,
    ) -> Self {
        let description = describe(&entry, &outcome, stack_empty);
        Self {
            step_number,
            entry,
            kind: outcome.kind,
            description,
            state_after: StackSnapshot {
                pending,
                side_effects: outcome.side_effects,
            },
        }
    }

    #[must_use]
    pub fn status(&self) -> EntryStatus {
        self.entry.status()
    }

    #[must_use]
    pub fn order(&self) -> ActionOrder {
        self.entry.order()
    }
}

fn describe(entry: &StackEntry, outcome: &Outcome, stack_empty: bool) -> String {
    let card = entry.card();
    let controller = entry.action.controller();

    let mut text = match outcome.status {
        EntryStatus::Countered => format!(
            "{card} is countered and does not resolve. It leaves the stack without its effect taking place."
        ),
        EntryStatus::Fizzled => {
            format!("{card} fizzles: none of its targets are legal anymore, so it does nothing.")
        }
        EntryStatus::Resolved | EntryStatus::Pending => {
            let removed: Vec<_> = outcome
                .side_effects
                .iter()
                .filter_map(|s| match s {
                    SideEffect::Countered { card, .. } | SideEffect::Exiled { card, .. } => {
                        Some(card.as_str())
                    }
                    SideEffect::EffectApplied { .. } => None,
                })
                .collect();

            match outcome.kind {
                Some(EffectKind::Counter) => format!(
                    "{controller} resolves {card}, countering {}.",
                    removed.join(", ")
                ),
                Some(EffectKind::TargetedRemoval) => format!(
                    "{controller} resolves {card}, exiling {}.",
                    removed.join(", ")
                ),
                Some(EffectKind::Generic) | None => {
                    let mut text = format!("{controller} resolves {card}.");
                    for side in &outcome.side_effects {
                        if let SideEffect::EffectApplied { effect, targets, .. } = side {
                            if let Some(effect) = effect {
                                text.push_str(&format!(" Effect: {}.", effect.trim_end_matches('.')));
                            }
                            if !targets.is_empty() {
                                text.push_str(&format!(" Targeting: {}.", targets.join(", ")));
                            }
                        }
                    }
                    text
                }
            }
        }
    };

    if stack_empty {
        text.push_str(" The stack is now empty.");
    }
    text
}

/// Ordered steps, appended one per pop.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepLog {
    steps: Vec<ResolutionStep>,
}

impl StepLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, step: ResolutionStep) -> &ResolutionStep {
        self.steps.push(step);
        &self.steps[self.steps.len() - 1]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number the next step will get.
    #[must_use]
    pub fn next_step_number(&self) -> u32 {
        self.steps.len() as u32 + 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolutionStep> {
        self.steps.iter()
    }

    #[must_use]
    pub fn into_steps(self) -> Vec<ResolutionStep> {
        self.steps
    }
}

/// Output of one resolution request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub steps: Vec<ResolutionStep>,

    /// Always empty: the resolver only finishes once the stack is.
    pub final_stack: Vector<StackEntry>,
}

impl ResolutionResult {
    /// Get a step by its 1-based number.
    #[must_use]
    pub fn step(&self, step_number: u32) -> Option<&ResolutionStep> {
        step_number
            .checked_sub(1)
            .and_then(|i| self.steps.get(i as usize))
    }

    /// The step that popped the entry with this order.
    #[must_use]
    pub fn step_for(&self, order: ActionOrder) -> Option<&ResolutionStep> {
        self.steps.iter().find(|s| s.order() == order)
    }

    /// Final status of the entry with this order.
    #[must_use]
    pub fn status_of(&self, order: ActionOrder) -> Option<EntryStatus> {
        self.step_for(order).map(ResolutionStep::status)
    }

    /// Card names in pop order.
    #[must_use]
    pub fn resolution_order(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.entry.card()).collect()
    }

    /// Steps whose entry ended with `status`.
    pub fn with_status(&self, status: EntryStatus) -> impl Iterator<Item = &ResolutionStep> {
        self.steps.iter().filter(move |s| s.status() == status)
    }

    /// Encode with bincode. Equal results encode to equal bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode a result produced by [`Self::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Action, TargetRef};

    fn entry(status: EntryStatus) -> StackEntry {
        let action = Action::new(
            ActionOrder::new(1),
            "Lightning Bolt",
            "P1",
            [TargetRef::player("P2")],
        )
        .unwrap();
        let mut e = StackEntry::new(action, 1);
        e.settle(status);
        e
    }

    #[test]
    fn test_describe_generic() {
        let outcome = Outcome {
            status: EntryStatus::Resolved,
            kind: Some(EffectKind::Generic),
            side_effects: vec![SideEffect::EffectApplied {
                card: "Lightning Bolt".to_string(),
                effect: Some("Lightning Bolt deals 3 damage to any target.".to_string()),
                targets: vec!["P2".to_string()],
            }],
        };
        let step = ResolutionStep::new(1, entry(EntryStatus::Resolved), outcome, Vector::new(), true);

        assert_eq!(
            step.description,
            "P1 resolves Lightning Bolt. Effect: Lightning Bolt deals 3 damage to any target. \
             Targeting: P2. The stack is now empty."
        );
        assert!(step.state_after.is_settled());
    }

    #[test]
    fn test_describe_countered() {
        let outcome = Outcome {
            status: EntryStatus::Countered,
            kind: None,
            side_effects: Vec::new(),
        };
        let step = ResolutionStep::new(2, entry(EntryStatus::Countered), outcome, Vector::new(), false);

        assert!(step.description.starts_with("Lightning Bolt is countered and does not resolve."));
        assert_eq!(step.status(), EntryStatus::Countered);
        assert_eq!(step.kind, None);
    }

    #[test]
    fn test_snapshot_summary() {
        let mut snapshot = StackSnapshot::default();
        assert_eq!(
            snapshot.summary(),
            "Stack is empty. Priority returns to active player."
        );

        snapshot.pending.push_back(entry(EntryStatus::Pending));
        assert_eq!(snapshot.summary(), "Stack contains: Lightning Bolt (top to bottom)");
    }

    #[test]
    fn test_step_log_numbering() {
        let log = StepLog::new();
        assert!(log.is_empty());
        assert_eq!(log.next_step_number(), 1);
    }
}
