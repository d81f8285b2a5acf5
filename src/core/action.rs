//! Action representation: a card, its controller, and what it targets.
//!
//! Actions are immutable once constructed. The [`ActionOrder`] is the
//! declaration position and doubles as the stable handle other actions
//! use to target it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::InvalidAction;
use crate::rules::EffectKind;

/// Declaration position of an action (1-based, strictly increasing).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActionOrder(pub u32);

impl ActionOrder {
    /// Create a new action order.
    #[must_use]
    pub const fn new(order: u32) -> Self {
        Self(order)
    }

    /// Get the raw order value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ActionOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an action points at.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRef {
    /// Another action, declared earlier. The card name is kept for display.
    Action { order: ActionOrder, card: String },

    /// A player, by free-form label.
    Player(String),
}

impl TargetRef {
    /// Target an earlier action.
    pub fn action(order: ActionOrder, card: impl Into<String>) -> Self {
        Self::Action {
            order,
            card: card.into(),
        }
    }

    /// Target a player.
    pub fn player(label: impl Into<String>) -> Self {
        Self::Player(label.into())
    }

    /// The targeted action's order, if this targets the stack.
    #[must_use]
    pub fn stack_order(&self) -> Option<ActionOrder> {
        match self {
            Self::Action { order, .. } => Some(*order),
            Self::Player(_) => None,
        }
    }

    /// Display label: the card name or the player label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Action { card, .. } => card,
            Self::Player(label) => label,
        }
    }
}

impl std::fmt::Display for TargetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw caller input for one action, before validation.
///
/// ```
/// use tolaria_stack::core::ActionInput;
///
/// let bolt = ActionInput::new("Lightning Bolt", "P1", ["P2"])
///     .with_effect("Lightning Bolt deals 3 damage to any target");
/// assert_eq!(bolt.targets, vec!["P2".to_string()]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionInput {
    pub card: String,

    pub controller: String,

    /// Card names of earlier actions, player labels, or `none`.
    #[serde(default)]
    pub targets: Vec<String>,

    /// Explicit effect kind, when the caller knows it.
    #[serde(default)]
    pub kind: Option<EffectKind>,

    /// Free-form effect text recorded when the action resolves.
    #[serde(default)]
    pub effect: Option<String>,
}

impl ActionInput {
    /// Create an input with the given targets and no declared kind.
    pub fn new<I, S>(card: impl Into<String>, controller: impl Into<String>, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            card: card.into(),
            controller: controller.into(),
            targets: targets.into_iter().map(Into::into).collect(),
            kind: None,
            effect: None,
        }
    }

    /// Declare the effect kind.
    #[must_use]
    pub fn with_kind(mut self, kind: EffectKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Attach effect text.
    #[must_use]
    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = Some(effect.into());
        self
    }
}

/// A validated action.
///
/// SmallVec keeps the common 0-2 targets inline.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    order: ActionOrder,
    card: String,
    controller: String,
    targets: SmallVec<[TargetRef; 2]>,
    kind: Option<EffectKind>,
    effect: Option<String>,
}

impl Action {
    /// Validate and construct an action.
    ///
    /// Fails when the card or controller is blank, or when a stack target
    /// does not point strictly below `order`. Duplicate targets collapse to
    /// their first occurrence.
    pub fn new(
        order: ActionOrder,
        card: impl Into<String>,
        controller: impl Into<String>,
        targets: impl IntoIterator<Item = TargetRef>,
    ) -> Result<Self, InvalidAction> {
        let card = card.into();
        let controller = controller.into();

        if card.trim().is_empty() {
            return Err(InvalidAction::EmptyCard { order });
        }
        if controller.trim().is_empty() {
            return Err(InvalidAction::EmptyController { order });
        }

        let mut deduped: SmallVec<[TargetRef; 2]> = SmallVec::new();
        for target in targets {
            match &target {
                TargetRef::Action { order: target_order, .. } if *target_order >= order => {
                    return Err(InvalidAction::TargetOrder {
                        order,
                        target: *target_order,
                    });
                }
                TargetRef::Player(label) if label.trim().is_empty() => {
                    return Err(InvalidAction::EmptyTarget { order });
                }
                _ => {}
            }
            if !deduped.contains(&target) {
                deduped.push(target);
            }
        }

        Ok(Self {
            order,
            card,
            controller,
            targets: deduped,
            kind: None,
            effect: None,
        })
    }

    /// Declare the effect kind.
    ///
    /// Counter and TargetedRemoval need at least one stack target and may
    /// not name players.
    pub fn with_kind(mut self, kind: EffectKind) -> Result<Self, InvalidAction> {
        if kind.acts_on_stack() {
            if let Some(player) = self.targets.iter().find_map(|t| match t {
                TargetRef::Player(label) => Some(label.clone()),
                TargetRef::Action { .. } => None,
            }) {
                return Err(InvalidAction::PlayerTargetForStackEffect {
                    order: self.order,
                    kind,
                    player,
                });
            }
            if self.targets.is_empty() {
                return Err(InvalidAction::MissingStackTarget {
                    order: self.order,
                    kind,
                });
            }
        }
        self.kind = Some(kind);
        Ok(self)
    }

    /// Attach effect text.
    #[must_use]
    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = Some(effect.into());
        self
    }

    #[must_use]
    pub fn order(&self) -> ActionOrder {
        self.order
    }

    #[must_use]
    pub fn card(&self) -> &str {
        &self.card
    }

    #[must_use]
    pub fn controller(&self) -> &str {
        &self.controller
    }

    #[must_use]
    pub fn targets(&self) -> &[TargetRef] {
        &self.targets
    }

    /// The caller-declared kind, if any.
    #[must_use]
    pub fn declared_kind(&self) -> Option<EffectKind> {
        self.kind
    }

    #[must_use]
    pub fn effect_text(&self) -> Option<&str> {
        self.effect.as_deref()
    }

    /// Check if this action has no targets.
    #[must_use]
    pub fn is_untargeted(&self) -> bool {
        self.targets.is_empty()
    }

    /// Orders of the stack entries this action targets.
    pub fn stack_targets(&self) -> impl Iterator<Item = ActionOrder> + '_ {
        self.targets.iter().filter_map(TargetRef::stack_order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_order_display() {
        assert_eq!(ActionOrder::new(3).to_string(), "#3");
        assert_eq!(ActionOrder::new(3).raw(), 3);
    }

    #[test]
    fn test_action_new() {
        let action = Action::new(
            ActionOrder::new(2),
            "Counterspell",
            "P2",
            [TargetRef::action(ActionOrder::new(1), "Lightning Bolt")],
        )
        .unwrap();

        assert_eq!(action.card(), "Counterspell");
        assert_eq!(action.controller(), "P2");
        assert_eq!(action.stack_targets().collect::<Vec<_>>(), vec![ActionOrder::new(1)]);
        assert!(!action.is_untargeted());
        assert_eq!(action.declared_kind(), None);
    }

    #[test]
    fn test_action_rejects_blank_fields() {
        let err = Action::new(ActionOrder::new(1), "  ", "P1", []).unwrap_err();
        assert_eq!(err, InvalidAction::EmptyCard { order: ActionOrder::new(1) });

        let err = Action::new(ActionOrder::new(1), "Shock", "", []).unwrap_err();
        assert_eq!(err, InvalidAction::EmptyController { order: ActionOrder::new(1) });

        let err = Action::new(ActionOrder::new(1), "Shock", "P1", [TargetRef::player(" ")])
            .unwrap_err();
        assert_eq!(err, InvalidAction::EmptyTarget { order: ActionOrder::new(1) });
    }

    #[test]
    fn test_action_rejects_self_and_forward_targets() {
        let own = Action::new(
            ActionOrder::new(2),
            "Counterspell",
            "P2",
            [TargetRef::action(ActionOrder::new(2), "Counterspell")],
        );
        assert!(matches!(own, Err(InvalidAction::TargetOrder { .. })));

        let future = Action::new(
            ActionOrder::new(2),
            "Counterspell",
            "P2",
            [TargetRef::action(ActionOrder::new(5), "Giant Growth")],
        );
        assert_eq!(
            future.unwrap_err(),
            InvalidAction::TargetOrder {
                order: ActionOrder::new(2),
                target: ActionOrder::new(5),
            }
        );
    }

    #[test]
    fn test_action_dedupes_targets() {
        let action = Action::new(
            ActionOrder::new(1),
            "Arc Trail",
            "P1",
            [TargetRef::player("P2"), TargetRef::player("P3"), TargetRef::player("P2")],
        )
        .unwrap();

        let labels: Vec<_> = action.targets().iter().map(TargetRef::label).collect();
        assert_eq!(labels, vec!["P2", "P3"]);
    }

    #[test]
    fn test_with_kind_validates_stack_effects() {
        let base = Action::new(ActionOrder::new(2), "Negate", "P2", [TargetRef::player("P1")])
            .unwrap();
        assert!(matches!(
            base.with_kind(EffectKind::Counter),
            Err(InvalidAction::PlayerTargetForStackEffect { .. })
        ));

        let untargeted = Action::new(ActionOrder::new(2), "Negate", "P2", []).unwrap();
        assert!(matches!(
            untargeted.with_kind(EffectKind::TargetedRemoval),
            Err(InvalidAction::MissingStackTarget { .. })
        ));

        let generic = Action::new(ActionOrder::new(1), "Shock", "P1", [TargetRef::player("P2")])
            .unwrap()
            .with_kind(EffectKind::Generic)
            .unwrap();
        assert_eq!(generic.declared_kind(), Some(EffectKind::Generic));
    }

    #[test]
    fn test_action_input_deserialize_defaults() {
        let input: ActionInput =
            serde_json::from_str(r#"{"card": "Lightning Bolt", "controller": "P1"}"#).unwrap();

        assert_eq!(input.card, "Lightning Bolt");
        assert!(input.targets.is_empty());
        assert_eq!(input.kind, None);
        assert_eq!(input.effect, None);
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::new(ActionOrder::new(1), "Shock", "P1", [TargetRef::player("P2")])
            .unwrap()
            .with_effect("2 damage");
        let json = serde_json::to_string(&action).unwrap();
        let deserialized: Action = serde_json::from_str(&json).unwrap();

        assert_eq!(action, deserialized);
    }
}
