//! Effect kinds and the side effects a resolution records.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::ActionOrder;

/// Closed set of effect kinds the rule set knows how to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Happens and is recorded; no simulation of its numbers.
    Generic,
    /// Counters its stack targets: they leave without resolving.
    Counter,
    /// Exiles its stack targets: like a counter, but they are removed
    /// from the game instead of going to the graveyard.
    TargetedRemoval,
}

impl EffectKind {
    /// Check if this kind only makes sense against stack entries.
    #[must_use]
    pub const fn acts_on_stack(self) -> bool {
        matches!(self, Self::Counter | Self::TargetedRemoval)
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Generic => "generic",
            Self::Counter => "counter",
            Self::TargetedRemoval => "targeted removal",
        };
        f.write_str(name)
    }
}

/// Unrecognized effect kind name.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown effect kind `{0}`")]
pub struct ParseEffectKindError(pub String);

impl std::str::FromStr for EffectKind {
    type Err = ParseEffectKindError;

    /// Accepts `Generic`, `Counter`, `TargetedRemoval` in any case, with
    /// optional `_`, `-` or space separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "generic" => Ok(Self::Generic),
            "counter" => Ok(Self::Counter),
            "targetedremoval" => Ok(Self::TargetedRemoval),
            _ => Err(ParseEffectKindError(s.to_string())),
        }
    }
}

/// Something a resolution did beyond settling its own entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SideEffect {
    /// A pending entry was countered.
    Countered {
        order: ActionOrder,
        card: String,
        by: String,
    },

    /// A pending entry was exiled from the stack.
    Exiled {
        order: ActionOrder,
        card: String,
        by: String,
    },

    /// A generic effect happened with the given target labels.
    EffectApplied {
        card: String,
        effect: Option<String>,
        targets: Vec<String>,
    },
}

impl SideEffect {
    /// The order of the entry this side effect removed, if any.
    #[must_use]
    pub fn removed_order(&self) -> Option<ActionOrder> {
        match self {
            Self::Countered { order, .. } | Self::Exiled { order, .. } => Some(*order),
            Self::EffectApplied { .. } => None,
        }
    }
}

impl std::fmt::Display for SideEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Countered { card, by, .. } => write!(f, "{card} countered by {by}"),
            Self::Exiled { card, by, .. } => write!(f, "{card} exiled by {by}"),
            Self::EffectApplied { card, effect, targets } => {
                match effect {
                    Some(text) => write!(f, "{card}: {text}")?,
                    None => write!(f, "{card} took effect")?,
                }
                if !targets.is_empty() {
                    write!(f, " (targeting {})", targets.join(", "))?;
                }
                Ok(())
            }
        }
    }
}
