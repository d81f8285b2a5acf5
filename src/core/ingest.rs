//! Ingestion: raw [`ActionInput`]s to validated [`Action`]s.
//!
//! Orders are assigned 1-based in appearance order. String targets are
//! bound in this order of preference:
//!
//! 1. the "no target" literal, which is dropped;
//! 2. the most recent *earlier* action with that card name;
//! 3. a player label, checked against the configured roster.
//!
//! A string naming only the current or a later card is a forward target
//! and rejects the whole batch.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::InvalidAction;

use super::action::{Action, ActionInput, ActionOrder, TargetRef};
use super::config::ResolverConfig;

/// Validate a batch of inputs.
///
/// Fails on the first invalid action; nothing is returned partially.
pub fn ingest(inputs: &[ActionInput], config: &ResolverConfig) -> Result<Vec<Action>, InvalidAction> {
    let matching = config.card_matching;
    let all_cards: FxHashSet<String> = inputs.iter().map(|i| matching.key(&i.card)).collect();

    let mut declared: FxHashMap<String, (ActionOrder, String)> = FxHashMap::default();
    let mut actions = Vec::with_capacity(inputs.len());

    for (index, input) in inputs.iter().enumerate() {
        let order = ActionOrder::new(index as u32 + 1);
        let mut targets = Vec::with_capacity(input.targets.len());

        for raw in &input.targets {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(InvalidAction::EmptyTarget { order });
            }
            if config.is_none_literal(trimmed) {
                continue;
            }

            let key = matching.key(trimmed);
            if let Some((target_order, card)) = declared.get(&key) {
                targets.push(TargetRef::action(*target_order, card.clone()));
            } else if all_cards.contains(&key) {
                return Err(InvalidAction::ForwardTarget {
                    order,
                    target: trimmed.to_string(),
                });
            } else if config.accepts_player(trimmed) {
                targets.push(TargetRef::player(trimmed));
            } else {
                return Err(InvalidAction::UnknownPlayer {
                    order,
                    target: trimmed.to_string(),
                });
            }
        }

        let mut action = Action::new(order, input.card.trim(), input.controller.trim(), targets)?;
        if let Some(kind) = input.kind {
            action = action.with_kind(kind)?;
        }
        if let Some(effect) = &input.effect {
            action = action.with_effect(effect.clone());
        }

        declared.insert(matching.key(&input.card), (order, action.card().to_string()));
        actions.push(action);
    }

    Ok(actions)
}
