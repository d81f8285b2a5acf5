//! Rule-text retrieval and explanation composing interfaces.
//!
//! Both are downstream of the resolver: they read a finished
//! [`ResolutionResult`] and never influence resolution order.

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::resolver::ResolutionResult;
use crate::stack::EntryStatus;

use super::cards::CardInfo;

/// A rule excerpt to cite in an explanation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCitation {
    pub rule_number: String,
    pub text: String,
}

impl RuleCitation {
    pub fn new(rule_number: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            rule_number: rule_number.into(),
            text: text.into(),
        }
    }
}

impl std::fmt::Display for RuleCitation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rule {}: {}", self.rule_number, self.text)
    }
}

/// Supplies rule text relevant to a question.
pub trait RuleTextRetriever: Send + Sync {
    /// Up to `limit` citations, most relevant first.
    fn retrieve(&self, query: &str, limit: usize) -> Vec<RuleCitation>;
}

/// Retriever that never cites anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCitations;

impl RuleTextRetriever for NoCitations {
    fn retrieve(&self, _query: &str, _limit: usize) -> Vec<RuleCitation> {
        Vec::new()
    }
}

/// A card as it appears in an answer, with display data if found.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoratedCard {
    pub name: String,
    pub info: Option<CardInfo>,
}

/// Everything a composer may read.
#[derive(Clone, Copy, Debug)]
pub struct ExplanationRequest<'a> {
    pub question: &'a str,
    pub result: &'a ResolutionResult,
    pub cards: &'a [DecoratedCard],
    pub citations: &'a [RuleCitation],
}

/// Turns a resolution into prose.
///
/// The facts in the steps are authoritative; a composer may reword them
/// but not change what resolved or what was countered.
pub trait ExplanationComposer: Send + Sync {
    fn compose(&self, request: &ExplanationRequest<'_>) -> Result<String, ServiceError>;
}

/// Deterministic template composer built from the step descriptions.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainComposer;

impl ExplanationComposer for PlainComposer {
    fn compose(&self, request: &ExplanationRequest<'_>) -> Result<String, ServiceError> {
        let result = request.result;
        if result.steps.is_empty() {
            return Ok("Nothing was put on the stack, so nothing resolves.".to_string());
        }

        let mut text = format!(
            "The stack resolves last in, first out: {}.",
            result.resolution_order().join(", then ")
        );
        for step in &result.steps {
            text.push_str(&format!("\n{}. {}", step.step_number, step.description));
        }

        let countered: Vec<_> = result
            .with_status(EntryStatus::Countered)
            .map(|s| s.entry.card())
            .collect();
        if !countered.is_empty() {
            text.push_str(&format!("\nCountered without resolving: {}.", countered.join(", ")));
        }
        let fizzled: Vec<_> = result
            .with_status(EntryStatus::Fizzled)
            .map(|s| s.entry.card())
            .collect();
        if !fizzled.is_empty() {
            text.push_str(&format!("\nFizzled for lack of a legal target: {}.", fizzled.join(", ")));
        }

        for citation in request.citations {
            text.push_str(&format!("\n{citation}"));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActionInput;
    use crate::resolver::resolve;

    #[test]
    fn test_plain_composer_mentions_counter() {
        let result = resolve(&[
            ActionInput::new("Lightning Bolt", "P1", ["P2"]),
            ActionInput::new("Counterspell", "P2", ["Lightning Bolt"]),
        ])
        .unwrap();
        let citations = [RuleCitation::new("701.5a", "To counter a spell is to cancel it.")];
        let request = ExplanationRequest {
            question: "Does Bolt still deal damage?",
            result: &result,
            cards: &[],
            citations: &citations,
        };

        let text = PlainComposer.compose(&request).unwrap();

        assert!(text.starts_with(
            "The stack resolves last in, first out: Counterspell, then Lightning Bolt."
        ));
        assert!(text.contains("\nCountered without resolving: Lightning Bolt."));
        assert!(text.ends_with("\nRule 701.5a: To counter a spell is to cancel it."));
    }

    #[test]
    fn test_plain_composer_empty() {
        let result = resolve(&[]).unwrap();
        let request = ExplanationRequest {
            question: "",
            result: &result,
            cards: &[],
            citations: &[],
        };

        let text = PlainComposer.compose(&request).unwrap();
        assert_eq!(text, "Nothing was put on the stack, so nothing resolves.");
    }

    #[test]
    fn test_no_citations() {
        assert!(NoCitations.retrieve("counter target spell", 5).is_empty());
    }
}
