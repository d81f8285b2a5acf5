//! Process-wide service context.
//!
//! Long-lived collaborators (card catalog client, rule index, model
//! client) are built once at startup and installed here. The lifecycle is
//! init-once, no teardown: [`ServiceContext::install`] succeeds exactly
//! once per process and the context lives until exit.
//!
//! The resolver does not touch this state. Every call to
//! [`ServiceContext::answer`] runs its own stateless resolution.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::core::{ActionInput, ResolverConfig};
use crate::error::ServiceError;
use crate::render;
use crate::resolver::{resolve_with, ResolutionResult};

use super::cards::CardDataSource;
use super::explain::{
    DecoratedCard, ExplanationComposer, ExplanationRequest, NoCitations, PlainComposer,
    RuleCitation, RuleTextRetriever,
};

static CONTEXT: OnceLock<ServiceContext> = OnceLock::new();

/// Default number of rule citations requested per question.
pub const DEFAULT_CITATION_LIMIT: usize = 5;

/// Full answer to one rules question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionReport {
    pub question: String,
    pub resolution: ResolutionResult,
    /// Distinct cards in declaration order.
    pub cards: Vec<DecoratedCard>,
    pub citations: Vec<RuleCitation>,
    pub explanation: String,
    /// Text rendering of the stack and its resolution.
    pub visualization: String,
}

/// Long-lived collaborators plus the resolver configuration.
pub struct ServiceContext {
    config: ResolverConfig,
    cards: Box<dyn CardDataSource>,
    rules: Box<dyn RuleTextRetriever>,
    composer: Box<dyn ExplanationComposer>,
    citation_limit: usize,
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("config", &self.config)
            .field("citation_limit", &self.citation_limit)
            .finish_non_exhaustive()
    }
}

impl ServiceContext {
    /// Create a context around a card source, citing nothing and
    /// composing with [`PlainComposer`].
    pub fn new(cards: impl CardDataSource + 'static) -> Self {
        Self {
            config: ResolverConfig::default(),
            cards: Box::new(cards),
            rules: Box::new(NoCitations),
            composer: Box::new(PlainComposer),
            citation_limit: DEFAULT_CITATION_LIMIT,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: impl RuleTextRetriever + 'static) -> Self {
        self.rules = Box::new(rules);
        self
    }

    #[must_use]
    pub fn with_composer(mut self, composer: impl ExplanationComposer + 'static) -> Self {
        self.composer = Box::new(composer);
        self
    }

    #[must_use]
    pub fn with_citation_limit(mut self, limit: usize) -> Self {
        self.citation_limit = limit;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Install as the process-wide context. Only the first call succeeds.
    pub fn install(self) -> Result<&'static ServiceContext, ServiceError> {
        CONTEXT.set(self).map_err(|_| ServiceError::AlreadyInstalled)?;
        tracing::info!("service context installed");
        Self::global()
    }

    /// The installed process-wide context.
    pub fn global() -> Result<&'static ServiceContext, ServiceError> {
        CONTEXT.get().ok_or(ServiceError::NotInstalled)
    }

    /// Answer a question about an action sequence.
    ///
    /// Resolution runs first and alone decides what happened; card lookup,
    /// rule retrieval and composing only dress up that result.
    pub fn answer(
        &self,
        question: &str,
        actions: &[ActionInput],
    ) -> Result<InteractionReport, ServiceError> {
        let resolution = resolve_with(actions, &self.config)?;

        let cards = self.decorate(&resolution);
        let query = format!("{} {}", question.trim(), resolution.resolution_order().join(" "));
        let citations = self.rules.retrieve(query.trim(), self.citation_limit);

        let explanation = self.composer.compose(&ExplanationRequest {
            question,
            result: &resolution,
            cards: &cards,
            citations: &citations,
        })?;
        let visualization = render::render(&resolution);

        tracing::debug!(
            steps = resolution.steps.len(),
            cards = cards.len(),
            citations = citations.len(),
            "answered interaction"
        );

        Ok(InteractionReport {
            question: question.to_string(),
            resolution,
            cards,
            citations,
            explanation,
            visualization,
        })
    }

    fn decorate(&self, resolution: &ResolutionResult) -> Vec<DecoratedCard> {
        let mut steps: Vec<_> = resolution.steps.iter().collect();
        steps.sort_by_key(|s| s.entry.position);

        let mut cards: Vec<DecoratedCard> = Vec::new();
        for step in steps {
            let name = step.entry.card();
            if cards.iter().any(|c| c.name == name) {
                continue;
            }
            let info = self.cards.lookup(name);
            if info.is_none() {
                tracing::debug!(card = name, "card not found in catalog");
            }
            cards.push(DecoratedCard {
                name: name.to_string(),
                info,
            });
        }
        cards
    }
}
