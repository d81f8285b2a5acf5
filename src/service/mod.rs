//! Service layer around the resolver.
//!
//! Three collaborator seams, all read-only consumers or decorators:
//!
//! - [`CardDataSource`]: card display data by name
//! - [`RuleTextRetriever`]: rule citations for a question
//! - [`ExplanationComposer`]: prose from a finished resolution
//!
//! [`ServiceContext`] bundles them as explicit process-wide state with an
//! init-once lifecycle, kept apart from the per-request resolver.

mod cards;
mod context;
mod explain;

pub use cards::{CardCatalog, CardDataSource, CardInfo};
pub use context::{InteractionReport, ServiceContext, DEFAULT_CITATION_LIMIT};
pub use explain::{
    DecoratedCard, ExplanationComposer, ExplanationRequest, NoCitations, PlainComposer,
    RuleCitation, RuleTextRetriever,
};
