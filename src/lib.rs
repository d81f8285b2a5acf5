//! # tolaria-stack
//!
//! Deterministic stack resolution for trading card game rules questions.
//!
//! Callers declare a sequence of spells and abilities in the order they
//! were played. The engine validates them, pushes them onto a LIFO stack,
//! and pops them one at a time, recording a step for every entry with
//! the state of the stack afterwards.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: The same inputs always produce an identical
//!    [`ResolutionResult`], down to its serialized bytes.
//!
//! 2. **Backwards Targets Only**: An action may target players or cards
//!    declared before it. Forward references are rejected up front.
//!
//! 3. **Closed Effect Kinds**: Generic, Counter and TargetedRemoval are the
//!    only kinds; the rule set matches them exhaustively.
//!
//! ## Modules
//!
//! - `core`: Action model, ingestion, configuration
//! - `stack`: LIFO stack and entry status
//! - `rules`: Effect classification, legality, consequences
//! - `resolver`: Resolution state machine and step log
//! - `render`: Plain-text stack visualization
//! - `service`: Process-wide context, card data, explanations
//! - `error`: Error types for every layer

pub mod core;
pub mod error;
pub mod render;
pub mod resolver;
pub mod rules;
pub mod service;
pub mod stack;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{
    ingest, Action, ActionInput, ActionOrder, NameMatching, ResolverConfig, TargetRef,
};

pub use crate::error::{InvalidAction, ResolutionError, ResolveError, ServiceError};

pub use crate::stack::{EntryStatus, Stack, StackEntry};

pub use crate::rules::{EffectKind, Outcome, RuleSet, SideEffect};

pub use crate::resolver::{
    resolve, resolve_with, Phase, ResolutionResult, ResolutionStep, Resolver, StackSnapshot,
    StepLog,
};

pub use crate::render::{render, render_step, StackView};

pub use crate::service::{
    CardCatalog, CardDataSource, CardInfo, ExplanationComposer, InteractionReport,
    PlainComposer, RuleCitation, RuleTextRetriever, ServiceContext,
};
