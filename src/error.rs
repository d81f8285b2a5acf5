//! Error taxonomy.
//!
//! - [`InvalidAction`]: malformed or out-of-order input, raised before any
//!   entry is pushed.
//! - [`ResolutionError`]: an internal invariant broken while draining.
//! - [`ResolveError`]: what [`crate::resolve`] returns, wrapping either.
//! - [`ServiceError`]: process-wide context and collaborator failures.

use thiserror::Error;

use crate::core::ActionOrder;
use crate::resolver::Phase;
use crate::rules::EffectKind;

/// Per-action validation failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidAction {
    #[error("action {order} has an empty card name")]
    EmptyCard { order: ActionOrder },

    #[error("action {order} has an empty controller")]
    EmptyController { order: ActionOrder },

    #[error("action {order} has an empty target")]
    EmptyTarget { order: ActionOrder },

    #[error("action {order} targets `{target}`, which was not declared before it")]
    ForwardTarget { order: ActionOrder, target: String },

    #[error("action {order} targets action {target}, which is not declared before it")]
    TargetOrder {
        order: ActionOrder,
        target: ActionOrder,
    },

    #[error("action {order} targets unknown player `{target}`")]
    UnknownPlayer { order: ActionOrder, target: String },

    #[error("action {order} pushed after action {previous}")]
    OutOfOrder {
        order: ActionOrder,
        previous: ActionOrder,
    },

    #[error("action {order} is declared {kind} but targets nothing on the stack")]
    MissingStackTarget { order: ActionOrder, kind: EffectKind },

    #[error("action {order} is declared {kind} but targets player `{player}`")]
    PlayerTargetForStackEffect {
        order: ActionOrder,
        kind: EffectKind,
        player: String,
    },
}

/// Invariant violation while draining the stack.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("action {order} targets action {target}, which was never pushed")]
    UnknownTarget {
        order: ActionOrder,
        target: ActionOrder,
    },

    #[error("resolver is {actual}, expected {expected}")]
    PhaseViolation { expected: Phase, actual: Phase },

    #[error("resolution finished with {steps} steps for {pushed} pushed entries")]
    Incomplete { steps: usize, pushed: usize },
}

/// Failure of a whole resolution request.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("invalid action: {0}")]
    Invalid(#[from] InvalidAction),

    #[error("resolution failed: {0}")]
    Resolution(#[from] ResolutionError),
}

/// Failure in the surrounding service layer.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("service context already installed")]
    AlreadyInstalled,

    #[error("service context not installed")]
    NotInstalled,

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("explanation composer failed: {0}")]
    Composer(String),
}

pub type Result<T> = std::result::Result<T, ResolveError>;
