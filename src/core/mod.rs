//! Action Model: typed actions, ingestion, and configuration.
//!
//! Pure data plus validation. Nothing here knows about the stack or the
//! rules; it only guarantees that every [`Action`] handed onward has a
//! card, a controller, and targets pointing strictly backwards.

pub mod action;
pub mod config;
pub mod ingest;

pub use action::{Action, ActionInput, ActionOrder, TargetRef};
pub use config::{NameMatching, ResolverConfig};
pub use ingest::ingest;
