//! Resolver configuration.
//!
//! Only ingestion reads the configuration: how string targets are matched
//! against earlier cards and which player labels are accepted. Resolution
//! itself has no knobs.

use serde::{Deserialize, Serialize};

/// How a string target is compared to earlier card names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameMatching {
    /// Byte-for-byte after trimming.
    #[default]
    Exact,
    /// Unicode case-insensitive after trimming.
    IgnoreCase,
}

impl NameMatching {
    /// Normalize a name into its comparison key.
    #[must_use]
    pub fn key(self, name: &str) -> String {
        match self {
            Self::Exact => name.trim().to_string(),
            Self::IgnoreCase => name.trim().to_lowercase(),
        }
    }
}

/// Configuration for action ingestion.
///
/// ## Example
///
/// ```
/// use tolaria_stack::core::{NameMatching, ResolverConfig};
///
/// let config = ResolverConfig::new()
///     .with_card_matching(NameMatching::IgnoreCase)
///     .with_players(["Alice", "Bob"]);
/// assert!(config.accepts_player("Bob"));
/// assert!(!config.accepts_player("Carol"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub card_matching: NameMatching,

    /// Known player labels. `None` accepts any label.
    pub players: Option<Vec<String>>,

    /// Target literal meaning "no target", compared case-insensitively.
    pub none_literal: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            card_matching: NameMatching::Exact,
            players: None,
            none_literal: "none".to_string(),
        }
    }
}

impl ResolverConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the card name matching mode.
    #[must_use]
    pub fn with_card_matching(mut self, matching: NameMatching) -> Self {
        self.card_matching = matching;
        self
    }

    /// Restrict player targets to a roster.
    #[must_use]
    pub fn with_players<I, S>(mut self, players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.players = Some(players.into_iter().map(Into::into).collect());
        self
    }

    /// Change the "no target" literal.
    #[must_use]
    pub fn with_none_literal(mut self, literal: impl Into<String>) -> Self {
        self.none_literal = literal.into();
        self
    }

    /// Check if a raw target is the "no target" literal.
    #[must_use]
    pub fn is_none_literal(&self, target: &str) -> bool {
        target.trim().eq_ignore_ascii_case(self.none_literal.trim())
    }

    /// Check if a player label passes the roster.
    #[must_use]
    pub fn accepts_player(&self, label: &str) -> bool {
        match &self.players {
            None => true,
            Some(roster) => roster.iter().any(|p| p.trim() == label.trim()),
        }
    }
}
