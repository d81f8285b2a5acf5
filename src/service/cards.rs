//! Card data source interface and an in-memory catalog.
//!
//! Card data only decorates output. Resolution never reads it.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Display data for a card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInfo {
    pub name: String,
    pub type_line: Option<String>,
    pub mana_cost: Option<String>,
    pub oracle_text: Option<String>,
    pub image_url: Option<String>,
}

impl CardInfo {
    /// Create card info with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_type_line(mut self, type_line: impl Into<String>) -> Self {
        self.type_line = Some(type_line.into());
        self
    }

    #[must_use]
    pub fn with_mana_cost(mut self, mana_cost: impl Into<String>) -> Self {
        self.mana_cost = Some(mana_cost.into());
        self
    }

    #[must_use]
    pub fn with_oracle_text(mut self, oracle_text: impl Into<String>) -> Self {
        self.oracle_text = Some(oracle_text.into());
        self
    }

    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Looks up card display data by name.
///
/// Implementations wrap an external catalog. A miss is not an error.
pub trait CardDataSource: Send + Sync {
    fn lookup(&self, card_name: &str) -> Option<CardInfo>;
}

/// In-memory card catalog with case-insensitive lookup.
///
/// ## Example
///
/// ```
/// use tolaria_stack::service::{CardCatalog, CardDataSource, CardInfo};
///
/// let mut catalog = CardCatalog::new();
/// catalog.insert(CardInfo::new("Lightning Bolt").with_mana_cost("{R}"));
///
/// let found = catalog.lookup("lightning bolt").unwrap();
/// assert_eq!(found.mana_cost.as_deref(), Some("{R}"));
/// assert!(catalog.lookup("Black Lotus").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<String, CardInfo>,
}

impl CardCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Insert a card, returning the entry it replaced.
    pub fn insert(&mut self, card: CardInfo) -> Option<CardInfo> {
        self.cards.insert(Self::key(&card.name), card)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CardInfo> {
        self.cards.get(&Self::key(name))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.cards.contains_key(&Self::key(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardInfo> {
        self.cards.values()
    }
}

impl FromIterator<CardInfo> for CardCatalog {
    fn from_iter<I: IntoIterator<Item = CardInfo>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for card in iter {
            catalog.insert(card);
        }
        catalog
    }
}

impl CardDataSource for CardCatalog {
    fn lookup(&self, card_name: &str) -> Option<CardInfo> {
        self.get(card_name).cloned()
    }
}
