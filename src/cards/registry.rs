//! Card registry for building cards by name.
//!
//! The `CardRegistry` maps card names to factories. Every `create` call
//! returns a fresh card, so decks never share card values.

use rustc_hash::FxHashMap;

use crate::error::{EngineError, Result};

use super::card::Card;

/// Builds one card.
pub type CardFactory = fn() -> Box<dyn Card>;

/// Registry of card factories, keyed by card name.
///
/// ## Example
///
/// ```
/// use card_engine::cards::CardRegistry;
///
/// let registry = CardRegistry::with_druid_cards();
///
/// let card = registry.create("Moonfire").unwrap();
/// assert_eq!(card.meta().cost, 0);
/// assert!(registry.create("Fireball").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    factories: FxHashMap<String, CardFactory>,
    /// Registration order, for deterministic iteration.
    names: Vec<String>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the druid card set.
    #[must_use]
    pub fn with_druid_cards() -> Self {
        let mut registry = Self::new();
        super::druid::register(&mut registry);
        registry
    }

    /// Register a factory under the name of the card it builds.
    ///
    /// Panics if a card with the same name already exists.
    pub fn register(&mut self, factory: CardFactory) {
        let name = factory().meta().name.clone();
        if self.factories.contains_key(&name) {
            panic!("Card {name:?} already registered");
        }
        self.names.push(name.clone());
        self.factories.insert(name, factory);
    }

    /// Build a fresh card by name.
    pub fn create(&self, name: &str) -> Result<Box<dyn Card>> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| EngineError::UnknownCard(name.to_string()))
    }

    /// Build a deck from card names, in order.
    pub fn build_deck<'n>(&self, names: impl IntoIterator<Item = &'n str>) -> Result<Vec<Box<dyn Card>>> {
        names.into_iter().map(|name| self.create(name)).collect()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
