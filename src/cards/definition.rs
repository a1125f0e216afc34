//! Static card metadata.
//!
//! `CardMeta` is the part of a card every kind shares: name, cost, class
//! and rarity. Behavior lives in the card kinds themselves.

use serde::{Deserialize, Serialize};

/// Hero class a card belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    #[default]
    Neutral,
    Druid,
    Hunter,
    Mage,
    Paladin,
    Priest,
    Rogue,
    Shaman,
    Warlock,
    Warrior,
}

/// Card rarity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Free,
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
    /// Generated by other cards; never collectible.
    Special,
}

/// Broad card kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Spell,
    Minion,
}

/// Metadata shared by every card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardMeta {
    /// Card name. Unique within a registry.
    pub name: String,

    /// Mana cost.
    pub cost: i32,

    pub class: CharacterClass,
    pub rarity: Rarity,
    pub kind: CardKind,

    /// Mana locked on the caster's next turn.
    pub overload: i32,
}

impl CardMeta {
    /// Metadata for a spell.
    #[must_use]
    pub fn spell(name: impl Into<String>, cost: i32, class: CharacterClass, rarity: Rarity) -> Self {
        Self {
            name: name.into(),
            cost,
            class,
            rarity,
            kind: CardKind::Spell,
            overload: 0,
        }
    }

    /// Metadata for a minion.
    #[must_use]
    pub fn minion(name: impl Into<String>, cost: i32, class: CharacterClass, rarity: Rarity) -> Self {
        Self {
            kind: CardKind::Minion,
            ..Self::spell(name, cost, class, rarity)
        }
    }

    /// Metadata for one option of a choice card. Options are never in a
    /// hand, so they cost nothing and carry no class.
    #[must_use]
    pub fn choice(name: impl Into<String>) -> Self {
        Self::spell(name, 0, CharacterClass::Neutral, Rarity::Special)
    }

    #[must_use]
    pub fn with_overload(mut self, overload: i32) -> Self {
        self.overload = overload;
        self
    }

    #[must_use]
    pub fn is_spell(&self) -> bool {
        self.kind == CardKind::Spell
    }
}
