//! Entity identification.
//!
//! Every object an effect can touch (player, hero, minion) has a unique
//! `EntityId`.
//!
//! ## ID Layout
//!
//! - `0..player_count`: Reserved for players
//! - `player_count..2 * player_count`: Heroes, one per player, in seat order
//! - everything after: minions, allocated as they are summoned
//!
//! IDs are never reused within a game, so a stale `EntityId` held by an
//! effect or a payload can always be detected as "no longer in play".
//!
//! ```
//! use card_engine::core::EntityId;
//!
//! let player_count = 2;
//! let player_1 = EntityId::player_id(1);
//!
//! assert!(player_1.is_player(player_count));
//! assert!(!EntityId(7).is_player(player_count));
//! ```

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Unique identifier for any game entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create an entity ID for a player by index.
    #[must_use]
    pub const fn player_id(index: u8) -> Self {
        Self(index as u32)
    }

    /// Create entity ID for a player.
    #[must_use]
    pub const fn player(id: PlayerId) -> Self {
        Self(id.0 as u32)
    }

    /// Entity ID of a player's hero.
    ///
    /// ```
    /// use card_engine::core::{EntityId, PlayerId};
    ///
    /// assert_eq!(EntityId::hero(PlayerId::new(0), 2), EntityId(2));
    /// assert_eq!(EntityId::hero(PlayerId::new(1), 2), EntityId(3));
    /// ```
    #[must_use]
    pub const fn hero(id: PlayerId, player_count: usize) -> Self {
        Self(player_count as u32 + id.0 as u32)
    }

    /// First ID available for minions.
    #[must_use]
    pub const fn first_minion(player_count: usize) -> u32 {
        2 * player_count as u32
    }

    /// Check if this entity ID refers to a player.
    #[must_use]
    pub const fn is_player(self, player_count: usize) -> bool {
        self.0 < player_count as u32
    }

    /// Check if this entity ID refers to a hero.
    #[must_use]
    pub const fn is_hero(self, player_count: usize) -> bool {
        self.0 >= player_count as u32 && self.0 < 2 * player_count as u32
    }

    /// Convert to PlayerId if this is a player entity.
    #[must_use]
    pub fn as_player(self, player_count: usize) -> Option<PlayerId> {
        self.is_player(player_count).then(|| PlayerId::new(self.0 as u8))
    }

    /// Convert to the owning PlayerId if this is a hero entity.
    #[must_use]
    pub fn as_hero(self, player_count: usize) -> Option<PlayerId> {
        self.is_hero(player_count)
            .then(|| PlayerId::new((self.0 - player_count as u32) as u8))
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// What an entity is, as far as effects are concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player(PlayerId),
    Hero(PlayerId),
    Minion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_two_players() {
        let player_count = 2;

        assert!(EntityId(0).is_player(player_count));
        assert!(EntityId(1).is_player(player_count));
        assert!(EntityId(2).is_hero(player_count));
        assert!(EntityId(3).is_hero(player_count));
        assert!(!EntityId(4).is_hero(player_count));
        assert_eq!(EntityId::first_minion(player_count), 4);
    }

    #[test]
    fn test_hero_round_trip() {
        for player in PlayerId::all(3) {
            let hero = EntityId::hero(player, 3);
            assert_eq!(hero.as_hero(3), Some(player));
            assert_eq!(hero.as_player(3), None);
        }
    }

    #[test]
    fn test_as_player() {
        assert_eq!(EntityId(1).as_player(2), Some(PlayerId::new(1)));
        assert_eq!(EntityId(2).as_player(2), None);
        assert_eq!(EntityId::player(PlayerId::new(1)), EntityId(1));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EntityId(42)), "Entity(42)");
    }

    #[test]
    fn test_serialization() {
        let id = EntityId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
