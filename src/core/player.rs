//! Player identification and per-player data.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. Seat order is the index order.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access by `PlayerId`.
//!
//! ## PlayerState
//!
//! Everything a player owns besides its hero: mana, the ordered board of
//! minions, the hand and the deck.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::entity::EntityId;
use crate::cards::Card;

/// Player identifier. Player indices are 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// The player seated after this one.
    ///
    /// ```
    /// use card_engine::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).next(2), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(1).next(2), PlayerId::new(0));
    /// ```
    #[must_use]
    pub fn next(self, player_count: usize) -> PlayerId {
        PlayerId(((self.index() + 1) % player_count) as u8)
    }

    /// All players in seat order, starting with this one.
    pub fn seat_order(self, player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count).map(move |offset| PlayerId(((self.index() + offset) % player_count) as u8))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8).map(|i| factory(PlayerId(i))).collect();

        Self { data }
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Build from one value per player, in seat order.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// Mutable per-player state.
///
/// The board is an `im::Vector` so bulk effects can snapshot it in O(1)
/// before iterating.
pub struct PlayerState {
    /// This player's ID.
    pub id: PlayerId,

    /// The player's hero entity.
    pub hero: EntityId,

    /// Mana available this turn.
    pub mana: i32,

    /// Mana crystals (refilled each turn).
    pub max_mana: i32,

    /// Mana locked next turn by overload.
    pub overload_owed: i32,

    /// Mana locked this turn by last turn's overload.
    pub overload_locked: i32,

    /// Bonus added to spell damage.
    pub spell_damage: i32,

    /// Multiplier applied to healing.
    pub heal_multiplier: i32,

    /// Fatigue damage dealt by the next empty-deck draw.
    pub fatigue: i32,

    board: Vector<EntityId>,
    hand: Vec<Box<dyn Card>>,
    /// Top of deck = end of vec.
    deck: Vec<Box<dyn Card>>,
}

impl PlayerState {
    /// Create an empty player with no mana.
    #[must_use]
    pub fn new(id: PlayerId, hero: EntityId) -> Self {
        Self {
            id,
            hero,
            mana: 0,
            max_mana: 0,
            overload_owed: 0,
            overload_locked: 0,
            spell_damage: 0,
            heal_multiplier: 1,
            fatigue: 0,
            board: Vector::new(),
            hand: Vec::new(),
            deck: Vec::new(),
        }
    }

    /// Player entity ID.
    #[must_use]
    pub fn entity(&self) -> EntityId {
        EntityId::player(self.id)
    }

    // === Scaling ===

    /// Spell damage after this player's bonuses.
    #[must_use]
    pub fn effective_spell_damage(&self, base: i32) -> i32 {
        base + self.spell_damage
    }

    /// Healing after this player's multipliers.
    #[must_use]
    pub fn effective_heal_power(&self, base: i32) -> i32 {
        base * self.heal_multiplier
    }

    // === Board ===

    /// Minions in board order (left to right).
    #[must_use]
    pub fn board(&self) -> &Vector<EntityId> {
        &self.board
    }

    /// O(1) copy of the board for iteration while mutating.
    #[must_use]
    pub fn board_snapshot(&self) -> Vector<EntityId> {
        self.board.clone()
    }

    /// Position of a minion on this board.
    #[must_use]
    pub fn position_of(&self, minion: EntityId) -> Option<usize> {
        self.board.index_of(&minion)
    }

    pub(crate) fn insert_minion(&mut self, index: usize, minion: EntityId) {
        let index = index.min(self.board.len());
        self.board.insert(index, minion);
    }

    pub(crate) fn remove_minion(&mut self, minion: EntityId) -> Option<usize> {
        let index = self.position_of(minion)?;
        self.board.remove(index);
        Some(index)
    }

    // === Hand ===

    /// Cards in hand, oldest first.
    #[must_use]
    pub fn hand(&self) -> &[Box<dyn Card>] {
        &self.hand
    }

    pub(crate) fn push_hand(&mut self, card: Box<dyn Card>) {
        self.hand.push(card);
    }

    pub(crate) fn take_from_hand(&mut self, index: usize) -> Option<Box<dyn Card>> {
        (index < self.hand.len()).then(|| self.hand.remove(index))
    }

    // === Deck ===

    /// Number of cards left in the deck.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.deck.len()
    }

    /// Names of the cards in the deck, bottom first.
    pub fn deck_names(&self) -> impl Iterator<Item = &str> {
        self.deck.iter().map(|card| card.meta().name.as_str())
    }

    pub(crate) fn deck_mut(&mut self) -> &mut Vec<Box<dyn Card>> {
        &mut self.deck
    }

    pub(crate) fn pop_deck(&mut self) -> Option<Box<dyn Card>> {
        self.deck.pop()
    }
}

impl std::fmt::Debug for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerState")
            .field("id", &self.id)
            .field("mana", &self.mana)
            .field("max_mana", &self.max_mana)
            .field("board", &self.board)
            .field("hand", &self.hand.iter().map(|c| c.meta().name.as_str()).collect::<Vec<_>>())
            .field("deck_size", &self.deck.len())
            .finish()
    }
}
