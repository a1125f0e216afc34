//! Game state: every entity in play plus the effect machinery.
//!
//! ## Storage
//!
//! - Players and heroes live in `PlayerMap`s indexed by seat.
//! - Minions live in an `FxHashMap` keyed by `EntityId`; board order is kept
//!   by each `PlayerState`.
//! - Attached effects, the event bus and the delayed queue are owned here so
//!   that every mutation can raise events and defer deaths against one
//!   consistent view.
//!
//! Stat changes go through the mutation interface (see `core::mutation`),
//! event raising through `triggers::dispatch` and deferred work through
//! `stack::delayed`.

use rustc_hash::FxHashMap;

use super::character::{Hero, Minion};
use super::config::GameConfig;
use super::entity::{EntityId, EntityKind};
use super::player::{PlayerId, PlayerMap, PlayerState};
use super::rng::GameRng;
use crate::cards::Card;
use crate::effects::EffectTable;
use crate::stack::DelayedQueue;
use crate::triggers::EventBus;

/// Complete state of one game.
pub struct GameState {
    config: GameConfig,
    players: PlayerMap<PlayerState>,
    heroes: PlayerMap<Hero>,
    minions: FxHashMap<EntityId, Minion>,
    next_entity: u32,
    next_born: u64,

    /// Player whose turn it is.
    pub active_player: PlayerId,

    /// Turn number: 0 until the first turn starts.
    pub turn_number: u32,

    /// Game RNG (deck shuffles, put-back positions).
    pub rng: GameRng,

    pub(crate) effects: EffectTable,
    pub(crate) bus: EventBus,
    pub(crate) delayed: DelayedQueue,
    mutation_depth: u32,
}

impl GameState {
    /// Create a game with empty boards, hands and decks.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let player_count = config.player_count;
        assert!(player_count > 0, "Must have at least 1 player");

        let players = PlayerMap::new(player_count, |p| {
            PlayerState::new(p, EntityId::hero(p, player_count))
        });
        let heroes = PlayerMap::new(player_count, |p| {
            Hero::new(EntityId::hero(p, player_count), p, config.starting_health)
        });
        let rng = GameRng::new(config.seed);

        Self {
            players,
            heroes,
            minions: FxHashMap::default(),
            next_entity: EntityId::first_minion(player_count),
            next_born: 0,
            active_player: PlayerId::new(0),
            turn_number: 0,
            rng,
            effects: EffectTable::default(),
            bus: EventBus::default(),
            delayed: DelayedQueue::default(),
            mutation_depth: 0,
            config,
        }
    }

    // === Configuration ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    /// Iterate over all player IDs in seat order.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count())
    }

    // === Players and Heroes ===

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    /// Mutable player access for mana and scaling bonuses.
    ///
    /// Board, hand and deck stay behind the state's own methods.
    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player]
    }

    #[must_use]
    pub fn hero(&self, player: PlayerId) -> &Hero {
        &self.heroes[player]
    }

    pub(crate) fn hero_mut(&mut self, player: PlayerId) -> &mut Hero {
        &mut self.heroes[player]
    }

    // === Minions ===

    /// A minion in play (including ones marked dying but not yet swept).
    #[must_use]
    pub fn minion(&self, id: EntityId) -> Option<&Minion> {
        self.minions.get(&id)
    }

    pub(crate) fn minion_mut(&mut self, id: EntityId) -> Option<&mut Minion> {
        self.minions.get_mut(&id)
    }

    /// A player's minions in board order.
    pub fn minions_of(&self, player: PlayerId) -> impl Iterator<Item = &Minion> + '_ {
        self.players[player]
            .board()
            .iter()
            .filter_map(move |id| self.minions.get(id))
    }

    /// Number of minions on a player's board.
    #[must_use]
    pub fn board_len(&self, player: PlayerId) -> usize {
        self.players[player].board().len()
    }

    /// Whether a player's board can take another minion.
    #[must_use]
    pub fn board_has_room(&self, player: PlayerId) -> bool {
        self.board_len(player) < self.config.max_board_size
    }

    pub(crate) fn insert_minion(&mut self, minion: Minion, index: usize) {
        let owner = minion.owner;
        let id = minion.id;
        self.minions.insert(id, minion);
        self.players[owner].insert_minion(index, id);
    }

    pub(crate) fn take_minion(&mut self, id: EntityId) -> Option<(Minion, usize)> {
        let owner = self.minions.get(&id)?.owner;
        let index = self.players[owner].remove_minion(id)?;
        let minion = self.minions.remove(&id)?;
        Some((minion, index))
    }

    /// Minions marked dying, ordered by summon sequence.
    pub(crate) fn dying_minions(&self) -> Vec<EntityId> {
        let mut dying: Vec<&Minion> = self.minions.values().filter(|m| m.dying).collect();
        dying.sort_by_key(|m| m.born);
        dying.into_iter().map(|m| m.id).collect()
    }

    pub(crate) fn alloc_minion_id(&mut self) -> (EntityId, u64) {
        let id = EntityId(self.next_entity);
        let born = self.next_born;
        self.next_entity += 1;
        self.next_born += 1;
        (id, born)
    }

    // === Entity Lookup ===

    /// What an entity is, or `None` once it has left play.
    #[must_use]
    pub fn kind_of(&self, entity: EntityId) -> Option<EntityKind> {
        let player_count = self.player_count();
        if let Some(player) = entity.as_player(player_count) {
            return Some(EntityKind::Player(player));
        }
        if let Some(player) = entity.as_hero(player_count) {
            return Some(EntityKind::Hero(player));
        }
        self.minions.contains_key(&entity).then_some(EntityKind::Minion)
    }

    /// Whether an entity is still in play.
    #[must_use]
    pub fn is_in_play(&self, entity: EntityId) -> bool {
        self.kind_of(entity).is_some()
    }

    /// The player controlling an entity in play.
    #[must_use]
    pub fn controller_of(&self, entity: EntityId) -> Option<PlayerId> {
        match self.kind_of(entity)? {
            EntityKind::Player(p) | EntityKind::Hero(p) => Some(p),
            EntityKind::Minion => self.minions.get(&entity).map(|m| m.owner),
        }
    }

    /// The character standing for an entity: players map to their hero.
    #[must_use]
    pub fn character_for(&self, entity: EntityId) -> Option<EntityId> {
        match self.kind_of(entity)? {
            EntityKind::Player(p) => Some(self.heroes[p].id),
            EntityKind::Hero(_) | EntityKind::Minion => Some(entity),
        }
    }

    /// Resolve an entity to its character and that character's kind.
    pub(crate) fn resolve_character(&self, entity: EntityId) -> Option<(EntityId, EntityKind)> {
        let character = self.character_for(entity)?;
        self.kind_of(character).map(|kind| (character, kind))
    }

    /// A player's hero followed by their minions in board order.
    #[must_use]
    pub fn characters_of(&self, player: PlayerId) -> Vec<EntityId> {
        let mut characters = Vec::with_capacity(1 + self.board_len(player));
        characters.push(self.heroes[player].id);
        characters.extend(self.players[player].board().iter().copied());
        characters
    }

    // === Hand and Deck ===

    /// Add a card to a player's hand. Returns `false` if the hand is full.
    pub fn add_to_hand(&mut self, player: PlayerId, card: Box<dyn Card>) -> bool {
        if self.players[player].hand().len() >= self.config.max_hand_size {
            tracing::debug!(%player, card = %card.meta().name, "hand full, card burned");
            return false;
        }
        self.players[player].push_hand(card);
        true
    }

    /// Put a card on top of a player's deck.
    pub fn add_to_deck(&mut self, player: PlayerId, card: Box<dyn Card>) {
        self.players[player].deck_mut().push(card);
    }

    /// Shuffle a player's deck with the game RNG.
    pub fn shuffle_deck(&mut self, player: PlayerId) {
        let deck = self.players[player].deck_mut();
        self.rng.shuffle(deck);
    }

    /// Shuffle a card into a random position of a player's deck.
    pub fn put_back(&mut self, player: PlayerId, card: Box<dyn Card>) {
        let len = self.players[player].deck_size();
        let index = self.rng.choose_index(len + 1).unwrap_or(0);
        tracing::debug!(%player, card = %card.meta().name, index, "card put back into deck");
        self.players[player].deck_mut().insert(index, card);
    }

    pub(crate) fn take_from_hand(&mut self, player: PlayerId, index: usize) -> Option<Box<dyn Card>> {
        self.players[player].take_from_hand(index)
    }

    pub(crate) fn pop_deck(&mut self, player: PlayerId) -> Option<Box<dyn Card>> {
        self.players[player].pop_deck()
    }

    // === Atomic Mutations ===

    /// Start an atomic mutation. Deferred work waits until the outermost
    /// mutation ends.
    pub(crate) fn begin_mutation(&mut self) {
        self.mutation_depth += 1;
    }

    /// End an atomic mutation, draining the delayed queue if outermost.
    pub(crate) fn end_mutation(&mut self) {
        debug_assert!(self.mutation_depth > 0, "end_mutation without begin_mutation");
        self.mutation_depth = self.mutation_depth.saturating_sub(1);
        if self.mutation_depth == 0 {
            self.check_delayed();
        }
    }

    /// Run `f` as one atomic mutation.
    pub(crate) fn atomically<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.begin_mutation();
        let result = f(self);
        self.end_mutation();
        result
    }

    /// Whether a mutation is in progress.
    #[must_use]
    pub fn in_mutation(&self) -> bool {
        self.mutation_depth > 0
    }
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("turn_number", &self.turn_number)
            .field("active_player", &self.active_player)
            .field("players", &self.players)
            .field("heroes", &self.heroes)
            .field("minions", &self.minions.len())
            .field("effects", &self.effects.len())
            .field("delayed", &self.delayed.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(GameConfig::default())
    }

    #[test]
    fn test_new_state() {
        let state = state();

        assert_eq!(state.player_count(), 2);
        assert_eq!(state.turn_number, 0);
        assert_eq!(state.active_player, PlayerId::new(0));
        assert_eq!(state.hero(PlayerId::new(1)).health, 30);
        assert_eq!(state.hero(PlayerId::new(1)).id, EntityId(3));
        assert_eq!(state.player(PlayerId::new(0)).hero, EntityId(2));
    }

    #[test]
    fn test_kind_of() {
        let state = state();

        assert_eq!(state.kind_of(EntityId(0)), Some(EntityKind::Player(PlayerId::new(0))));
        assert_eq!(state.kind_of(EntityId(3)), Some(EntityKind::Hero(PlayerId::new(1))));
        assert_eq!(state.kind_of(EntityId(4)), None);
        assert!(!state.is_in_play(EntityId(99)));
    }

    #[test]
    fn test_controller_and_character() {
        let state = state();

        assert_eq!(state.controller_of(EntityId(1)), Some(PlayerId::new(1)));
        assert_eq!(state.controller_of(EntityId(2)), Some(PlayerId::new(0)));
        assert_eq!(state.character_for(EntityId(1)), Some(EntityId(3)));
        assert_eq!(state.character_for(EntityId(2)), Some(EntityId(2)));
        assert_eq!(state.character_for(EntityId(50)), None);
    }

    #[test]
    fn test_minion_ids_never_reused() {
        let mut state = state();

        let (a, born_a) = state.alloc_minion_id();
        let (b, born_b) = state.alloc_minion_id();

        assert_eq!(a, EntityId(4));
        assert_eq!(b, EntityId(5));
        assert!(born_a < born_b);
    }

    #[test]
    fn test_end_mutation_outermost_only() {
        let mut state = state();

        state.begin_mutation();
        state.begin_mutation();
        state.end_mutation();
        assert!(state.in_mutation());
        state.end_mutation();
        assert!(!state.in_mutation());
    }
}
