//! The entity mutation interface.
//!
//! Every stat change an action or card makes goes through one of these
//! methods. They clamp values, raise the matching events and mark lethal
//! damage for the delayed death sweep. Methods that can raise events or
//! kill run as one atomic mutation: deaths they cause are swept when the
//! outermost mutation ends, so a call nested inside an action or a card
//! play leaves dying minions on the board until that outer step finishes.
//!
//! Targets that have already left play are ignored with a `trace!` record.

use tracing::{debug, info, trace};

use super::character::Minion;
use super::entity::{EntityId, EntityKind};
use super::player::PlayerId;
use super::state::GameState;
use crate::cards::MinionCard;
use crate::effects::{Action, ActionContext, Deathrattle, Targets};
use crate::stack::Deferred;
use crate::triggers::{EventName, EventPayload};

impl GameState {
    // === Damage and Death ===

    /// Deal `amount` damage from `source` to `target`. Returns damage dealt.
    ///
    /// Armor absorbs hero damage first. Lethal damage to a minion marks it
    /// dying and defers its removal; lethal damage to a hero marks it dead.
    pub fn damage(&mut self, source: EntityId, target: EntityId, amount: i32) -> i32 {
        self.atomically(|state| state.deal_damage(source, target, amount))
    }

    fn deal_damage(&mut self, source: EntityId, target: EntityId, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        let Some(target) = self.character_for(target) else {
            trace!(%target, "damage target left play");
            return 0;
        };

        match self.kind_of(target) {
            Some(EntityKind::Hero(player)) => {
                let hero = self.hero_mut(player);
                let absorbed = hero.armor.min(amount);
                hero.armor -= absorbed;
                hero.health -= amount - absorbed;
                if hero.health <= 0 && !hero.dead {
                    hero.dead = true;
                    info!(%player, "hero destroyed");
                }
                debug!(%source, %target, amount, absorbed, "hero damaged");
            }
            Some(EntityKind::Minion) => {
                let Some(minion) = self.minion_mut(target) else {
                    return 0;
                };
                minion.health -= amount;
                let lethal = minion.health <= 0;
                let owner = minion.owner;
                debug!(%source, %target, amount, lethal, "minion damaged");

                if lethal {
                    self.mark_dying(target);
                }
                self.raise(
                    EventName::MinionDamaged,
                    EventPayload::new(owner)
                        .with_subject(target)
                        .with_other(source)
                        .with_amount(amount),
                );
            }
            _ => return 0,
        }

        let player = self
            .controller_of(source)
            .or_else(|| self.controller_of(target))
            .unwrap_or(self.active_player);
        self.raise(
            EventName::DidDamage,
            EventPayload::new(player)
                .with_subject(source)
                .with_other(target)
                .with_amount(amount),
        );
        amount
    }

    /// Destroy a character regardless of its health.
    pub fn kill(&mut self, target: EntityId) {
        self.atomically(|state| state.destroy(target));
    }

    fn destroy(&mut self, target: EntityId) {
        match self.resolve_character(target) {
            Some((_, EntityKind::Hero(player))) => {
                let hero = self.hero_mut(player);
                hero.health = 0;
                hero.dead = true;
                info!(%player, "hero destroyed");
            }
            Some((minion, EntityKind::Minion)) => self.mark_dying(minion),
            _ => trace!(%target, "kill target left play"),
        }
    }

    /// Mark a minion as dying and schedule the death sweep.
    pub(crate) fn mark_dying(&mut self, id: EntityId) {
        let Some(minion) = self.minion_mut(id) else {
            return;
        };
        if minion.dying {
            return;
        }
        minion.dying = true;
        debug!(minion = %id, name = minion.name(), "minion dying");
        self.delayed.push(Deferred::Death(id));
    }

    // === Healing and Buffs ===

    /// Heal a character, never above its maximum health. Returns the
    /// amount actually restored.
    pub fn heal(&mut self, source: EntityId, target: EntityId, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        let healed = match self.resolve_character(target) {
            Some((_, EntityKind::Hero(player))) => {
                let hero = self.hero_mut(player);
                let before = hero.health;
                hero.health = (hero.health + amount).min(hero.max_health);
                hero.health - before
            }
            Some((id, EntityKind::Minion)) => match self.minion_mut(id) {
                Some(minion) => {
                    let before = minion.health;
                    minion.health = (minion.health + amount).min(minion.max_health);
                    minion.health - before
                }
                None => 0,
            },
            _ => {
                trace!(%target, "heal target left play");
                0
            }
        };
        debug!(%source, %target, healed, "healed");
        healed
    }

    /// Permanently change a character's attack.
    pub fn change_attack(&mut self, target: EntityId, amount: i32) {
        match self.resolve_character(target) {
            Some((_, EntityKind::Hero(player))) => self.hero_mut(player).attack += amount,
            Some((id, EntityKind::Minion)) => {
                if let Some(minion) = self.minion_mut(id) {
                    minion.attack += amount;
                }
            }
            _ => trace!(%target, "change_attack target left play"),
        }
    }

    /// Raise both maximum and current health.
    pub fn increase_health(&mut self, target: EntityId, amount: i32) {
        match self.resolve_character(target) {
            Some((_, EntityKind::Hero(player))) => {
                let hero = self.hero_mut(player);
                hero.max_health += amount;
                hero.health += amount;
            }
            Some((id, EntityKind::Minion)) => {
                if let Some(minion) = self.minion_mut(id) {
                    minion.max_health += amount;
                    minion.health += amount;
                }
            }
            _ => trace!(%target, "increase_health target left play"),
        }
    }

    /// Change attack until end of turn.
    pub fn change_temp_attack(&mut self, target: EntityId, amount: i32) {
        match self.resolve_character(target) {
            Some((_, EntityKind::Hero(player))) => self.hero_mut(player).temp_attack += amount,
            Some((id, EntityKind::Minion)) => {
                if let Some(minion) = self.minion_mut(id) {
                    minion.temp_attack += amount;
                }
            }
            _ => trace!(%target, "change_temp_attack target left play"),
        }
    }

    /// Give armor to a hero (players resolve to their hero).
    pub fn increase_armor(&mut self, target: EntityId, amount: i32) {
        match self.resolve_character(target).map(|(_, kind)| kind) {
            Some(EntityKind::Hero(player)) => self.hero_mut(player).armor += amount,
            _ => trace!(%target, "increase_armor target is not a hero"),
        }
    }

    /// Give a minion taunt.
    pub fn give_taunt(&mut self, target: EntityId) {
        match self.minion_mut(target) {
            Some(minion) => minion.taunt = true,
            None => trace!(%target, "give_taunt target is not a minion in play"),
        }
    }

    /// Clear temporary attack on every character a player controls.
    pub fn reset_temp_attack(&mut self, player: PlayerId) {
        self.hero_mut(player).temp_attack = 0;
        let board = self.player(player).board_snapshot();
        for id in board.iter() {
            if let Some(minion) = self.minion_mut(*id) {
                minion.temp_attack = 0;
            }
        }
    }

    /// Append a deathrattle to a minion. Duplicates stack.
    pub fn add_deathrattle(&mut self, target: EntityId, deathrattle: Deathrattle) {
        match self.minion_mut(target) {
            Some(minion) => minion.deathrattles.push(deathrattle),
            None => trace!(%target, "add_deathrattle target is not a minion in play"),
        }
    }

    // === Cards and Mana ===

    /// Draw the top card of a player's deck.
    ///
    /// Drawing into a full hand burns the card. Drawing from an empty deck
    /// deals fatigue damage that grows by one each time. Returns whether a
    /// card reached the hand.
    pub fn draw(&mut self, player: PlayerId) -> bool {
        match self.pop_deck(player) {
            Some(card) => {
                debug!(%player, card = %card.meta().name, "card drawn");
                self.add_to_hand(player, card)
            }
            None => {
                let fatigue = {
                    let state = self.player_mut(player);
                    state.fatigue += 1;
                    state.fatigue
                };
                let hero = self.hero(player).id;
                debug!(%player, fatigue, "fatigue");
                self.damage(hero, hero, fatigue);
                false
            }
        }
    }

    /// Gain mana this turn, up to the mana cap.
    pub fn gain_mana(&mut self, player: PlayerId, amount: i32) {
        let cap = self.config().max_mana;
        let state = self.player_mut(player);
        state.mana = (state.mana + amount).min(cap);
    }

    /// Gain mana crystals, up to the mana cap. `filled` crystals also add
    /// mana usable this turn, even at the cap. Returns whether any crystal
    /// was gained.
    pub fn gain_mana_crystals(&mut self, player: PlayerId, amount: i32, filled: bool) -> bool {
        let cap = self.config().max_mana;
        let state = self.player_mut(player);
        let before = state.max_mana;
        state.max_mana = (state.max_mana + amount).min(cap);
        if filled {
            state.mana = (state.mana + amount).min(cap);
        }
        state.max_mana > before
    }

    // === Board ===

    /// Summon a minion for `player` at `index` (end of board when `None`).
    ///
    /// Attaches the template's effects and raises `MinionSummoned`.
    /// Returns `None` when the board is full.
    pub fn summon(&mut self, card: &MinionCard, player: PlayerId, index: Option<usize>) -> Option<EntityId> {
        self.atomically(|state| state.place_minion(card, player, index))
    }

    fn place_minion(&mut self, card: &MinionCard, player: PlayerId, index: Option<usize>) -> Option<EntityId> {
        if !self.board_has_room(player) {
            debug!(%player, name = %card.meta.name, "board full, summon skipped");
            return None;
        }
        let (id, born) = self.alloc_minion_id();
        let index = index.unwrap_or_else(|| self.board_len(player));
        let minion = Minion::from_card(id, player, card.clone(), born);
        self.insert_minion(minion, index);
        debug!(%player, minion = %id, name = %card.meta.name, index, "minion summoned");

        for effect in &card.template.effects {
            self.attach_effect(id, effect.clone());
        }
        self.raise(
            EventName::MinionSummoned,
            EventPayload::new(player).with_subject(id),
        );
        Some(id)
    }

    /// Take a minion off the board without it dying.
    ///
    /// Its effects are detached and no deathrattles fire. Returns the minion
    /// and the board index it occupied.
    pub fn remove_from_board(&mut self, id: EntityId) -> Option<(Minion, usize)> {
        let removed = self.take_minion(id)?;
        self.detach_owned(id);
        debug!(minion = %id, index = removed.1, "minion removed from board");
        Some(removed)
    }

    // === Actions ===

    /// Apply an action to a target list as one atomic mutation.
    ///
    /// The target list is copied before the first mutation, so entities
    /// leaving or entering play mid-action never change who is affected.
    /// Deferred deaths are swept once the outermost mutation ends.
    pub fn apply_action(&mut self, action: &Action, ctx: &ActionContext, targets: &[EntityId]) {
        let snapshot: Targets = targets.iter().copied().collect();
        self.begin_mutation();
        action.apply(self, ctx, &snapshot);
        self.end_mutation();
        debug_assert!(
            self.in_mutation() || self.pending_delayed() == 0,
            "delayed queue not drained after outermost action: {} pending",
            self.pending_delayed()
        );
    }
}
