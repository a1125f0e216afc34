//! Characters: the minions and heroes that can be damaged, healed and buffed.
//!
//! These structs hold raw stats only. All mutation goes through the
//! `GameState` mutation interface so that events are raised and deaths are
//! deferred consistently.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::player::PlayerId;
use crate::cards::MinionCard;
use crate::effects::Deathrattle;

/// Tribal type of a minion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MinionType {
    #[default]
    None,
    Beast,
    Murloc,
    Dragon,
    Totem,
    Pirate,
    Mech,
}

/// A minion on a player's board.
#[derive(Clone, Debug)]
pub struct Minion {
    /// Entity ID of this minion.
    pub id: EntityId,

    /// Player whose board holds this minion.
    pub owner: PlayerId,

    /// The card this minion was summoned from.
    pub card: MinionCard,

    /// Base attack including permanent buffs.
    pub attack: i32,

    /// Attack bonus that expires at end of turn.
    pub temp_attack: i32,

    /// Current health.
    pub health: i32,

    /// Maximum health including permanent buffs.
    pub max_health: i32,

    pub taunt: bool,
    pub charge: bool,
    pub minion_type: MinionType,

    /// Summon sequence number; orders simultaneous deaths.
    pub born: u64,

    /// Set once the minion has been destroyed but not yet swept off the board.
    pub dying: bool,

    /// Deathrattles in append order. Duplicates are kept.
    pub deathrattles: Vec<Deathrattle>,
}

impl Minion {
    /// Instantiate a card's template as a fresh minion.
    #[must_use]
    pub fn from_card(id: EntityId, owner: PlayerId, card: MinionCard, born: u64) -> Self {
        let template = &card.template;
        Self {
            id,
            owner,
            attack: template.attack,
            temp_attack: 0,
            health: template.health,
            max_health: template.health,
            taunt: template.taunt,
            charge: template.charge,
            minion_type: template.minion_type,
            born,
            dying: false,
            deathrattles: template.deathrattles.clone(),
            card,
        }
    }

    /// Attack after temporary bonuses, never negative.
    #[must_use]
    pub fn calculate_attack(&self) -> i32 {
        (self.attack + self.temp_attack).max(0)
    }

    /// Name of the card this minion came from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.card.meta.name
    }
}

/// A player's hero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    /// Entity ID of this hero.
    pub id: EntityId,

    /// The player this hero belongs to.
    pub owner: PlayerId,

    pub health: i32,
    pub max_health: i32,
    pub armor: i32,

    /// Permanent attack (weapons are out of scope, so usually 0).
    pub attack: i32,

    /// Attack that expires at end of turn (Claw, Bite, Savage Roar).
    pub temp_attack: i32,

    /// Set when health drops to zero or below.
    pub dead: bool,
}

impl Hero {
    /// Create a hero at full health.
    #[must_use]
    pub fn new(id: EntityId, owner: PlayerId, health: i32) -> Self {
        Self {
            id,
            owner,
            health,
            max_health: health,
            armor: 0,
            attack: 0,
            temp_attack: 0,
            dead: false,
        }
    }

    /// Attack after temporary bonuses, never negative.
    #[must_use]
    pub fn calculate_attack(&self) -> i32 {
        (self.attack + self.temp_attack).max(0)
    }
}
