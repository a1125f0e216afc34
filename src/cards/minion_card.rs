//! Minion cards.
//!
//! A `MinionCard` is plain data: metadata plus the template every minion
//! summoned from it starts from. Summoning the same card twice yields two
//! independent minions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{GameState, MinionType, PlayerId};
use crate::effects::{Deathrattle, Effect};
use crate::error::{EngineError, Result};
use crate::triggers::{EventName, EventPayload};

use super::card::{Card, PlayContext};
use super::definition::{CardMeta, CharacterClass, Rarity};

/// Starting stats and abilities of a minion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinionTemplate {
    pub attack: i32,
    pub health: i32,
    pub taunt: bool,
    pub charge: bool,
    pub minion_type: MinionType,

    /// Attached to the minion when it enters play.
    pub effects: Vec<Effect>,

    /// Copied onto the minion when it enters play.
    pub deathrattles: Vec<Deathrattle>,
}

/// A card that summons a minion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinionCard {
    pub meta: CardMeta,
    pub template: MinionTemplate,
}

impl MinionCard {
    /// A neutral common minion with no abilities.
    #[must_use]
    pub fn new(name: impl Into<String>, cost: i32, attack: i32, health: i32) -> Self {
        Self {
            meta: CardMeta::minion(name, cost, CharacterClass::Neutral, Rarity::Common),
            template: MinionTemplate {
                attack,
                health,
                ..MinionTemplate::default()
            },
        }
    }

    #[must_use]
    pub fn with_class(mut self, class: CharacterClass) -> Self {
        self.meta.class = class;
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.meta.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_taunt(mut self) -> Self {
        self.template.taunt = true;
        self
    }

    #[must_use]
    pub fn with_charge(mut self) -> Self {
        self.template.charge = true;
        self
    }

    #[must_use]
    pub fn with_type(mut self, minion_type: MinionType) -> Self {
        self.template.minion_type = minion_type;
        self
    }

    /// Add an effect attached on summon.
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.template.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_deathrattle(mut self, deathrattle: Deathrattle) -> Self {
        self.template.deathrattles.push(deathrattle);
        self
    }
}

impl Card for MinionCard {
    fn meta(&self) -> &CardMeta {
        &self.meta
    }

    fn can_use(&self, state: &GameState, player: PlayerId) -> bool {
        state.board_has_room(player)
    }

    fn play(&self, ctx: &mut PlayContext<'_>) -> Result<()> {
        let id = ctx
            .state
            .summon(self, ctx.player, None)
            .ok_or_else(|| EngineError::IllegalPlay(format!("no room on the board for {}", self.meta.name)))?;
        debug!(player = %ctx.player, minion = %id, "minion placed");
        ctx.state.raise(
            EventName::MinionPlaced,
            EventPayload::new(ctx.player).with_subject(id),
        );
        Ok(())
    }
}
