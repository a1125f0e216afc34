//! Actions: parameterized effect bodies applied to resolved targets.
//!
//! Actions mutate only through the `GameState` mutation interface. Amounts
//! are final; spell damage and healing bonuses are applied by whoever builds
//! the action (see `PlayerState::effective_spell_damage`). Deaths an action
//! causes are deferred, never processed inline.

use serde::{Deserialize, Serialize};

use crate::cards::MinionCard;
use crate::core::{EntityId, EntityKind, GameState, PlayerId};

use super::effect::{Deathrattle, Effect};

/// Context an action runs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionContext {
    /// Source of damage and healing; owner of the firing effect.
    pub owner: EntityId,
    /// The player acting through `owner`.
    pub controller: PlayerId,
    /// Board index the owner occupied, if it just left play.
    pub owner_index: Option<usize>,
}

impl ActionContext {
    #[must_use]
    pub fn new(owner: EntityId, controller: PlayerId) -> Self {
        Self {
            owner,
            controller,
            owner_index: None,
        }
    }
}

/// Where a summoned minion lands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SummonPosition {
    /// Rightmost slot.
    #[default]
    End,
    /// A fixed slot, clamped to the board length.
    At(usize),
    /// Right of the owner, or the slot it occupied if it just died.
    OwnerSlot,
}

/// An effect body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Summon a copy of `card` for each targeted player.
    Summon {
        card: Box<MinionCard>,
        position: SummonPosition,
    },
    /// Destroy regardless of health.
    Kill,
    Damage { amount: i32 },
    Heal { amount: i32 },
    ChangeAttack { amount: i32 },
    IncreaseHealth { amount: i32 },
    ChangeTempAttack { amount: i32 },
    IncreaseArmor { amount: i32 },
    GiveTaunt,
    /// Each targeted player draws `count` cards.
    Draw { count: u32 },
    /// Each targeted player gains mana this turn.
    GainMana { amount: i32 },
    /// Each targeted player gains mana crystals.
    GainManaCrystals { amount: i32, filled: bool },
    AddDeathrattle(Box<Deathrattle>),
    AttachEffect(Box<Effect>),
    /// Apply each action to the same targets, in order.
    Batch(Vec<Action>),
}

impl Action {
    /// Summon at the end of the board.
    #[must_use]
    pub fn summon(card: MinionCard) -> Self {
        Self::Summon {
            card: Box::new(card),
            position: SummonPosition::End,
        }
    }

    /// Give +attack/+health.
    #[must_use]
    pub fn buff(attack: i32, health: i32) -> Self {
        Self::Batch(vec![
            Self::ChangeAttack { amount: attack },
            Self::IncreaseHealth { amount: health },
        ])
    }

    #[must_use]
    pub fn add_deathrattle(deathrattle: Deathrattle) -> Self {
        Self::AddDeathrattle(Box::new(deathrattle))
    }

    #[must_use]
    pub fn attach_effect(effect: Effect) -> Self {
        Self::AttachEffect(Box::new(effect))
    }

    /// Apply to each target in order.
    ///
    /// Callers outside the engine should go through
    /// [`GameState::apply_action`], which snapshots targets and drains
    /// deferred deaths.
    pub fn apply(&self, state: &mut GameState, ctx: &ActionContext, targets: &[EntityId]) {
        if let Self::Batch(actions) = self {
            for action in actions {
                action.apply(state, ctx, targets);
            }
            return;
        }
        for &target in targets {
            self.apply_to(state, ctx, target);
        }
    }

    fn apply_to(&self, state: &mut GameState, ctx: &ActionContext, target: EntityId) {
        match self {
            Self::Summon { card, position } => {
                let Some(player) = state.controller_of(target) else {
                    return;
                };
                let index = Self::summon_index(state, ctx, *position, player);
                state.summon(card, player, index);
            }
            Self::Kill => state.kill(target),
            Self::Damage { amount } => {
                state.damage(ctx.owner, target, *amount);
            }
            Self::Heal { amount } => {
                state.heal(ctx.owner, target, *amount);
            }
            Self::ChangeAttack { amount } => state.change_attack(target, *amount),
            Self::IncreaseHealth { amount } => state.increase_health(target, *amount),
            Self::ChangeTempAttack { amount } => state.change_temp_attack(target, *amount),
            Self::IncreaseArmor { amount } => state.increase_armor(target, *amount),
            Self::GiveTaunt => state.give_taunt(target),
            Self::Draw { count } => {
                if let Some(player) = state.controller_of(target) {
                    for _ in 0..*count {
                        state.draw(player);
                    }
                }
            }
            Self::GainMana { amount } => {
                if let Some(player) = state.controller_of(target) {
                    state.gain_mana(player, *amount);
                }
            }
            Self::GainManaCrystals { amount, filled } => {
                if let Some(player) = state.controller_of(target) {
                    state.gain_mana_crystals(player, *amount, *filled);
                }
            }
            Self::AddDeathrattle(deathrattle) => state.add_deathrattle(target, (**deathrattle).clone()),
            Self::AttachEffect(effect) => {
                state.attach_effect(target, (**effect).clone());
            }
            Self::Batch(actions) => {
                for action in actions {
                    action.apply_to(state, ctx, target);
                }
            }
        }
    }

    fn summon_index(
        state: &GameState,
        ctx: &ActionContext,
        position: SummonPosition,
        player: PlayerId,
    ) -> Option<usize> {
        match position {
            SummonPosition::End => None,
            SummonPosition::At(index) => Some(index),
            SummonPosition::OwnerSlot => match state.kind_of(ctx.owner) {
                Some(EntityKind::Minion) => state
                    .player(player)
                    .position_of(ctx.owner)
                    .map(|index| index + 1),
                _ => ctx.owner_index,
            },
        }
    }
}
