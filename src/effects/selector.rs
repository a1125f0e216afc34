//! Selectors: lazy references to the entities an action should touch.
//!
//! A selector is resolved at the moment its effect fires, never when it is
//! bound. Resolution is deterministic and side-effect free, and it yields
//! an empty list rather than failing when the referenced entity has left
//! play.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{EntityId, GameState, PlayerId};
use crate::triggers::EventPayload;

use super::action::ActionContext;

/// Resolved targets. Most selectors produce one or two entities.
pub type Targets = SmallVec<[EntityId; 4]>;

/// Which side of the table, relative to the acting player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Friendly,
    Enemy,
    Both,
}

impl Side {
    /// The players on this side, in seat order starting from `controller`.
    pub fn players(self, controller: PlayerId, player_count: usize) -> impl Iterator<Item = PlayerId> {
        controller
            .seat_order(player_count)
            .filter(move |p| match self {
                Side::Friendly => *p == controller,
                Side::Enemy => *p != controller,
                Side::Both => true,
            })
    }
}

/// Context a selector resolves against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectorContext {
    /// The entity the effect is attached to (or the caster for card plays).
    pub owner: EntityId,
    /// The player acting through `owner`.
    pub controller: PlayerId,
    /// The raised event, when resolving for a triggered effect.
    pub payload: Option<EventPayload>,
    /// Board index the owner occupied, for owners that just left play.
    pub owner_index: Option<usize>,
}

impl SelectorContext {
    #[must_use]
    pub fn new(owner: EntityId, controller: PlayerId) -> Self {
        Self {
            owner,
            controller,
            payload: None,
            owner_index: None,
        }
    }

    #[must_use]
    pub fn with_payload(mut self, payload: EventPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    #[must_use]
    pub fn with_owner_index(mut self, index: usize) -> Self {
        self.owner_index = Some(index);
        self
    }

    /// Context for the action applied to the resolved targets.
    #[must_use]
    pub fn action_context(&self) -> ActionContext {
        ActionContext {
            owner: self.owner,
            controller: self.controller,
            owner_index: self.owner_index,
        }
    }
}

/// A lazy target reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// The entity the effect is attached to.
    Owner,
    /// The player controlling the owner, while the owner is in play.
    OwnerPlayer,
    /// The acting player, even after the owner left play.
    FriendlyPlayer,
    /// Every other player.
    EnemyPlayer,
    /// The player whose turn it is.
    CurrentPlayer,
    FriendlyHero,
    EnemyHero,
    /// Minions in board order.
    PlayerMinions(Side),
    /// The hero followed by minions in board order, per player.
    Characters(Side),
    /// The minion at `index` on each player's board on `side`.
    BoardPosition { side: Side, index: usize },
    /// The raised event's subject.
    EventSubject,
    /// The raised event's other entity.
    EventOther,
}

impl Selector {
    /// Resolve to the entities currently referenced.
    #[must_use]
    pub fn resolve(&self, state: &GameState, ctx: &SelectorContext) -> Targets {
        let player_count = state.player_count();
        let mut targets = Targets::new();

        match self {
            Self::Owner => {
                if state.is_in_play(ctx.owner) {
                    targets.push(ctx.owner);
                }
            }
            Self::OwnerPlayer => {
                if let Some(player) = state.controller_of(ctx.owner) {
                    targets.push(EntityId::player(player));
                }
            }
            Self::FriendlyPlayer => targets.push(EntityId::player(ctx.controller)),
            Self::EnemyPlayer => targets.extend(
                Side::Enemy
                    .players(ctx.controller, player_count)
                    .map(EntityId::player),
            ),
            Self::CurrentPlayer => targets.push(EntityId::player(state.active_player)),
            Self::FriendlyHero => targets.push(state.hero(ctx.controller).id),
            Self::EnemyHero => targets.extend(
                Side::Enemy
                    .players(ctx.controller, player_count)
                    .map(|p| state.hero(p).id),
            ),
            Self::PlayerMinions(side) => {
                for player in side.players(ctx.controller, player_count) {
                    targets.extend(state.player(player).board().iter().copied());
                }
            }
            Self::Characters(side) => {
                for player in side.players(ctx.controller, player_count) {
                    targets.push(state.hero(player).id);
                    targets.extend(state.player(player).board().iter().copied());
                }
            }
            Self::BoardPosition { side, index } => {
                for player in side.players(ctx.controller, player_count) {
                    if let Some(minion) = state.player(player).board().get(*index) {
                        targets.push(*minion);
                    }
                }
            }
            Self::EventSubject => {
                if let Some(subject) = ctx.payload.and_then(|p| p.subject) {
                    if state.is_in_play(subject) {
                        targets.push(subject);
                    }
                }
            }
            Self::EventOther => {
                if let Some(other) = ctx.payload.and_then(|p| p.other) {
                    if state.is_in_play(other) {
                        targets.push(other);
                    }
                }
            }
        }

        trace!(selector = ?self, owner = %ctx.owner, resolved = targets.len(), "selector resolved");
        targets
    }
}
