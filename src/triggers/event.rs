//! Game events.
//!
//! An `EventName` names something that happened. An `Event` is what an
//! effect listens for: a name, the scope it cares about relative to the
//! effect's owner, and an optional condition. `Event::Either` listens for
//! two events at once and fires its effect at most once per raise.
//!
//! ## Scopes
//!
//! Scopes are evaluated relative to the player controlling the entity the
//! effect is attached to:
//!
//! - `Owner`: the event is about the owning entity itself
//! - `FriendlyPlayer`: the event's player is the owner's controller
//! - `EnemyPlayer`: the event's player is anyone else
//! - `AnyPlayer`: every occurrence

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, GameState, PlayerId};

use super::condition::Condition;

/// The events the engine raises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventName {
    /// A character dealt damage (subject: source, other: target).
    DidDamage,
    /// A spell card was cast (subject: caster's player entity).
    SpellCast,
    /// Any card was played from hand.
    CardPlayed,
    TurnEnded,
    TurnStarted,
    /// A minion was swept off the board after dying.
    MinionDied,
    /// A minion was played from hand.
    MinionPlaced,
    /// A minion entered the board by any means.
    MinionSummoned,
    /// A minion took damage (subject: minion, other: source).
    MinionDamaged,
    /// A card with overload was played.
    Overloaded,
}

impl EventName {
    /// Every event name, in declaration order.
    pub const ALL: [EventName; 10] = [
        Self::DidDamage,
        Self::SpellCast,
        Self::CardPlayed,
        Self::TurnEnded,
        Self::TurnStarted,
        Self::MinionDied,
        Self::MinionPlaced,
        Self::MinionSummoned,
        Self::MinionDamaged,
        Self::Overloaded,
    ];

    /// Wire name used in key-value form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DidDamage => "did_damage",
            Self::SpellCast => "spell_cast",
            Self::CardPlayed => "card_played",
            Self::TurnEnded => "turn_ended",
            Self::TurnStarted => "turn_started",
            Self::MinionDied => "minion_died",
            Self::MinionPlaced => "minion_placed",
            Self::MinionSummoned => "minion_summoned",
            Self::MinionDamaged => "minion_damaged",
            Self::Overloaded => "overloaded",
        }
    }

    /// Parse a wire name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.as_str() == name)
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whose events an effect listens to, relative to its owner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventScope {
    Owner,
    #[default]
    FriendlyPlayer,
    EnemyPlayer,
    AnyPlayer,
}

impl EventScope {
    /// Whether an event with `payload` is in scope for an effect owned by
    /// `owner` (controlled by `controller`).
    #[must_use]
    pub fn matches(self, owner: EntityId, controller: PlayerId, payload: &EventPayload) -> bool {
        match self {
            Self::Owner => payload.subject == Some(owner),
            Self::FriendlyPlayer => payload.player == controller,
            Self::EnemyPlayer => payload.player != controller,
            Self::AnyPlayer => true,
        }
    }
}

/// Data carried by a raised event.
///
/// `player` is the player the event is about; raising starts its walk at
/// that player's seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    pub player: PlayerId,
    pub subject: Option<EntityId>,
    pub other: Option<EntityId>,
    pub amount: i32,
}

impl EventPayload {
    /// Payload about `player` with no entities attached.
    #[must_use]
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            subject: None,
            other: None,
            amount: 0,
        }
    }

    /// Payload whose subject is the player's own entity (turn and card events).
    #[must_use]
    pub fn for_player(player: PlayerId) -> Self {
        Self::new(player).with_subject(EntityId::player(player))
    }

    #[must_use]
    pub fn with_subject(mut self, subject: EntityId) -> Self {
        self.subject = Some(subject);
        self
    }

    #[must_use]
    pub fn with_other(mut self, other: EntityId) -> Self {
        self.other = Some(other);
        self
    }

    #[must_use]
    pub fn with_amount(mut self, amount: i32) -> Self {
        self.amount = amount;
        self
    }
}

/// What an effect listens for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A single named event.
    On {
        name: EventName,
        scope: EventScope,
        condition: Option<Condition>,
    },
    /// Either of two events. Each arm binds with its own scope; `scope` is
    /// kept for the key-value form.
    Either {
        first: Box<Event>,
        second: Box<Event>,
        scope: EventScope,
    },
}

impl Event {
    /// Listen for `name` with the default (friendly player) scope.
    #[must_use]
    pub fn on(name: EventName) -> Self {
        Self::On {
            name,
            scope: EventScope::default(),
            condition: None,
        }
    }

    /// Damage dealt by the owning entity.
    #[must_use]
    pub fn did_damage() -> Self {
        Self::on(EventName::DidDamage).with_scope(EventScope::Owner)
    }

    #[must_use]
    pub fn spell_cast() -> Self {
        Self::on(EventName::SpellCast)
    }

    #[must_use]
    pub fn card_played() -> Self {
        Self::on(EventName::CardPlayed)
    }

    #[must_use]
    pub fn turn_ended() -> Self {
        Self::on(EventName::TurnEnded)
    }

    #[must_use]
    pub fn turn_started() -> Self {
        Self::on(EventName::TurnStarted)
    }

    #[must_use]
    pub fn minion_died() -> Self {
        Self::on(EventName::MinionDied)
    }

    #[must_use]
    pub fn minion_placed() -> Self {
        Self::on(EventName::MinionPlaced)
    }

    #[must_use]
    pub fn minion_summoned() -> Self {
        Self::on(EventName::MinionSummoned)
    }

    #[must_use]
    pub fn minion_damaged() -> Self {
        Self::on(EventName::MinionDamaged)
    }

    #[must_use]
    pub fn overloaded() -> Self {
        Self::on(EventName::Overloaded)
    }

    /// Listen for either of two events.
    #[must_use]
    pub fn either(first: Event, second: Event) -> Self {
        Self::Either {
            first: Box::new(first),
            second: Box::new(second),
            scope: EventScope::default(),
        }
    }

    /// Set the scope (builder pattern).
    #[must_use]
    pub fn with_scope(mut self, new_scope: EventScope) -> Self {
        match &mut self {
            Self::On { scope, .. } | Self::Either { scope, .. } => *scope = new_scope,
        }
        self
    }

    /// Set the condition (builder pattern). On `Either` it is set on every
    /// arm, replacing their own conditions.
    #[must_use]
    pub fn with_condition(self, new_condition: Condition) -> Self {
        match self {
            Self::On { name, scope, .. } => Self::On {
                name,
                scope,
                condition: Some(new_condition),
            },
            Self::Either { first, second, scope } => Self::Either {
                first: Box::new(first.with_condition(new_condition.clone())),
                second: Box::new(second.with_condition(new_condition)),
                scope,
            },
        }
    }

    /// The scope recorded on this event.
    #[must_use]
    pub fn scope(&self) -> EventScope {
        match self {
            Self::On { scope, .. } | Self::Either { scope, .. } => *scope,
        }
    }

    /// The single-event arms this event binds, depth first.
    #[must_use]
    pub fn arms(&self) -> Vec<(EventName, EventScope)> {
        let mut arms = Vec::new();
        self.collect_arms(&mut arms);
        arms
    }

    fn collect_arms(&self, arms: &mut Vec<(EventName, EventScope)>) {
        match self {
            Self::On { name, scope, .. } => arms.push((*name, *scope)),
            Self::Either { first, second, .. } => {
                first.collect_arms(arms);
                second.collect_arms(arms);
            }
        }
    }

    /// Whether a raised event satisfies any arm: name, scope and condition.
    #[must_use]
    pub fn accepts(
        &self,
        state: &GameState,
        raised: EventName,
        owner: EntityId,
        controller: PlayerId,
        payload: &EventPayload,
    ) -> bool {
        match self {
            Self::On { name, scope, condition } => {
                *name == raised
                    && scope.matches(owner, controller, payload)
                    && condition
                        .as_ref()
                        .map_or(true, |c| c.evaluate(state, owner, payload))
            }
            Self::Either { first, second, .. } => {
                first.accepts(state, raised, owner, controller, payload)
                    || second.accepts(state, raised, owner, controller, payload)
            }
        }
    }
}
