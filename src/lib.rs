//! # card-engine
//!
//! Event, effect and targeting framework for a turn-based collectible card
//! game.
//!
//! ## Design Principles
//!
//! 1. **Composition over code**: card abilities are built from a few
//!    primitives (`Selector`, `Action`, `Event`, `Condition`) and bound to
//!    entities as `Effect`s and `Deathrattle`s.
//!
//! 2. **Atomic mutations**: every state change runs inside a mutation
//!    scope. Deaths are deferred to the delayed queue and swept when the
//!    outermost scope ends, so no effect observes a half-resolved board.
//!
//! 3. **N-Player First**: every API takes `PlayerId`s and seat order; no
//!    convenience assumes two players.
//!
//! ## Architecture
//!
//! - **Lazy selectors**: targets resolve when an effect fires, never when
//!   it is bound, and resolve to nothing once their referent has left play.
//!
//! - **Persistent boards**: `im::Vector` boards make the snapshot taken
//!   before every bulk action O(1).
//!
//! - **Agents outside the state**: decisions go through the `Agent` trait,
//!   which only ever sees `&GameState`.
//!
//! ## Modules
//!
//! - `core`: entities, players, characters, state and its mutation interface
//! - `triggers`: events, conditions, the event bus and dispatch
//! - `effects`: selectors, actions, effects, card targeting
//! - `stack`: the delayed resolution queue and death sweep
//! - `cards`: the `Card` trait, card kinds, the druid set, the registry
//! - `agents`: decision makers
//! - `rules`: the game loop
//! - `replay`: key-value and binary forms of the effect graph

pub mod core;
pub mod error;
pub mod triggers;
pub mod effects;
pub mod stack;
pub mod cards;
pub mod agents;
pub mod rules;
pub mod replay;

// Re-export commonly used types
pub use crate::core::{
    EntityId, EntityKind, PlayerId, PlayerMap, PlayerState,
    Hero, Minion, MinionType,
    GameRng, GameConfig, GameState,
};

pub use crate::error::{EngineError, Result};

pub use crate::triggers::{Condition, Event, EventName, EventPayload, EventScope};

pub use crate::effects::{
    Action, ActionContext, Deathrattle, Effect, EffectId, Lifetime,
    Selector, SelectorContext, Side, SummonPosition, TargetRule,
    find_targets,
};

pub use crate::stack::{Deferred, DelayedQueue};

pub use crate::cards::{
    Card, CardMeta, CardRegistry, ChoiceCard, MinionCard, PlayContext, SpellCard,
    resolve_choice,
};

pub use crate::agents::{Agent, FirstOptionAgent, RandomAgent, ScriptedAgent};

pub use crate::rules::{Game, GameResult};

pub use crate::replay::{event_from_kv, event_to_kv, EffectGraph};
