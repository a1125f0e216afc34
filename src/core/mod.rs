//! Core engine types: entities, players, characters, state, RNG, configuration.
//!
//! `GameState` owns everything in play. Stats change only through the
//! mutation interface in `mutation`, which raises events and defers deaths.

pub mod entity;
pub mod player;
pub mod character;
pub mod rng;
pub mod config;
pub mod state;
pub mod mutation;

pub use entity::{EntityId, EntityKind};
pub use player::{PlayerId, PlayerMap, PlayerState};
pub use character::{Hero, Minion, MinionType};
pub use rng::GameRng;
pub use config::GameConfig;
pub use state::GameState;
