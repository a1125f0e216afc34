//! Game rules: the turn loop and win conditions.
//!
//! The loop never interprets cards itself. It checks cost and `can_use`,
//! asks the agent for a target, and hands everything else to `Card::play`.

pub mod engine;

pub use engine::{Game, GameResult};
