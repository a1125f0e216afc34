//! Decision makers.
//!
//! Every choice a player makes mid-resolution (which option of a choice
//! card, which target) goes through an `Agent`. Agents see the state
//! read-only, so they cannot mutate the game they are deciding for.
//!
//! ## Shipped agents
//!
//! - `RandomAgent`: uniform choices from a seeded `GameRng`
//! - `ScriptedAgent`: pre-recorded answers, for tests and replays
//! - `FirstOptionAgent`: always the first option and target

pub mod random;
pub mod scripted;

pub use random::RandomAgent;
pub use scripted::{FirstOptionAgent, ScriptedAgent};

use crate::cards::ChoiceCard;
use crate::core::{EntityId, GameState, PlayerId};

/// A player's decision maker.
///
/// `options` and `targets` are never empty when the engine asks. Answers
/// are validated; an out-of-range option or an unoffered target rejects
/// the play.
pub trait Agent {
    /// Pick one of the offered options by index.
    fn choose_option(&mut self, state: &GameState, player: PlayerId, options: &[ChoiceCard]) -> usize;

    /// Pick one of the offered targets.
    fn choose_target(&mut self, state: &GameState, player: PlayerId, targets: &[EntityId]) -> EntityId;

    /// Pick a hand index to play from `playable`, or `None` to end the turn.
    fn choose_card(&mut self, _state: &GameState, _player: PlayerId, _playable: &[usize]) -> Option<usize> {
        None
    }
}
