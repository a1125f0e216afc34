//! Uniformly random agent.

use crate::cards::ChoiceCard;
use crate::core::{EntityId, GameRng, GameState, PlayerId};

use super::Agent;

/// Picks uniformly at random from whatever it is offered.
///
/// Deterministic for a given seed.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    /// Draw from an existing stream.
    #[must_use]
    pub fn from_rng(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl Agent for RandomAgent {
    fn choose_option(&mut self, _state: &GameState, _player: PlayerId, options: &[ChoiceCard]) -> usize {
        self.rng.choose_index(options.len()).unwrap_or(0)
    }

    fn choose_target(&mut self, _state: &GameState, player: PlayerId, targets: &[EntityId]) -> EntityId {
        self.rng
            .choose_index(targets.len())
            .map_or(EntityId::player(player), |index| targets[index])
    }

    /// Ends the turn with the same probability as playing any one card.
    fn choose_card(&mut self, _state: &GameState, _player: PlayerId, playable: &[usize]) -> Option<usize> {
        let pick = self.rng.choose_index(playable.len() + 1)?;
        playable.get(pick).copied()
    }
}
