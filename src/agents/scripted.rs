//! Agents with fixed behavior, for tests and deterministic replays.

use std::collections::VecDeque;

use crate::cards::ChoiceCard;
use crate::core::{EntityId, GameState, PlayerId};

use super::Agent;

/// Answers from pre-recorded queues.
///
/// Once a queue runs dry the agent falls back to the first option or
/// target, and ends the turn instead of playing cards.
#[derive(Clone, Debug, Default)]
pub struct ScriptedAgent {
    options: VecDeque<usize>,
    targets: VecDeque<EntityId>,
    cards: VecDeque<usize>,
    options_asked: usize,
    targets_asked: usize,
}

impl ScriptedAgent {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue option indices to answer with.
    #[must_use]
    pub fn with_options(mut self, options: impl IntoIterator<Item = usize>) -> Self {
        self.options.extend(options);
        self
    }

    /// Queue targets to answer with.
    #[must_use]
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = EntityId>) -> Self {
        self.targets.extend(targets);
        self
    }

    /// Queue hand indices to play.
    #[must_use]
    pub fn with_cards(mut self, cards: impl IntoIterator<Item = usize>) -> Self {
        self.cards.extend(cards);
        self
    }

    /// How many times an option was asked for.
    #[must_use]
    pub fn options_asked(&self) -> usize {
        self.options_asked
    }

    /// How many times a target was asked for.
    #[must_use]
    pub fn targets_asked(&self) -> usize {
        self.targets_asked
    }

    /// Whether every recorded answer has been used.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.options.is_empty() && self.targets.is_empty() && self.cards.is_empty()
    }
}

impl Agent for ScriptedAgent {
    fn choose_option(&mut self, _state: &GameState, _player: PlayerId, _options: &[ChoiceCard]) -> usize {
        self.options_asked += 1;
        self.options.pop_front().unwrap_or(0)
    }

    fn choose_target(&mut self, _state: &GameState, player: PlayerId, targets: &[EntityId]) -> EntityId {
        self.targets_asked += 1;
        self.targets
            .pop_front()
            .or_else(|| targets.first().copied())
            .unwrap_or(EntityId::player(player))
    }

    fn choose_card(&mut self, _state: &GameState, _player: PlayerId, _playable: &[usize]) -> Option<usize> {
        self.cards.pop_front()
    }
}

/// Always takes the first option, the first target and the first playable
/// card.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstOptionAgent;

impl Agent for FirstOptionAgent {
    fn choose_option(&mut self, _state: &GameState, _player: PlayerId, _options: &[ChoiceCard]) -> usize {
        0
    }

    fn choose_target(&mut self, _state: &GameState, player: PlayerId, targets: &[EntityId]) -> EntityId {
        targets.first().copied().unwrap_or(EntityId::player(player))
    }

    fn choose_card(&mut self, _state: &GameState, _player: PlayerId, playable: &[usize]) -> Option<usize> {
        playable.first().copied()
    }
}
