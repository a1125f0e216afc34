//! The game loop.
//!
//! `Game` owns the state and one agent per player, and drives turns:
//!
//! - `start_turn`: gain a crystal, pay overload, draw, `TurnStarted`
//! - `play_card`: validate, choose a target, pay, resolve
//! - `end_turn`: `TurnEnded`, expire temporary attack, pass the turn
//!
//! Every step runs as one atomic mutation. Deaths it causes are swept when
//! the step ends, and the delayed queue must be empty afterwards.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::agents::Agent;
use crate::cards::{Card, PlayContext};
use crate::core::{GameConfig, GameState, PlayerId, PlayerMap};
use crate::effects::find_targets;
use crate::error::{EngineError, Result};
use crate::triggers::{EventName, EventPayload};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Draw (no winner).
    Draw,
    /// Multiple winners (shared victory).
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }
}

/// A game in progress.
pub struct Game {
    pub state: GameState,
    agents: PlayerMap<Box<dyn Agent>>,
}

impl Game {
    /// Set up a game: fill and shuffle each deck, deal opening hands and
    /// start the first player's turn.
    ///
    /// Panics unless there is exactly one deck and one agent per player.
    pub fn new(config: GameConfig, decks: Vec<Vec<Box<dyn Card>>>, agents: Vec<Box<dyn Agent>>) -> Self {
        let player_count = config.player_count;
        assert_eq!(decks.len(), player_count, "one deck per player required");
        assert_eq!(agents.len(), player_count, "one agent per player required");

        let opening = config.starting_hand_size;
        let mut state = GameState::new(config);
        for (player, deck) in PlayerId::all(player_count).zip(decks) {
            for card in deck {
                state.add_to_deck(player, card);
            }
            state.shuffle_deck(player);
        }
        state.atomically(|state| {
            for player in PlayerId::all(player_count) {
                for _ in 0..opening {
                    state.draw(player);
                }
            }
        });

        let mut game = Self {
            state,
            agents: PlayerMap::from_vec(agents),
        };
        game.start_turn();
        game
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.state.active_player
    }

    // === Turn structure ===

    /// Begin the active player's turn.
    pub fn start_turn(&mut self) {
        let player = self.state.active_player;
        self.state.turn_number += 1;
        info!(turn = self.state.turn_number, %player, "turn started");

        self.state.begin_mutation();
        self.state.gain_mana_crystals(player, 1, false);
        let state = self.state.player_mut(player);
        state.overload_locked = state.overload_owed;
        state.overload_owed = 0;
        state.mana = (state.max_mana - state.overload_locked).max(0);
        self.state.draw(player);
        self.state
            .raise(EventName::TurnStarted, EventPayload::for_player(player));
        self.state.end_mutation();

        self.assert_settled("start_turn");
    }

    /// End the active player's turn and start the next living player's.
    pub fn end_turn(&mut self) -> Result<()> {
        if self.is_terminal().is_some() {
            return Err(EngineError::GameOver);
        }
        let player = self.state.active_player;

        self.state.begin_mutation();
        self.state
            .raise(EventName::TurnEnded, EventPayload::for_player(player));
        self.state.reset_temp_attack(player);
        self.state.end_mutation();
        self.assert_settled("end_turn");
        info!(turn = self.state.turn_number, %player, "turn ended");

        if let Some(result) = self.is_terminal() {
            info!(?result, "game over");
            return Ok(());
        }
        self.state.active_player = self.next_living(player);
        self.start_turn();
        Ok(())
    }

    fn next_living(&self, player: PlayerId) -> PlayerId {
        let count = self.state.player_count();
        player
            .seat_order(count)
            .skip(1)
            .find(|&p| !self.state.hero(p).dead)
            .unwrap_or(player)
    }

    // === Playing cards ===

    /// Hand indices the active player can play right now.
    #[must_use]
    pub fn playable(&self) -> Vec<usize> {
        let player = self.state.active_player;
        let state = self.state.player(player);
        state
            .hand()
            .iter()
            .enumerate()
            .filter(|(_, card)| {
                !card.is_choice() && card.meta().cost <= state.mana && card.can_use(&self.state, player)
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// Play the card at `index` of the active player's hand.
    ///
    /// Every legality check happens before the first mutation, so a
    /// rejected play leaves the state untouched. Errors raised by the card
    /// itself (an agent answering out of range) come after the card and its
    /// cost are spent.
    pub fn play_card(&mut self, index: usize) -> Result<()> {
        if self.is_terminal().is_some() {
            return Err(EngineError::GameOver);
        }
        let player = self.state.active_player;

        let (rule, cost) = {
            let mana = self.state.player(player).mana;
            let card = self
                .state
                .player(player)
                .hand()
                .get(index)
                .ok_or(EngineError::NoSuchCard(index))?;
            let name = &card.meta().name;
            if card.is_choice() {
                return Err(EngineError::IllegalPlay(format!("{name} is a choice option")));
            }
            if card.meta().cost > mana {
                return Err(EngineError::IllegalPlay(format!(
                    "{name} costs {} but only {mana} mana is available",
                    card.meta().cost
                )));
            }
            if !card.can_use(&self.state, player) {
                return Err(EngineError::IllegalPlay(format!("{name} cannot be played now")));
            }
            (card.target_rule(), card.meta().cost)
        };

        let agent = self.agents[player].as_mut();
        let target = match rule {
            Some(rule) => {
                let offered = find_targets(&self.state, &rule, player);
                let chosen = agent.choose_target(&self.state, player, &offered);
                if !offered.contains(&chosen) {
                    return Err(EngineError::TargetNotOffered(chosen));
                }
                Some(chosen)
            }
            None => None,
        };

        let card = self
            .state
            .take_from_hand(player, index)
            .ok_or(EngineError::NoSuchCard(index))?;
        self.state.player_mut(player).mana -= cost;
        let meta = card.meta().clone();
        info!(%player, card = %meta.name, cost, target = ?target, "card played");

        self.state.begin_mutation();
        let payload = EventPayload::for_player(player).with_amount(cost);
        self.state.raise(EventName::CardPlayed, payload);
        if meta.is_spell() {
            self.state.raise(EventName::SpellCast, payload);
        }

        let mut ctx = PlayContext::new(&mut self.state, agent, player);
        ctx.target = target;
        let result = card.play(&mut ctx);

        if meta.overload > 0 {
            self.state.player_mut(player).overload_owed += meta.overload;
            debug!(%player, overload = meta.overload, "overloaded");
            self.state.raise(
                EventName::Overloaded,
                EventPayload::for_player(player).with_amount(meta.overload),
            );
        }
        self.state.end_mutation();

        self.assert_settled("play_card");
        result
    }

    /// Let the active player's agent play cards until it passes, then end
    /// the turn.
    pub fn play_turn(&mut self) -> Result<()> {
        let player = self.state.active_player;
        while self.is_terminal().is_none() {
            let playable = self.playable();
            let choice = self.agents[player].choose_card(&self.state, player, &playable);
            match choice {
                Some(index) => self.play_card(index)?,
                None => break,
            }
        }
        if self.is_terminal().is_some() {
            return Ok(());
        }
        self.end_turn()
    }

    /// Play up to `max_turns` turns. Returns the result if the game ended.
    pub fn run(&mut self, max_turns: u32) -> Result<Option<GameResult>> {
        for _ in 0..max_turns {
            if let Some(result) = self.is_terminal() {
                return Ok(Some(result));
            }
            self.play_turn()?;
        }
        Ok(self.is_terminal())
    }

    // === Outcome ===

    /// The result, once at most one hero is left standing.
    #[must_use]
    pub fn is_terminal(&self) -> Option<GameResult> {
        let living: Vec<PlayerId> = self
            .state
            .player_ids()
            .filter(|&p| !self.state.hero(p).dead)
            .collect();
        match living.as_slice() {
            [] => Some(GameResult::Draw),
            [winner] if self.state.player_count() > 1 => Some(GameResult::Winner(*winner)),
            _ => None,
        }
    }

    fn assert_settled(&self, step: &str) {
        assert!(
            self.state.pending_delayed() == 0,
            "delayed queue not empty after {step}: {} task(s) pending",
            self.state.pending_delayed()
        );
        assert!(!self.state.in_mutation(), "mutation still open after {step}");
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("agents", &self.agents.player_count())
            .finish()
    }
}
