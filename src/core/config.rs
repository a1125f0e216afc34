//! Game configuration.
//!
//! `GameConfig` holds the table rules a game is created with: seat count,
//! hero health, board and hand limits, mana cap, opening hand and the RNG
//! seed. Games build one with `GameConfig::default()` and the `with_*`
//! builders; nothing in the engine hardcodes these numbers.

use serde::{Deserialize, Serialize};

/// Table rules for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats (default: 2).
    pub player_count: usize,

    /// Hero health at game start (default: 30).
    pub starting_health: i32,

    /// Minions a single board can hold (default: 7).
    /// Summons onto a full board do nothing.
    pub max_board_size: usize,

    /// Cards a hand can hold (default: 10).
    /// Cards drawn into a full hand are burned.
    pub max_hand_size: usize,

    /// Mana crystal cap (default: 10).
    pub max_mana: i32,

    /// Cards drawn by each player before the first turn (default: 3).
    pub starting_hand_size: usize,

    /// Seed for deck shuffling and random agents.
    /// Same seed produces identical games.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            starting_health: 30,
            max_board_size: 7,
            max_hand_size: 10,
            max_mana: 10,
            starting_hand_size: 3,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Set the number of seats.
    #[must_use]
    pub fn with_players(mut self, player_count: usize) -> Self {
        assert!((1..=8).contains(&player_count), "Player count must be 1-8");
        self.player_count = player_count;
        self
    }

    /// Set hero starting health.
    #[must_use]
    pub fn with_starting_health(mut self, health: i32) -> Self {
        self.starting_health = health;
        self
    }

    /// Set the board size limit.
    #[must_use]
    pub fn with_max_board_size(mut self, size: usize) -> Self {
        self.max_board_size = size;
        self
    }

    /// Set the hand size limit.
    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    /// Set the mana crystal cap.
    #[must_use]
    pub fn with_max_mana(mut self, mana: i32) -> Self {
        self.max_mana = mana;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();

        assert_eq!(config.player_count, 2);
        assert_eq!(config.starting_health, 30);
        assert_eq!(config.max_board_size, 7);
        assert_eq!(config.max_hand_size, 10);
        assert_eq!(config.max_mana, 10);
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::default()
            .with_players(3)
            .with_starting_health(20)
            .with_max_board_size(5)
            .with_max_mana(6)
            .with_starting_hand_size(4)
            .with_seed(7);

        assert_eq!(config.player_count, 3);
        assert_eq!(config.starting_health, 20);
        assert_eq!(config.max_board_size, 5);
        assert_eq!(config.max_mana, 6);
        assert_eq!(config.starting_hand_size, 4);
        assert_eq!(config.seed, 7);
    }

    #[test]
    #[should_panic(expected = "Player count must be 1-8")]
    fn test_too_many_players() {
        let _ = GameConfig::default().with_players(9);
    }

    #[test]
    fn test_config_serialization() {
        let config = GameConfig::default().with_max_hand_size(8);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
