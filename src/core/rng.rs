//! Deterministic random number generation.
//!
//! Deck shuffles and random agents draw from a `GameRng` seeded by
//! `GameConfig::seed`, so a seed fully determines a game.
//!
//! ```
//! use card_engine::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.gen_range(0..100), b.gen_range(0..100));
//!
//! // One independent stream per seat.
//! let seats: Vec<GameRng> = (0..3).map(|_| a.fork()).collect();
//! assert_eq!(seats.len(), 3);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic ChaCha8-backed RNG.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Split off an independent RNG, e.g. one per agent.
    ///
    /// The n-th fork of a given seed is always the same.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(fork_seed)
    }

    /// Random integer in `range`.
    pub fn gen_range(&mut self, range: std::ops::Range<i32>) -> i32 {
        self.inner.gen_range(range)
    }

    /// Random index in `0..len`, or `None` for an empty range.
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.inner.gen_range(0..len))
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..50 {
            assert_eq!(rng1.gen_range(0..1000), rng2.gen_range(0..1000));
        }
    }

    #[test]
    fn test_forks_are_reproducible() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let mut fork1 = rng1.fork();
        let mut fork2 = rng2.fork();
        let seq1: Vec<_> = (0..10).map(|_| fork1.gen_range(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| fork2.gen_range(0..1000)).collect();

        assert_eq!(seq1, seq2);
    }

    #[test]
    fn test_choose_index() {
        let mut rng = GameRng::new(3);
        assert_eq!(rng.choose_index(0), None);
        assert_eq!(rng.choose_index(1), Some(0));
        for _ in 0..20 {
            assert!(rng.choose_index(4).unwrap() < 4);
        }
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u32> = (1..=10).collect();

        rng.shuffle(&mut data);
        data.sort_unstable();

        assert_eq!(data, (1..=10).collect::<Vec<_>>());
    }
}
