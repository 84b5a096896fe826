//! Dice: a deterministic seeded RNG and a scripted source for tests.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the identical roll sequence
//! - **Serializable**: O(1) state capture and restore
//! - **Substitutable**: the engine's host only sees the [`DiceSource`] trait
//!
//! ```
//! use fishboat::core::{DiceSource, GameRng};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! for _ in 0..20 {
//!     let roll = a.roll_die();
//!     assert!((1..=6).contains(&roll));
//!     assert_eq!(roll, b.roll_die());
//! }
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Number of faces on the die.
pub const DIE_FACES: u8 = 6;

/// Anything that can produce a die roll in `1..=6`.
pub trait DiceSource {
    /// Roll one six-sided die.
    fn roll_die(&mut self) -> u8;
}

/// Deterministic RNG backing the die.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from OS entropy, for interactive play.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random integer in the given range.
    pub fn gen_range(&mut self, range: std::ops::RangeInclusive<u8>) -> u8 {
        self.inner.gen_range(range)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl DiceSource for GameRng {
    fn roll_die(&mut self) -> u8 {
        self.gen_range(1..=DIE_FACES)
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses the ChaCha8 word position for O(1) serialization regardless of
/// how many rolls have been made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Replays a fixed list of rolls, then panics if asked for more.
///
/// Rolls are not range-checked here so tests can feed the engine bad
/// values on purpose.
#[derive(Clone, Debug, Default)]
pub struct FixedDice {
    rolls: VecDeque<u8>,
}

impl FixedDice {
    /// Create a source that yields `rolls` in order.
    pub fn new(rolls: impl IntoIterator<Item = u8>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    /// Rolls not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl DiceSource for FixedDice {
    fn roll_die(&mut self) -> u8 {
        match self.rolls.pop_front() {
            Some(roll) => roll,
            None => panic!("FixedDice ran out of scripted rolls"),
        }
    }
}

/// Unicode die face for a roll, or `?` outside `1..=6`.
#[must_use]
pub fn dice_face(roll: u8) -> char {
    const FACES: [char; 6] = ['⚀', '⚁', '⚂', '⚃', '⚄', '⚅'];
    match roll {
        1..=DIE_FACES => FACES[roll as usize - 1],
        _ => '?',
    }
}
