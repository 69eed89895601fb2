//! Deterministic random source for tree expansion and playouts.
//!
//! An agent seeds one `HexRng` from its configuration and splits off a second
//! stream for playouts, so the order in which the tree expands moves does not
//! shift when a playout consumes more or fewer numbers. Two agents with the
//! same seed and the same iteration budget grow identical trees.
//!
//! ```
//! use hex_mcts::core::HexRng;
//!
//! let mut a = HexRng::new(42);
//! let mut b = HexRng::new(42);
//! let (mut xs, mut ys) = (vec![1, 2, 3, 4, 5], vec![1, 2, 3, 4, 5]);
//! a.fork().shuffle(&mut xs);
//! b.fork().shuffle(&mut ys);
//! assert_eq!(xs, ys);
//! ```

use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded ChaCha8 stream.
#[derive(Clone, Debug)]
pub struct HexRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl HexRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Split off an independent stream seeded from this one.
    ///
    /// Consumes one word of this stream, so successive forks differ.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self::new(self.inner.next_u64())
    }

    /// Shuffle in place (Fisher-Yates).
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Position in the stream, for diagnostic dumps.
    #[must_use]
    pub fn snapshot(&self) -> HexRngState {
        HexRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Resume a stream at a saved position.
    #[must_use]
    pub fn restore(state: &HexRngState) -> Self {
        let mut rng = Self::new(state.seed);
        rng.inner.set_word_pos(state.word_pos);
        rng
    }
}

/// Where a `HexRng` stands: its seed and how far it has advanced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexRngState {
    pub seed: u64,
    pub word_pos: u128,
}
