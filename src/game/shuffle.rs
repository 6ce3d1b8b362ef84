//! Source of randomness for shuffles
//!
//! The action processor never touches a global generator: it is handed a
//! `Shuffler` that permutes a list of card ids. Sessions get a seeded one so a
//! table can be reproduced from its seed; tests can pass a plain closure.

use crate::core::CardId;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};

/// Produces a random permutation of card ids in place
pub trait Shuffler {
    fn permute(&mut self, ids: &mut [CardId]);
}

impl<F> Shuffler for F
where
    F: FnMut(&mut [CardId]),
{
    fn permute(&mut self, ids: &mut [CardId]) {
        self(ids)
    }
}

/// Uniform Fisher-Yates shuffle driven by a seeded ChaCha12 stream
///
/// Serializable, so a session's RNG position can be stored next to its state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeededShuffler {
    seed: u64,
    rng: ChaCha12Rng,
}

impl SeededShuffler {
    pub fn new(seed: u64) -> Self {
        SeededShuffler {
            seed,
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    /// Seed from OS entropy, keeping the chosen seed for later reproduction
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Shuffler for SeededShuffler {
    fn permute(&mut self, ids: &mut [CardId]) {
        // SliceRandom::shuffle is Fisher-Yates.
        ids.shuffle(&mut self.rng);
    }
}

/// Leaves the order untouched. Useful when a test needs a shuffle effect
/// without caring about the permutation.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityShuffler;

impl Shuffler for IdentityShuffler {
    fn permute(&mut self, _ids: &mut [CardId]) {}
}
