//! Counter-based randomness derivation.
//!
//! Every random draw in a run comes from a [`ChaCha8Rng`] whose seed is a
//! SHA-256 digest of the root seed, a stream label, the game index and a
//! slot. Derivation never depends on how many draws other streams made, so
//! adding or reordering consumers keeps every other stream unchanged.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

const DOMAIN_TAG: &[u8] = b"deckcheck/v1";

/// Independent randomness streams used by the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStream {
    /// Kingdom selection, one per game.
    ActionCards,
    /// Random agents, one per game and seat.
    RandomAgent,
}

impl SeedStream {
    fn label(self) -> &'static [u8] {
        match self {
            SeedStream::ActionCards => b"action-cards",
            SeedStream::RandomAgent => b"random-agent",
        }
    }
}

/// Derives per-game, per-slot seeds from one root seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedDeriver {
    root: u64,
}

impl SeedDeriver {
    pub fn new(root: u64) -> Self {
        Self { root }
    }

    pub fn root(&self) -> u64 {
        self.root
    }

    pub fn derive(&self, stream: SeedStream, game: usize, slot: usize) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(DOMAIN_TAG);
        hasher.update(self.root.to_le_bytes());
        hasher.update(stream.label());
        hasher.update((game as u64).to_le_bytes());
        hasher.update((slot as u64).to_le_bytes());
        hasher.finalize().into()
    }

    pub fn rng(&self, stream: SeedStream, game: usize, slot: usize) -> ChaCha8Rng {
        ChaCha8Rng::from_seed(self.derive(stream, game, slot))
    }
}
