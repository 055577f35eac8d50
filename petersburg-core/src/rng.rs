//! Seed hierarchy for simulation generators.
//!
//! A run has exactly one master seed. Sequential runs draw every coin flip from
//! a single generator seeded with it. Parallel runs give each sample its own
//! generator whose seed is derived via BLAKE3 from `(master_seed, sample_index)`,
//! so results do not depend on thread count or scheduling order.

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

/// Master seed plus deterministic per-sample sub-seed derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedHierarchy {
    master_seed: u64,
}

impl SeedHierarchy {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Draw a fresh master seed from the operating system's entropy source.
    pub fn from_entropy() -> Self {
        Self::new(OsRng.next_u64())
    }

    /// Use `seed` when given, otherwise fall back to OS entropy.
    pub fn resolve(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// The single shared generator used by sequential runs.
    pub fn master_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.master_seed)
    }

    /// Derive the sub-seed for one sample index.
    ///
    /// Derivation is hash-based, so `sub_seed(3)` is the same whether or not
    /// `sub_seed(0..3)` were computed first.
    pub fn sub_seed(&self, sample_index: u64) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"petersburg-sample");
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(&sample_index.to_le_bytes());
        let hash = hasher.finalize();
        let mut word = [0u8; 8];
        word.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(word)
    }

    /// Independent generator for one sample index.
    pub fn rng_for_sample(&self, sample_index: u64) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(sample_index))
    }
}
