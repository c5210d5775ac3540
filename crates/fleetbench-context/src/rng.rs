//! Seeded random source for parameter sampling.
//!
//! Every draw a scenario makes goes through [`BenchRng`]. Two rules keep
//! generated workloads reproducible across runs and across dialects:
//!
//! - A `BenchRng` is never shared between threads. Concurrent callers each
//!   own a stream, obtained with [`BenchRng::fork`] or [`BenchRng::stream`].
//! - [`BenchRng::stream`] derives a child seed purely from `(seed, index)`,
//!   so the `i`-th query of a batch sees the same draws no matter which
//!   worker produces it or in what order.
//!
//! ```text
//! run seed 123
//!   ├─> stream(0)  query #0
//!   ├─> stream(1)  query #1
//!   └─> stream(2)  query #2
//! ```

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic, seedable random number generator.
#[derive(Debug, Clone)]
pub struct BenchRng {
    seed: u64,
    inner: SmallRng,
}

impl BenchRng {
    /// Creates a generator from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Creates the independent stream for `index` under `seed`.
    ///
    /// The result depends only on the two arguments.
    pub fn stream(seed: u64, index: u64) -> Self {
        Self::new(splitmix64(
            seed ^ GOLDEN_GAMMA.wrapping_mul(index.wrapping_add(1)),
        ))
    }

    /// The seed this generator was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Forks a child generator with a seed drawn from this one.
    ///
    /// Advances `self` by one draw.
    pub fn fork(&mut self) -> Self {
        Self::new(self.inner.next_u64())
    }

    /// Generates a random `u64`.
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Generates a random `usize` in `[0, max)`.
    ///
    /// # Panics
    ///
    /// Panics if `max == 0`.
    pub fn next_usize(&mut self, max: usize) -> usize {
        self.inner.gen_range(0..max)
    }

    /// Generates a random `u64` in `[0, max]`.
    pub fn next_u64_inclusive(&mut self, max: u64) -> u64 {
        self.inner.gen_range(0..=max)
    }

    /// Picks `amount` distinct indices from `0..length`, in draw order.
    ///
    /// # Panics
    ///
    /// Panics if `amount > length`; callers check first.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.inner, length, amount).into_vec()
    }
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
