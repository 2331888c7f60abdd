//! Normal variate sources.
//!
//! Forward generation draws every random number through [`NormalSource`],
//! so tests can pin the sequence with a seed (or script it outright)
//! without touching production randomness.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Supplies normally distributed samples.
pub trait NormalSource {
    /// Draw from `N(mean, std_dev²)`.
    ///
    /// `std_dev == 0` returns exactly `mean`. A negative `std_dev` is taken
    /// by magnitude.
    fn sample_normal(&mut self, mean: f64, std_dev: f64) -> f64;
}

impl<S: NormalSource + ?Sized> NormalSource for &mut S {
    fn sample_normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        (**self).sample_normal(mean, std_dev)
    }
}

impl<S: NormalSource + ?Sized> NormalSource for Box<S> {
    fn sample_normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        (**self).sample_normal(mean, std_dev)
    }
}

/// [`NormalSource`] backed by any `rand` RNG.
#[derive(Clone, Debug)]
pub struct RngNormalSource<R> {
    rng: R,
}

impl<R: Rng> RngNormalSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> NormalSource for RngNormalSource<R> {
    fn sample_normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let std_dev = std_dev.abs();
        if std_dev == 0.0 {
            return mean;
        }
        let z: f64 = self.rng.sample(StandardNormal);
        mean + std_dev * z
    }
}

/// Reproducible source: same seed, same sequence.
pub type SeededNormalSource = RngNormalSource<StdRng>;

impl SeededNormalSource {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

/// Source from a pre-recorded list of standard-normal deviates, cycled.
///
/// Each draw returns `mean + std_dev * z` for the next `z`. Useful when a
/// test needs exact drop values.
#[derive(Clone, Debug)]
pub struct ScriptedNormalSource {
    deviates: Vec<f64>,
    cursor: usize,
}

impl ScriptedNormalSource {
    pub fn new(deviates: Vec<f64>) -> Self {
        Self {
            deviates,
            cursor: 0,
        }
    }

    /// Number of draws made so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl NormalSource for ScriptedNormalSource {
    fn sample_normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let std_dev = std_dev.abs();
        if self.deviates.is_empty() || std_dev == 0.0 {
            self.cursor += 1;
            return mean;
        }
        let z = self.deviates[self.cursor % self.deviates.len()];
        self.cursor += 1;
        mean + std_dev * z
    }
}

/// Derive an independent seed for one work chunk.
///
/// SplitMix64 finalizer over `seed + chunk`; neighbouring chunks get
/// uncorrelated streams.
pub(crate) fn chunk_seed(seed: u64, chunk: u64) -> u64 {
    let mut z = seed.wrapping_add(chunk.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
