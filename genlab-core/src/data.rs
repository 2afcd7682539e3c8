//! Size, seed and run configuration.

use crate::error::{GenlabError, Result};
use std::fmt;

/// Upper bound of the size parameter; ranges reach their full span here.
pub const MAX_SIZE: usize = 100;

/// Size parameter controlling how large generated data may grow.
///
/// The driver ramps size from 0 towards [`MAX_SIZE`] over a run, so early
/// trials see small values and later ones explore the full range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Size(pub usize);

impl Size {
    pub fn new(value: usize) -> Self {
        Size(value)
    }

    pub fn get(&self) -> usize {
        self.0
    }

    /// Fraction of the full span this size unlocks, in `[0.0, 1.0]`.
    pub fn ratio(&self) -> f64 {
        self.0.min(MAX_SIZE) as f64 / MAX_SIZE as f64
    }
}

impl From<usize> for Size {
    fn from(value: usize) -> Self {
        Size(value)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Size({})", self.0)
    }
}

/// Splittable SplitMix64 seed.
///
/// Every generator is a pure function of `(Size, Seed)`; splitting gives
/// each sub-generator an independent stream so composition stays
/// deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed(pub u64, pub u64);

impl Seed {
    pub fn from_u64(value: u64) -> Self {
        let state = splitmix64_mix(value);
        let gamma = mix_gamma(state);
        Seed(state, gamma)
    }

    /// Split into two independent seeds.
    pub fn split(self) -> (Self, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        let new_gamma = mix_gamma(output);

        (Seed(new_state, gamma), Seed(output, new_gamma))
    }

    /// Split into `n` independent seeds.
    pub fn split_n(self, n: usize) -> Vec<Self> {
        let mut seeds = Vec::with_capacity(n);
        let mut current = self;
        for _ in 0..n {
            let (here, rest) = current.split();
            seeds.push(here);
            current = rest;
        }
        seeds
    }

    pub fn next_u64(self) -> (u64, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        (output, Seed(new_state, gamma))
    }

    /// Value in `[0, bound)`. A zero bound yields zero.
    pub fn next_bounded(self, bound: u64) -> (u64, Self) {
        let (value, new_seed) = self.next_u64();
        (((value as u128 * bound as u128) >> 64) as u64, new_seed)
    }

    pub fn next_bool(self) -> (bool, Self) {
        let (value, new_seed) = self.next_u64();
        (value & 1 == 1, new_seed)
    }

    pub fn random() -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        Seed(rng.gen(), rng.gen::<u64>() | 1)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({}, {})", self.0, self.1)
    }
}

/// Configuration for a property run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of trials to run.
    pub test_limit: usize,

    /// Maximum number of successful shrink steps.
    pub shrink_limit: usize,

    /// Largest size handed to generators.
    pub size_limit: usize,

    /// Fixed seed for reproducible runs; random when unset.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            test_limit: 100,
            shrink_limit: 1000,
            size_limit: MAX_SIZE,
            seed: None,
        }
    }
}

impl Config {
    pub fn with_tests(mut self, tests: usize) -> Self {
        self.test_limit = tests;
        self
    }

    pub fn with_shrinks(mut self, shrinks: usize) -> Self {
        self.shrink_limit = shrinks;
        self
    }

    pub fn with_size_limit(mut self, size: usize) -> Self {
        self.size_limit = size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject settings that would make a run meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.test_limit == 0 {
            return Err(GenlabError::InvalidConfig {
                message: "test_limit must be at least 1".to_string(),
            });
        }
        if self.size_limit == 0 || self.size_limit > MAX_SIZE {
            return Err(GenlabError::InvalidConfig {
                message: format!(
                    "size_limit must be in 1..={MAX_SIZE}, got {}",
                    self.size_limit
                ),
            });
        }
        Ok(())
    }

    pub(crate) fn initial_seed(&self) -> Seed {
        match self.seed {
            Some(value) => Seed::from_u64(value),
            None => Seed::random(),
        }
    }

    /// Size used for the `test_num`-th trial, ramping up to `size_limit`.
    pub(crate) fn size_for(&self, test_num: usize) -> Size {
        if self.test_limit <= 1 {
            return Size::new(self.size_limit);
        }
        Size::new((test_num * self.size_limit) / (self.test_limit - 1))
    }
}

/// SplitMix64 mixing function.
fn splitmix64_mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Gamma for a freshly split stream; odd for maximal period.
fn mix_gamma(z: u64) -> u64 {
    let z = splitmix64_mix(z);
    (z | 1).wrapping_mul(0x9e3779b97f4a7c15)
}
