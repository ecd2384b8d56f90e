//! Stateless, hash-based random numbers for parameter draws.
//!
//! Every value is a pure function of `(seed, sample_idx, param_idx)`, so a
//! draw does not depend on the order in which samples are generated. Rayon
//! can split a population any way it likes and the result is bit-identical
//! to a sequential run with the same seed.
//!
//! Uses SplitMix64 as the mixing function and the Box-Muller transform for
//! Gaussian values.

use std::f64::consts::PI;

/// SplitMix64 finalizer: maps a 64-bit input to a well-distributed output.
#[inline]
pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e3779b97f4a7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d049bb133111eb);
    x ^ (x >> 31)
}

/// Combine seed with indices to create a unique hash input.
#[inline]
pub fn combine_indices(seed: u64, sample_idx: u32, param_idx: u32) -> u64 {
    // Spread the indices over different bit patterns so (a, b) and (b, a) differ.
    seed ^ (sample_idx as u64).wrapping_mul(0x517cc1b727220a95)
        ^ (param_idx as u64).wrapping_mul(0x5851f42d4c957f2d)
}

/// Derive an independent seed for a sub-stream (one per varied parameter).
#[inline]
pub fn derive_seed(seed: u64, stream: u64) -> u64 {
    splitmix64(seed ^ splitmix64(stream.wrapping_add(0x2545f4914f6cdd1d)))
}

/// Uniform value in [0, 1) at the given coordinates.
///
/// ```
/// use memristive_sweep::rng::uniform;
///
/// let value = uniform(42, 0, 0);
/// assert!((0.0..1.0).contains(&value));
/// assert_eq!(uniform(42, 0, 0), value);
/// assert_ne!(uniform(42, 0, 0), uniform(42, 0, 1));
/// ```
#[inline]
pub fn uniform(seed: u64, sample_idx: u32, param_idx: u32) -> f64 {
    let hash = splitmix64(combine_indices(seed, sample_idx, param_idx));
    // Upper 53 bits fill the f64 mantissa.
    (hash >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Standard normal value at the given coordinates.
///
/// Box-Muller over the uniform values at `param_idx * 2` and
/// `param_idx * 2 + 1`.
#[inline]
pub fn gaussian(seed: u64, sample_idx: u32, param_idx: u32) -> f64 {
    let u1 = uniform(seed, sample_idx, param_idx.wrapping_mul(2));
    let u2 = uniform(seed, sample_idx, param_idx.wrapping_mul(2).wrapping_add(1));

    // log(0) guard
    let u1 = u1.max(1e-10);

    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Normal value with the given mean and standard deviation.
#[inline]
pub fn gaussian_scaled(seed: u64, sample_idx: u32, param_idx: u32, mean: f64, sigma: f64) -> f64 {
    mean + gaussian(seed, sample_idx, param_idx) * sigma
}

/// A seeded stream of hash-based draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RngStream {
    pub seed: u64,
}

impl RngStream {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Independent child stream, e.g. one per varied device parameter.
    pub fn fork(&self, stream: u64) -> Self {
        Self {
            seed: derive_seed(self.seed, stream),
        }
    }

    #[inline]
    pub fn uniform(&self, sample_idx: u32, param_idx: u32) -> f64 {
        uniform(self.seed, sample_idx, param_idx)
    }

    #[inline]
    pub fn gaussian(&self, sample_idx: u32, param_idx: u32) -> f64 {
        gaussian(self.seed, sample_idx, param_idx)
    }
}
