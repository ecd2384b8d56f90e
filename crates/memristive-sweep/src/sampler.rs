//! Truncated-normal parameter draws.
//!
//! Values are drawn from `N(mean, sd)` restricted to `[low, upp]` over the
//! hash RNG in [`crate::rng`]. Inside the bulk of the distribution a uniform
//! value is mapped through the inverse normal CDF between the standardized
//! bounds. Windows more than [`TAIL_THRESHOLD`] standard deviations out use
//! Robert's (1995) exponential or uniform proposals, which stay accurate
//! where the CDF saturates.
//!
//! A degenerate distribution (`sd <= 0`, any non-finite `mean` or `sd`, NaN
//! bounds, `low >= upp`) yields a matrix filled with `mean` and logs a
//! warning.

use std::f64::consts::SQRT_2;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use statrs::function::erf::{erfc, erfc_inv};

use crate::rng::RngStream;

/// Standardized distance beyond which the tail sampler takes over.
pub const TAIL_THRESHOLD: f64 = 5.0;

/// Proposals per entry in the tail sampler. Each is accepted with
/// probability above 0.45.
pub const MAX_TAIL_ATTEMPTS: u32 = 256;

/// Result of a draw: a bare value for a 1×1 request, otherwise a matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterDraw {
    Scalar(f64),
    Matrix(DMatrix<f64>),
}

impl ParameterDraw {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            ParameterDraw::Scalar(v) => Some(*v),
            ParameterDraw::Matrix(_) => None,
        }
    }

    /// `(rows, cols)`; a scalar reports `(1, 1)`.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            ParameterDraw::Scalar(_) => (1, 1),
            ParameterDraw::Matrix(m) => m.shape(),
        }
    }

    pub fn into_matrix(self) -> DMatrix<f64> {
        match self {
            ParameterDraw::Scalar(v) => DMatrix::from_element(1, 1, v),
            ParameterDraw::Matrix(m) => m,
        }
    }
}

/// A normal distribution restricted to `[low, upp]`.
///
/// Infinite bounds are allowed and leave that side unrestricted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TruncatedNormal {
    pub mean: f64,
    pub sd: f64,
    pub low: f64,
    pub upp: f64,
}

impl TruncatedNormal {
    pub fn new(mean: f64, sd: f64, low: f64, upp: f64) -> Self {
        Self { mean, sd, low, upp }
    }

    /// Unbounded normal.
    pub fn unbounded(mean: f64, sd: f64) -> Self {
        Self::new(mean, sd, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// True when no proper distribution exists and draws fall back to `mean`.
    pub fn is_degenerate(&self) -> bool {
        !self.mean.is_finite()
            || !self.sd.is_finite()
            || self.sd <= 0.0
            || self.low.is_nan()
            || self.upp.is_nan()
            || self.low >= self.upp
    }

    /// Draw the entry at `index`.
    pub fn sample(&self, rng: RngStream, index: u32) -> f64 {
        if self.is_degenerate() {
            return self.mean;
        }
        let a = (self.low - self.mean) / self.sd;
        let b = (self.upp - self.mean) / self.sd;

        // Mirror right-hand windows so the CDF is evaluated in the lower tail.
        let (lo, hi, sign) = if a > 0.0 { (-b, -a, -1.0) } else { (a, b, 1.0) };

        if hi == f64::NEG_INFINITY {
            // Standardized window overflowed.
            return self.mean.clamp(self.low, self.upp);
        }

        let z = if hi < -TAIL_THRESHOLD {
            -tail_draw(-hi, -lo, rng, index)
        } else {
            let p_lo = standard_cdf(lo);
            let p_hi = standard_cdf(hi);
            let u = p_lo + (p_hi - p_lo) * open_uniform(rng, index, 0);
            standard_quantile(u).clamp(lo, hi)
        };

        (self.mean + self.sd * sign * z).clamp(self.low, self.upp)
    }

    /// Fill an `out_size × in_size` matrix with independent draws.
    pub fn sample_matrix(&self, out_size: usize, in_size: usize, seed: u64) -> DMatrix<f64> {
        if self.is_degenerate() {
            log::warn!(
                "degenerate truncated normal (mean = {}, sd = {}, bounds = [{}, {}]); using constant mean",
                self.mean,
                self.sd,
                self.low,
                self.upp
            );
            return DMatrix::from_element(out_size, in_size, self.mean);
        }

        let rng = RngStream::new(seed);
        DMatrix::from_fn(out_size, in_size, |row, col| {
            self.sample(rng, (row * in_size + col) as u32)
        })
    }
}

fn standard_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

fn standard_quantile(p: f64) -> f64 {
    -SQRT_2 * erfc_inv(2.0 * p)
}

/// Uniform on the open interval `(0, 1)`.
#[inline]
fn open_uniform(rng: RngStream, index: u32, param: u32) -> f64 {
    rng.uniform(index, param) + 0.5 / (1u64 << 53) as f64
}

/// Standard normal restricted to `[a, b]` with `a > TAIL_THRESHOLD`.
fn tail_draw(a: f64, b: f64, rng: RngStream, index: u32) -> f64 {
    let narrow = (b - a) * a <= 1.0;
    let rate = 0.5 * (a + (a * a + 4.0).sqrt());
    let mut z = a;
    for attempt in 0..MAX_TAIL_ATTEMPTS {
        let u1 = open_uniform(rng, index, 2 * attempt);
        let u2 = open_uniform(rng, index, 2 * attempt + 1);
        let accept = if narrow {
            z = a + (b - a) * u1;
            (-0.5 * (z - a) * (z + a)).exp()
        } else {
            z = a - u1.ln() / rate;
            if z > b {
                continue;
            }
            (-0.5 * (z - rate) * (z - rate)).exp()
        };
        if u2 <= accept {
            return z;
        }
    }
    z.min(b)
}

/// Draw an `out_size × in_size` matrix from `N(mean, sd)` truncated to `[low, upp]`.
///
/// Returns [`ParameterDraw::Scalar`] when both dimensions are 1.
pub fn truncated_normal(
    mean: f64,
    sd: f64,
    low: f64,
    upp: f64,
    out_size: usize,
    in_size: usize,
    seed: u64,
) -> ParameterDraw {
    let matrix = truncated_normal_matrix(mean, sd, low, upp, out_size, in_size, seed);
    if out_size == 1 && in_size == 1 {
        ParameterDraw::Scalar(matrix[(0, 0)])
    } else {
        ParameterDraw::Matrix(matrix)
    }
}

/// Like [`truncated_normal`], but always returns the matrix.
pub fn truncated_normal_matrix(
    mean: f64,
    sd: f64,
    low: f64,
    upp: f64,
    out_size: usize,
    in_size: usize,
    seed: u64,
) -> DMatrix<f64> {
    TruncatedNormal::new(mean, sd, low, upp).sample_matrix(out_size, in_size, seed)
}
