//! Interpolating B-splines for sampled voltage data.
//!
//! The knot vector repeats each end sample `degree + 1` times. Interior
//! knots sit on the data sites for odd degrees and midway between them for
//! even degrees, so the spline passes through every sample. Past either end
//! the spline continues the polynomial of its outermost piece.

use crate::error::{Error, Result};

/// Highest supported spline degree.
pub const MAX_DEGREE: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatingSpline {
    degree: usize,
    knots: Vec<f64>,
    coefficients: Vec<f64>,
}

impl InterpolatingSpline {
    /// Fit a spline of `degree` through `(x[i], y[i])`.
    ///
    /// `x` must be strictly increasing with more than `degree` samples; the
    /// caller checks ordering and finiteness.
    pub fn fit(x: &[f64], y: &[f64], degree: usize) -> Result<Self> {
        if degree == 0 || degree > MAX_DEGREE {
            return Err(Error::UnsupportedDegree(degree));
        }
        let m = x.len();
        if m <= degree || y.len() != m {
            return Err(Error::InvalidInterpolation(format!(
                "degree {} needs at least {} samples, got {}",
                degree,
                degree + 1,
                m
            )));
        }

        let knots = knot_vector(x, degree);
        let coefficients = if degree == 1 {
            // Hat functions peak on the data sites.
            y.to_vec()
        } else {
            let mut system = BandedSystem::new(m, degree);
            for (row, &site) in x.iter().enumerate() {
                let span = find_span(&knots, degree, m, site);
                for (r, value) in basis_functions(&knots, degree, span, site)
                    .into_iter()
                    .enumerate()
                {
                    system.set(row, span - degree + r, value);
                }
            }
            system.solve(y.to_vec())?
        };

        Ok(Self {
            degree,
            knots,
            coefficients,
        })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn evaluate(&self, t: f64) -> f64 {
        let p = self.degree;
        let span = find_span(&self.knots, p, self.coefficients.len(), t);
        basis_functions(&self.knots, p, span, t)
            .into_iter()
            .enumerate()
            .map(|(r, b)| b * self.coefficients[span - p + r])
            .sum()
    }
}

fn knot_vector(x: &[f64], p: usize) -> Vec<f64> {
    let m = x.len();
    let mut knots = Vec::with_capacity(m + p + 1);
    knots.extend(std::iter::repeat_n(x[0], p + 1));
    for l in 0..m - p - 1 {
        let j = p / 2 + 1 + l;
        if p % 2 == 1 {
            knots.push(x[j]);
        } else {
            knots.push(0.5 * (x[j - 1] + x[j]));
        }
    }
    knots.extend(std::iter::repeat_n(x[m - 1], p + 1));
    knots
}

/// Knot span holding `t`, clamped to the outer pieces for extrapolation.
fn find_span(knots: &[f64], p: usize, n: usize, t: f64) -> usize {
    knots
        .partition_point(|&k| k <= t)
        .saturating_sub(1)
        .clamp(p, n - 1)
}

/// The `p + 1` non-zero basis functions on `span` at `t` (Cox-de Boor).
fn basis_functions(knots: &[f64], p: usize, span: usize, t: f64) -> Vec<f64> {
    let mut n = vec![0.0; p + 1];
    let mut left = vec![0.0; p + 1];
    let mut right = vec![0.0; p + 1];
    n[0] = 1.0;
    for j in 1..=p {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = n[r] / (right[r + 1] + left[j - r]);
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        n[j] = saved;
    }
    n
}

/// Square system with `bandwidth` non-zero diagonals on each side.
///
/// B-spline collocation matrices are totally nonnegative, so elimination
/// runs without pivoting and fill-in stays inside the band.
struct BandedSystem {
    size: usize,
    bandwidth: usize,
    band: Vec<f64>,
}

impl BandedSystem {
    fn new(size: usize, bandwidth: usize) -> Self {
        Self {
            size,
            bandwidth,
            band: vec![0.0; size * (2 * bandwidth + 1)],
        }
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * (2 * self.bandwidth + 1) + (col + self.bandwidth - row)
    }

    fn get(&self, row: usize, col: usize) -> f64 {
        self.band[self.index(row, col)]
    }

    fn set(&mut self, row: usize, col: usize, value: f64) {
        let i = self.index(row, col);
        self.band[i] = value;
    }

    fn solve(mut self, mut rhs: Vec<f64>) -> Result<Vec<f64>> {
        let (n, w) = (self.size, self.bandwidth);
        for i in 0..n {
            let pivot = self.get(i, i);
            if pivot == 0.0 || !pivot.is_finite() {
                return Err(Error::SingularInterpolation);
            }
            let last = (i + w).min(n - 1);
            for r in i + 1..=last {
                let factor = self.get(r, i) / pivot;
                if factor == 0.0 {
                    continue;
                }
                for c in i..=last {
                    let v = self.get(r, c) - factor * self.get(i, c);
                    self.set(r, c, v);
                }
                rhs[r] -= factor * rhs[i];
            }
        }

        for i in (0..n).rev() {
            let last = (i + w).min(n - 1);
            let tail: f64 = (i + 1..=last).map(|c| self.get(i, c) * rhs[c]).sum();
            rhs[i] = (rhs[i] - tail) / self.get(i, i);
        }
        Ok(rhs)
    }
}
