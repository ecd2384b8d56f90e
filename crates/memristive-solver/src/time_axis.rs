//! Uniformly spaced time axes.

use crate::error::{Error, Result};

/// Relative tolerance used when checking that explicit time points are evenly spaced.
pub const SPACING_TOLERANCE: f64 = 1e-6;

/// Maximum number of points on an axis (about 800 MB of `f64`).
pub const MAX_POINTS: usize = 100_000_000;

/// An ordered, uniformly spaced sequence of time points.
///
/// Every constructor validates its input, so integrators can take a
/// `&TimeAxis` without re-checking spacing or ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    points: Vec<f64>,
    dt: f64,
}

impl TimeAxis {
    /// `n` points starting at `t0` with spacing `dt`.
    pub fn new(t0: f64, dt: f64, n: usize) -> Result<Self> {
        if n == 0 {
            return Err(Error::EmptyTimeAxis);
        }
        if n > MAX_POINTS {
            return Err(Error::TooManyPoints {
                requested: n as f64,
                limit: MAX_POINTS,
            });
        }
        if !dt.is_finite() || dt <= 0.0 {
            return Err(Error::InvalidTimeStep(dt));
        }
        if !t0.is_finite() {
            return Err(Error::InvalidTimeSpan { start: t0, end: t0 });
        }
        let points = (0..n).map(|i| t0 + i as f64 * dt).collect();
        Ok(Self { points, dt })
    }

    /// Points from `t0` to `t_end` in steps of `dt`.
    ///
    /// `t_end` is included when it falls on the grid (up to rounding);
    /// otherwise the last point is the largest grid point below it. A span
    /// needing more than [`MAX_POINTS`] points is rejected.
    pub fn until(t0: f64, t_end: f64, dt: f64) -> Result<Self> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(Error::InvalidTimeStep(dt));
        }
        if !t0.is_finite() || !t_end.is_finite() || t_end < t0 {
            return Err(Error::InvalidTimeSpan {
                start: t0,
                end: t_end,
            });
        }
        let steps = ((t_end - t0) / dt + 1e-9).floor();
        if !steps.is_finite() || steps >= MAX_POINTS as f64 {
            return Err(Error::TooManyPoints {
                requested: steps + 1.0,
                limit: MAX_POINTS,
            });
        }
        Self::new(t0, dt, steps as usize + 1)
    }

    /// Adopt an explicit list of time points.
    ///
    /// The points must be finite, strictly increasing and evenly spaced to
    /// within [`SPACING_TOLERANCE`] of the first interval.
    pub fn from_points(points: Vec<f64>) -> Result<Self> {
        let Some(&first) = points.first() else {
            return Err(Error::EmptyTimeAxis);
        };
        if !first.is_finite() {
            return Err(Error::InvalidTimeSpan {
                start: first,
                end: first,
            });
        }
        if points.len() == 1 {
            return Ok(Self { points, dt: 0.0 });
        }

        let dt = points[1] - points[0];
        for (index, pair) in points.windows(2).enumerate() {
            let step = pair[1] - pair[0];
            if step.is_nan() || step <= 0.0 {
                return Err(Error::NonIncreasingTime { index: index + 1 });
            }
            if (step - dt).abs() > SPACING_TOLERANCE * dt {
                return Err(Error::NonUniformTime {
                    index: index + 1,
                    expected: dt,
                    actual: step,
                });
            }
        }
        Ok(Self { points, dt })
    }

    /// Step size. Zero for a single-point axis.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Never true for a constructed axis.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn start(&self) -> f64 {
        self.points[0]
    }

    pub fn end(&self) -> f64 {
        self.points[self.points.len() - 1]
    }
}
