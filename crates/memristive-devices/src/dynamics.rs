//! State-derivative law of the Yakopcic memristor.
//!
//! ```text
//! dx/dt = eta * g(v) * f(v, x)
//! ```
//!
//! `g` is the voltage activation: zero inside the threshold window
//! `[v_n, v_p]`, exponential outside it. `f` is the boundary term: it decays
//! the drift as `x` passes the boundary reference point on the side the
//! bias is pushing toward. This soft saturation is separate from the
//! [`WindowFunction`](crate::window::WindowFunction) multipliers used by
//! simpler drift models.
//!
//! None of these functions guard against `x_n == 0`; use
//! [`DeviceParameters::validate`] when parameters come from outside.

use memristive_core::DeviceParameters;

use crate::bias::Bias;
use crate::error::{Result, check_lengths};

/// Voltage activation term `g(v)`.
///
/// - `v > v_p`: `a_p * (exp(v) - exp(v_p))`
/// - `v < v_n`: `-a_n * (exp(-v) - exp(v_n))`
/// - otherwise `0`
pub fn activation(v: f64, p: &DeviceParameters) -> f64 {
    if v > p.v_p {
        p.a_p * (v.exp() - p.v_p.exp())
    } else if v < p.v_n {
        -p.a_n * ((-v).exp() - p.v_n.exp())
    } else {
        0.0
    }
}

/// Positive-side boundary shape: `(x_p - x) / (1 - x_p) + 1`.
///
/// Equals 1 at `x = x_p` and 0 at `x = 1`.
#[inline]
pub fn wp(x: f64, x_p: f64) -> f64 {
    (x_p - x) / (1.0 - x_p) + 1.0
}

/// Negative-side boundary shape: `x / x_n`.
///
/// Equals 1 at `x = x_n` and 0 at `x = 0`.
#[inline]
pub fn wn(x: f64, x_n: f64) -> f64 {
    x / x_n
}

/// Boundary term `f(v, x)`.
///
/// Branches on the sign of `eta * v`:
/// - `>= 0`: `exp(-alpha_p * (x - x_p)) * wp(x, x_p)` once `x >= x_p`, else 1
/// - `< 0`: `exp(alpha_n * (x - x_n)) * wn(x, x_n)` once `x <= x_n`, else 1
///
/// A NaN bias or state selects no branch and yields 0.
pub fn boundary(v: f64, x: f64, p: &DeviceParameters) -> f64 {
    match Bias::of(p.eta.sign() * v) {
        Some(Bias::Forward) => {
            if x >= p.x_p {
                (-p.alpha_p * (x - p.x_p)).exp() * wp(x, p.x_p)
            } else if x < p.x_p {
                1.0
            } else {
                0.0
            }
        }
        Some(Bias::Reverse) => {
            if x <= p.x_n {
                (p.alpha_n * (x - p.x_n)).exp() * wn(x, p.x_n)
            } else if x > p.x_n {
                1.0
            } else {
                0.0
            }
        }
        None => 0.0,
    }
}

/// Rate of change of the state, `eta * g(v) * f(v, x)`.
pub fn state_derivative(v: f64, x: f64, p: &DeviceParameters) -> f64 {
    let g = activation(v, p);
    if g == 0.0 {
        return 0.0;
    }
    p.eta.sign() * g * boundary(v, x, p)
}

/// Elementwise [`state_derivative`] over paired voltage and state slices.
pub fn state_derivatives(v: &[f64], x: &[f64], p: &DeviceParameters) -> Result<Vec<f64>> {
    check_lengths(v.len(), x.len())?;
    Ok(v.iter()
        .zip(x)
        .map(|(&v, &x)| state_derivative(v, x, p))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use memristive_core::Polarity;

    fn params() -> DeviceParameters {
        DeviceParameters::default()
            .with_thresholds(0.5, -0.5)
            .with_rates(10.0, 10.0)
            .with_boundaries(0.3, 0.5)
            .with_decay(1.0, 5.0)
    }

    #[test]
    fn test_activation_window() {
        let p = params();
        assert_eq!(activation(0.0, &p), 0.0);
        assert_eq!(activation(0.5, &p), 0.0);
        assert_eq!(activation(-0.5, &p), 0.0);
        let up = activation(1.0, &p);
        assert!((up - 10.0 * (1f64.exp() - 0.5f64.exp())).abs() < 1e-12);
        let down = activation(-1.0, &p);
        assert!((down + 10.0 * (1f64.exp() - (-0.5f64).exp())).abs() < 1e-12);
        assert!(down < 0.0);
    }

    #[test]
    fn test_boundary_shapes_are_continuous_at_reference() {
        assert_eq!(wp(0.3, 0.3), 1.0);
        assert_eq!(wn(0.5, 0.5), 1.0);
        assert_eq!(wp(1.0, 0.3), 0.0);
        assert_eq!(wn(0.0, 0.5), 0.0);
    }

    #[test]
    fn test_boundary_forward_branch() {
        let p = params();
        // Below x_p the forward drift is undamped.
        assert_eq!(boundary(1.0, 0.1, &p), 1.0);
        // At x_p the decay starts at exactly 1.
        assert_eq!(boundary(1.0, 0.3, &p), 1.0);
        // Past x_p it decays and reaches 0 at x = 1.
        let mid = boundary(1.0, 0.65, &p);
        let expected = (-0.35f64).exp() * wp(0.65, 0.3);
        assert!((mid - expected).abs() < 1e-12);
        assert!(mid < 1.0 && mid > 0.0);
        assert_eq!(boundary(1.0, 1.0, &p), 0.0);
    }

    #[test]
    fn test_boundary_reverse_branch() {
        let p = params();
        assert_eq!(boundary(-1.0, 0.9, &p), 1.0);
        assert_eq!(boundary(-1.0, 0.5, &p), 1.0);
        let low = boundary(-1.0, 0.25, &p);
        let expected = (5.0f64 * (0.25 - 0.5)).exp() * 0.5;
        assert!((low - expected).abs() < 1e-12);
        assert_eq!(boundary(-1.0, 0.0, &p), 0.0);
    }

    #[test]
    fn test_boundary_respects_polarity() {
        let p = params().with_polarity(Polarity::Reverse);
        // eta * v < 0 for positive bias, so the reverse branch applies.
        assert_eq!(boundary(1.0, 0.9, &p), 1.0);
        assert!(boundary(1.0, 0.25, &p) < 1.0);
    }

    #[test]
    fn test_boundary_nan_selects_nothing() {
        let p = params();
        assert_eq!(boundary(f64::NAN, 0.5, &p), 0.0);
        assert_eq!(boundary(1.0, f64::NAN, &p), 0.0);
    }

    #[test]
    fn test_derivative_zero_inside_threshold() {
        let p = params();
        for v in [-0.5, -0.2, 0.0, 0.3, 0.5] {
            for x in [0.0, 0.5, 1.0] {
                assert_eq!(state_derivative(v, x, &p), 0.0, "v = {}, x = {}", v, x);
            }
        }
    }

    #[test]
    fn test_derivative_sign_matches_eta_v() {
        for eta in [Polarity::Forward, Polarity::Reverse] {
            let p = params().with_polarity(eta);
            for v in [-2.0, -0.8, 0.8, 2.0] {
                for x in [0.05, 0.3, 0.5, 0.7, 0.95] {
                    let rate = state_derivative(v, x, &p);
                    let expected = (eta.sign() * v).signum();
                    assert_eq!(
                        rate.signum(),
                        expected,
                        "eta = {:?}, v = {}, x = {}, rate = {}",
                        eta,
                        v,
                        x,
                        rate
                    );
                }
            }
        }
    }

    #[test]
    fn test_derivative_vanishes_at_target_boundary() {
        let p = params();
        assert_eq!(state_derivative(2.0, 1.0, &p), 0.0);
        assert_eq!(state_derivative(-2.0, 0.0, &p), 0.0);
        // Leaving a boundary is not damped.
        assert!(state_derivative(2.0, 0.0, &p) > 0.0);
        assert!(state_derivative(-2.0, 1.0, &p) < 0.0);
    }

    #[test]
    fn test_state_derivatives_elementwise() {
        let p = params();
        let out = state_derivatives(&[0.0, 2.0], &[0.5, 0.5], &p).unwrap();
        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], state_derivative(2.0, 0.5, &p));
        assert!(state_derivatives(&[0.0], &[0.5, 0.5], &p).is_err());
    }
}
