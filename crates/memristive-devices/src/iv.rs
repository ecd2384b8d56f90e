//! Current-voltage law of the Yakopcic memristor.
//!
//! The device current is a state-weighted blend of two conduction regimes:
//!
//! ```text
//! i = h1(v) * x + h2(v) * (1 - x)
//! ```
//!
//! where `h1` is the high-conductance branch (`gmax_*`, `bmax_*`) and `h2` the
//! low-conductance branch (`gmin_*`, `bmin_*`). Each branch is piecewise in
//! the sign of `v`.
//!
//! Before blending, a state within [`SNAP_TOLERANCE`] of zero is replaced by
//! exactly zero, and a zero state reads the low branch only. Otherwise an
//! overflowing high branch multiplied by a state like `1e-250` produces
//! garbage instead of the low-branch current.
//!
//! [`SNAP_TOLERANCE`]: memristive_core::SNAP_TOLERANCE

use memristive_core::{DeviceParameters, snap_state, snap_states_in_place};

use crate::bias::Bias;
use crate::error::{Result, check_lengths};

/// Ohmic conduction: `g * v`.
#[inline]
pub fn ohmic_iv(v: f64, g: f64) -> f64 {
    g * v
}

/// Metal-insulator-metal tunnelling: `g * sinh(b * v)`.
#[inline]
pub fn mim_iv(v: f64, g: f64, b: f64) -> f64 {
    g * (b * v).sinh()
}

/// Asymmetric MIM conduction with separate constants per bias direction.
pub fn mimd(v: f64, g_p: f64, b_p: f64, g_n: f64, b_n: f64) -> f64 {
    match Bias::of(v) {
        Some(Bias::Forward) => mim_iv(v, g_p, b_p),
        _ => mim_iv(v, g_n, b_n),
    }
}

/// High-conductance branch.
///
/// `g_p * sinh(b_p * v)` for `v >= 0`, `g_n * (1 - exp(-b_n * v))` below.
pub fn h1(v: f64, g_p: f64, b_p: f64, g_n: f64, b_n: f64) -> f64 {
    match Bias::of(v) {
        Some(Bias::Forward) => g_p * (b_p * v).sinh(),
        _ => g_n * (1.0 - (-b_n * v).exp()),
    }
}

/// Low-conductance branch.
///
/// `g_p * (1 - exp(-b_p * v))` for `v >= 0`, `g_n * sinh(b_n * v)` below.
pub fn h2(v: f64, g_p: f64, b_p: f64, g_n: f64, b_n: f64) -> f64 {
    match Bias::of(v) {
        Some(Bias::Forward) => g_p * (1.0 - (-b_p * v).exp()),
        _ => g_n * (b_n * v).sinh(),
    }
}

/// Alternate low branch with the `h1` shape. Kept for experiments.
pub fn h2_2(v: f64, g_p: f64, b_p: f64, g_n: f64, b_n: f64) -> f64 {
    h1(v, g_p, b_p, g_n, b_n)
}

/// Alternate low branch with a rational reverse-bias shape.
///
/// `g_p * sinh(b_p * v)` for `v >= 0`, `g_n * (b_n + 1) * v / (b_n * v + 1)`
/// below. Kept for experiments.
pub fn h2_3(v: f64, g_p: f64, b_p: f64, g_n: f64, b_n: f64) -> f64 {
    match Bias::of(v) {
        Some(Bias::Forward) => g_p * (b_p * v).sinh(),
        _ => g_n * (((b_n + 1.0) * v) / (b_n * v + 1.0)),
    }
}

/// High-conductance branch current for a parameter set.
#[inline]
pub fn branch_high(v: f64, p: &DeviceParameters) -> f64 {
    h1(v, p.gmax_p, p.bmax_p, p.gmax_n, p.bmax_n)
}

/// Low-conductance branch current for a parameter set.
#[inline]
pub fn branch_low(v: f64, p: &DeviceParameters) -> f64 {
    h2(v, p.gmin_p, p.bmin_p, p.gmin_n, p.bmin_n)
}

/// A state of exactly zero takes the low branch alone, so an overflowing
/// high branch cannot turn `inf * 0` into NaN.
#[inline]
fn blend(v: f64, x: f64, p: &DeviceParameters) -> f64 {
    if x == 0.0 {
        return branch_low(v, p);
    }
    branch_high(v, p) * x + branch_low(v, p) * (1.0 - x)
}

/// Device current at bias `v` and state `x`.
///
/// `x` is taken by value, so the near-zero snap never affects the caller.
pub fn current(v: f64, x: f64, p: &DeviceParameters) -> f64 {
    blend(v, snap_state(x), p)
}

/// A current together with the sanitized state it was computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SanitizedCurrent {
    /// State after the near-zero snap.
    pub state: f64,
    /// Device current (A).
    pub current: f64,
}

/// Like [`current`], but also returns the snapped state so callers can
/// store it back explicitly.
pub fn current_sanitized(v: f64, x: f64, p: &DeviceParameters) -> SanitizedCurrent {
    let state = snap_state(x);
    SanitizedCurrent {
        state,
        current: blend(v, state, p),
    }
}

/// Elementwise current over paired voltage and state slices.
///
/// The snap is applied to local copies; `x` is left as given.
pub fn currents(v: &[f64], x: &[f64], p: &DeviceParameters) -> Result<Vec<f64>> {
    check_lengths(v.len(), x.len())?;
    Ok(v.iter().zip(x).map(|(&v, &x)| current(v, x, p)).collect())
}

/// Elementwise current that snaps the caller's state slice in place.
///
/// Every entry of `x` within the snap tolerance of zero is overwritten with
/// exactly `0.0` before the currents are computed.
pub fn currents_in_place(v: &[f64], x: &mut [f64], p: &DeviceParameters) -> Result<Vec<f64>> {
    check_lengths(v.len(), x.len())?;
    snap_states_in_place(x);
    Ok(v.iter().zip(x.iter()).map(|(&v, &x)| blend(v, x, p)).collect())
}

/// First-generation blend of two symmetric-shape [`mimd`] branches.
pub fn current_mimd(v: f64, x: f64, p: &DeviceParameters) -> f64 {
    mimd(v, p.gmax_p, p.bmax_p, p.gmax_n, p.bmax_n) * x
        + mimd(v, p.gmin_p, p.bmin_p, p.gmin_n, p.bmin_n) * (1.0 - x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> DeviceParameters {
        DeviceParameters::default()
    }

    #[test]
    fn test_branches_vanish_at_zero_bias() {
        let p = params();
        assert_eq!(branch_high(0.0, &p), 0.0);
        assert_eq!(branch_low(0.0, &p), 0.0);
        assert_eq!(current(0.0, 0.4, &p), 0.0);
    }

    #[test]
    fn test_branch_shapes() {
        let v = 0.8;
        assert!((h1(v, 2.0, 3.0, 5.0, 7.0) - 2.0 * (3.0 * v).sinh()).abs() < 1e-12);
        assert!((h1(-v, 2.0, 3.0, 5.0, 7.0) - 5.0 * (1.0 - (7.0 * v).exp())).abs() < 1e-9);
        assert!((h2(v, 2.0, 3.0, 5.0, 7.0) - 2.0 * (1.0 - (-3.0 * v).exp())).abs() < 1e-12);
        assert!((h2(-v, 2.0, 3.0, 5.0, 7.0) - 5.0 * (-7.0 * v).sinh()).abs() < 1e-9);
    }

    #[test]
    fn test_current_sign_follows_bias() {
        let p = params();
        for x in [0.0, 0.3, 1.0] {
            assert!(current(0.5, x, &p) > 0.0, "x = {}", x);
            assert!(current(-0.5, x, &p) < 0.0, "x = {}", x);
        }
    }

    #[test]
    fn test_state_blends_linearly() {
        let p = params();
        let v = 0.7;
        let lo = current(v, 0.0, &p);
        let hi = current(v, 1.0, &p);
        let mid = current(v, 0.25, &p);
        assert!((lo - branch_low(v, &p)).abs() < 1e-18);
        assert!((hi - branch_high(v, &p)).abs() < 1e-18);
        assert!((mid - (0.25 * hi + 0.75 * lo)).abs() < 1e-15);
    }

    #[test]
    fn test_near_zero_state_matches_zero() {
        let p = params();
        for v in [-3.0, -0.5, 0.0, 0.2, 1.5, 4.0] {
            assert_eq!(current(v, 1e-250, &p), current(v, 0.0, &p), "v = {}", v);
        }
    }

    #[test]
    fn test_snap_removes_overflow_artifacts() {
        // A huge bias overflows the high branch; without the snap the tiny
        // state would multiply infinity into NaN.
        let p = params();
        let v = 500.0;
        assert!(branch_high(v, &p).is_infinite());
        let snapped = current(v, 1e-250, &p);
        assert!(snapped.is_finite(), "current = {}", snapped);
        assert_eq!(snapped, branch_low(v, &p));
    }

    #[test]
    fn test_finite_over_operating_range() {
        let p = params();
        for vi in -40..=40 {
            let v = vi as f64 * 0.1;
            for xi in 0..=20 {
                let x = xi as f64 / 20.0;
                let i = current(v, x, &p);
                assert!(i.is_finite(), "current({}, {}) = {}", v, x, i);
            }
        }
    }

    #[test]
    fn test_current_sanitized_reports_state() {
        let p = params();
        let out = current_sanitized(1.0, 1e-300, &p);
        assert_eq!(out.state, 0.0);
        assert_eq!(out.current, current(1.0, 0.0, &p));

        let out = current_sanitized(1.0, 0.6, &p);
        assert_eq!(out.state, 0.6);
    }

    #[test]
    fn test_currents_leaves_input_untouched() {
        let p = params();
        let v = [0.5, -0.5];
        let x = [1e-250, 0.5];
        let out = currents(&v, &x, &p).unwrap();
        assert_eq!(x[0], 1e-250);
        assert_eq!(out[0], current(0.5, 0.0, &p));
        assert!(currents(&v, &x[..1], &p).is_err());
    }

    #[test]
    fn test_currents_in_place_snaps_caller_state() {
        let p = params();
        let v = [0.5, -0.5, 1.0];
        let mut x = [1e-250, 0.5, -1e-210];
        let out = currents_in_place(&v, &mut x, &p).unwrap();
        assert_eq!(x, [0.0, 0.5, 0.0]);
        assert_eq!(out[2], current(1.0, 0.0, &p));
    }

    #[test]
    fn test_legacy_forms() {
        assert_eq!(ohmic_iv(2.0, 0.5), 1.0);
        assert_eq!(mimd(0.3, 1.0, 2.0, 3.0, 4.0), mim_iv(0.3, 1.0, 2.0));
        assert_eq!(mimd(-0.3, 1.0, 2.0, 3.0, 4.0), mim_iv(-0.3, 3.0, 4.0));
        assert_eq!(h2_2(-0.3, 1.0, 2.0, 3.0, 4.0), h1(-0.3, 1.0, 2.0, 3.0, 4.0));
        // Rational branch: 3 * (5 * -0.5) / (4 * -0.5 + 1) = 7.5
        assert!((h2_3(-0.5, 1.0, 2.0, 3.0, 4.0) - 7.5).abs() < 1e-12);

        let p = params();
        assert_eq!(current_mimd(0.0, 0.5, &p), 0.0);
        assert!(current_mimd(-1.0, 0.5, &p) < 0.0);
    }
}
