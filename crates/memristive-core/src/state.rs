//! Internal state variable handling.
//!
//! The state `x` lives in `[0, 1]`. Noise can push it to values like `1e-250`,
//! which are numerically zero but still drive the exponential branches of the
//! current law into underflow, so such values are snapped to exactly `0.0`.

/// Absolute tolerance below which a state is treated as exactly zero.
pub const SNAP_TOLERANCE: f64 = 1e-200;

/// Lower bound of the physical state range.
pub const STATE_MIN: f64 = 0.0;

/// Upper bound of the physical state range.
pub const STATE_MAX: f64 = 1.0;

/// Snap a near-zero state to exactly zero.
#[inline]
pub fn snap_state(x: f64) -> f64 {
    if x.abs() <= SNAP_TOLERANCE { 0.0 } else { x }
}

/// Snap every near-zero entry of `states` in place.
///
/// Returns the number of entries that were changed. Entries that are already
/// exactly zero are not counted.
pub fn snap_states_in_place(states: &mut [f64]) -> usize {
    let mut snapped = 0;
    for x in states.iter_mut() {
        if *x != 0.0 && x.abs() <= SNAP_TOLERANCE {
            *x = 0.0;
            snapped += 1;
        }
    }
    snapped
}

/// Whether `x` lies in the physical range `[0, 1]`.
#[inline]
pub fn is_physical(x: f64) -> bool {
    (STATE_MIN..=STATE_MAX).contains(&x)
}
