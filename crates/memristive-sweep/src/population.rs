//! Per-device parameter populations.
//!
//! A population starts from a nominal [`DeviceParameters`] set and perturbs
//! selected fields with independent truncated-normal draws, one draw per
//! device. Each varied field uses its own forked RNG stream, so adding a
//! variation never changes the draws of the others.

use memristive_core::{DeviceField, DeviceParameters};
use serde::{Deserialize, Serialize};

use crate::rng::RngStream;
use crate::sampler::TruncatedNormal;

/// Variability of one device parameter around its nominal value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterVariation {
    /// Which parameter to vary.
    pub field: DeviceField,
    /// Absolute standard deviation.
    pub sd: f64,
    /// Lower truncation bound. `None` leaves the low side open.
    #[serde(default)]
    pub low: Option<f64>,
    /// Upper truncation bound. `None` leaves the high side open.
    #[serde(default)]
    pub upp: Option<f64>,
}

impl ParameterVariation {
    /// Create an unbounded variation.
    pub fn new(field: DeviceField, sd: f64) -> Self {
        Self {
            field,
            sd,
            low: None,
            upp: None,
        }
    }

    /// Set truncation bounds.
    pub fn with_bounds(mut self, low: f64, upp: f64) -> Self {
        self.low = Some(low);
        self.upp = Some(upp);
        self
    }

    /// Set the standard deviation as a fraction of `nominal`.
    pub fn with_relative_sd(mut self, nominal: f64, fraction: f64) -> Self {
        self.sd = (nominal * fraction).abs();
        self
    }

    /// The distribution this variation draws from around `mean`.
    pub fn distribution(&self, mean: f64) -> TruncatedNormal {
        TruncatedNormal::new(
            mean,
            self.sd,
            self.low.unwrap_or(f64::NEG_INFINITY),
            self.upp.unwrap_or(f64::INFINITY),
        )
    }
}

/// Draw `count` parameter sets around `nominal`.
///
/// Fields without a variation keep their nominal value. If the same field
/// appears twice, the later variation wins.
pub fn sample_population(
    nominal: &DeviceParameters,
    variations: &[ParameterVariation],
    count: usize,
    seed: u64,
) -> Vec<DeviceParameters> {
    let mut population = vec![*nominal; count];
    let root = RngStream::new(seed);

    for variation in variations {
        let dist = variation.distribution(nominal.get(variation.field));
        let column = dist.sample_matrix(count, 1, root.fork(variation.field as u64).seed);
        for (device, value) in population.iter_mut().zip(column.iter()) {
            device.set(variation.field, *value);
        }
    }

    log::debug!(
        "sampled {} devices with {} varied parameters (seed = {})",
        count,
        variations.len(),
        seed
    );
    population
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_variations_copies_nominal() {
        let nominal = DeviceParameters::default();
        let population = sample_population(&nominal, &[], 5, 1);
        assert_eq!(population.len(), 5);
        assert!(population.iter().all(|p| *p == nominal));
    }

    #[test]
    fn varied_field_stays_in_bounds_others_untouched() {
        let nominal = DeviceParameters::default();
        let variation = ParameterVariation::new(DeviceField::Ap, 0.02).with_bounds(0.05, 0.09);
        let population = sample_population(&nominal, &[variation], 200, 11);

        for p in &population {
            assert!((0.05..=0.09).contains(&p.a_p), "Ap = {}", p.a_p);
            assert_eq!(p.a_n, nominal.a_n);
            assert_eq!(p.x_n, nominal.x_n);
        }
        let distinct = population.iter().filter(|p| p.a_p != population[0].a_p).count();
        assert!(distinct > 0);
    }

    #[test]
    fn streams_are_per_field() {
        let nominal = DeviceParameters::default();
        let ap = ParameterVariation::new(DeviceField::Ap, 0.01);
        let xn = ParameterVariation::new(DeviceField::Xn, 0.005).with_bounds(0.05, 0.15);

        let alone = sample_population(&nominal, &[ap], 20, 3);
        let together = sample_population(&nominal, &[ap, xn], 20, 3);
        for (a, b) in alone.iter().zip(&together) {
            assert_eq!(a.a_p, b.a_p, "adding a variation changed another field's draws");
        }
    }

    #[test]
    fn zero_sd_keeps_nominal() {
        let nominal = DeviceParameters::default();
        let variation = ParameterVariation::new(DeviceField::Vp, 0.0);
        let population = sample_population(&nominal, &[variation], 4, 0);
        assert!(population.iter().all(|p| p.v_p == nominal.v_p));
    }

    #[test]
    fn relative_sd_scales_with_nominal() {
        let v = ParameterVariation::new(DeviceField::GmaxP, 0.0).with_relative_sd(-4.0e-4, 0.1);
        assert!((v.sd - 4.0e-5).abs() < 1e-18);
    }

    #[test]
    fn variation_deserializes_with_open_bounds() {
        let v: ParameterVariation = serde_json::from_str(r#"{"field": "xn", "sd": 0.01}"#).unwrap();
        assert_eq!(v.field, DeviceField::Xn);
        assert_eq!(v.low, None);
        let dist = v.distribution(0.1);
        assert_eq!(dist.low, f64::NEG_INFINITY);
        assert_eq!(dist.upp, f64::INFINITY);
    }
}
