//! Summary statistics over ensemble outputs.
//!
//! Moments are accumulated as raw sums so partial results from rayon
//! workers can be merged in any order.

use rayon::prelude::*;
use serde::Serialize;

/// Summary of one scalar quantity across devices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnsembleStatistics {
    /// Number of samples.
    pub count: usize,
    pub min: f64,
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population variance.
    pub variance: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl EnsembleStatistics {
    /// Create statistics from raw moments.
    pub fn from_moments(count: usize, sum: f64, sum_sq: f64, min: f64, max: f64) -> Self {
        let mean = if count > 0 { sum / count as f64 } else { 0.0 };
        let variance = if count > 0 {
            (sum_sq / count as f64) - mean * mean
        } else {
            0.0
        };
        // Rounding can push a zero variance slightly negative.
        let variance = variance.max(0.0);

        Self {
            count,
            min,
            max,
            mean,
            variance,
            std_dev: variance.sqrt(),
        }
    }

    /// Statistics of `samples`; an empty slice gives the empty default.
    pub fn from_samples(samples: &[f64]) -> Self {
        let mut acc = StatisticsAccumulator::new();
        for &value in samples {
            acc.add(value);
        }
        acc.finalize()
    }

    /// Same as [`from_samples`](Self::from_samples), reduced on the rayon pool.
    pub fn par_from_samples(samples: &[f64]) -> Self {
        samples
            .par_iter()
            .fold(StatisticsAccumulator::new, |mut acc, &value| {
                acc.add(value);
                acc
            })
            .reduce(StatisticsAccumulator::new, |mut a, b| {
                a.merge(&b);
                a
            })
            .finalize()
    }

    /// Range (max - min).
    #[inline]
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Coefficient of variation (std_dev / |mean|), if mean != 0.
    #[inline]
    pub fn coefficient_of_variation(&self) -> Option<f64> {
        if self.mean.abs() > f64::EPSILON {
            Some(self.std_dev / self.mean.abs())
        } else {
            None
        }
    }
}

impl Default for EnsembleStatistics {
    fn default() -> Self {
        Self {
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            mean: 0.0,
            variance: 0.0,
            std_dev: 0.0,
        }
    }
}

/// Mergeable running sums for [`EnsembleStatistics`].
#[derive(Debug, Clone, Copy)]
pub struct StatisticsAccumulator {
    count: usize,
    sum: f64,
    sum_sq: f64,
    min: f64,
    max: f64,
}

impl StatisticsAccumulator {
    pub fn new() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            sum_sq: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    #[inline]
    pub fn add(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_sq += value * value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    #[inline]
    pub fn merge(&mut self, other: &Self) {
        self.count += other.count;
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn finalize(&self) -> EnsembleStatistics {
        if self.count == 0 {
            return EnsembleStatistics::default();
        }
        EnsembleStatistics::from_moments(self.count, self.sum, self.sum_sq, self.min, self.max)
    }
}

impl Default for StatisticsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_samples() {
        let stats = EnsembleStatistics::from_samples(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(stats.count, 5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert!((stats.mean - 3.0).abs() < 1e-12);
        assert!((stats.variance - 2.0).abs() < 1e-12, "variance = {}", stats.variance);
        assert!((stats.std_dev - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(stats.range(), 4.0);
    }

    #[test]
    fn test_empty_samples() {
        let stats = EnsembleStatistics::from_samples(&[]);
        assert_eq!(stats, EnsembleStatistics::default());
        assert_eq!(stats.coefficient_of_variation(), None);
    }

    #[test]
    fn test_constant_samples_have_zero_spread() {
        let stats = EnsembleStatistics::from_samples(&[0.1; 1000]);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.coefficient_of_variation(), Some(0.0));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let samples: Vec<f64> = (0..10_000).map(|i| (i as f64 * 0.37).sin()).collect();
        let seq = EnsembleStatistics::from_samples(&samples);
        let par = EnsembleStatistics::par_from_samples(&samples);
        assert_eq!(seq.count, par.count);
        assert_eq!(seq.min, par.min);
        assert_eq!(seq.max, par.max);
        assert!((seq.mean - par.mean).abs() < 1e-12);
        assert!((seq.variance - par.variance).abs() < 1e-12);
    }

    #[test]
    fn test_accumulator_merge() {
        let mut a = StatisticsAccumulator::new();
        let mut b = StatisticsAccumulator::new();
        for v in [1.0, 2.0] {
            a.add(v);
        }
        for v in [3.0, 4.0] {
            b.add(v);
        }
        a.merge(&b);
        let stats = a.finalize();
        assert_eq!(stats.count, 4);
        assert!((stats.mean - 2.5).abs() < 1e-12);
    }
}
