//! Device-to-device variability and parallel ensembles.
//!
//! - [`rng`]: stateless hash-based random numbers
//! - [`sampler`]: truncated-normal parameter draws with a constant-mean fallback
//! - [`population`]: per-device parameter sets around a nominal device
//! - [`parallel`]: rayon-parallel simulation of many devices under one drive
//! - [`statistics`]: summaries over ensemble outputs
//!
//! # Usage
//!
//! ```no_run
//! use memristive_core::{DeviceField, DeviceParameters};
//! use memristive_devices::{Waveform, YakopcicModel};
//! use memristive_solver::{TimeAxis, TransientParams};
//! use memristive_sweep::{EnsembleConfig, ParameterVariation, run_ensemble, sample_population};
//!
//! let variations = [ParameterVariation::new(DeviceField::Xn, 0.01).with_bounds(0.05, 0.15)];
//! let models: Vec<YakopcicModel> =
//!     sample_population(&DeviceParameters::default(), &variations, 64, 7)
//!         .into_iter()
//!         .map(YakopcicModel::new)
//!         .collect();
//!
//! let drive = Waveform::sine(1.0, None, Some(1.0), None)?;
//! let axis = TimeAxis::until(0.0, 1.0, 1e-3)?;
//! let result = run_ensemble(&models, &drive, &axis, &TransientParams::default(), &EnsembleConfig::default())?;
//! println!("final state mean: {}", result.final_state_statistics().mean);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
pub mod parallel;
pub mod population;
pub mod rng;
pub mod sampler;
pub mod statistics;

pub use error::{Error, Result};
pub use parallel::{EnsembleConfig, EnsembleResult, run_ensemble};
pub use population::{ParameterVariation, sample_population};
pub use sampler::{
    MAX_TAIL_ATTEMPTS, ParameterDraw, TAIL_THRESHOLD, TruncatedNormal, truncated_normal,
    truncated_normal_matrix,
};
pub use statistics::{EnsembleStatistics, StatisticsAccumulator};
