//! Parallel device ensembles using rayon.
//!
//! Each device owns its model and trajectory, and the drive signal and time
//! axis are shared read-only. Simulations are independent, so they map
//! directly onto rayon's work-stealing pool. Results come back in input
//! order whichever path ran.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use rayon::prelude::*;

use memristive_devices::{MemristorModel, VoltageSignal};
use memristive_solver::{TimeAxis, Trajectory, TransientParams, simulate};

use crate::error::{Error, Result};
use crate::statistics::EnsembleStatistics;

/// Configuration for ensemble execution.
#[derive(Debug, Clone)]
pub struct EnsembleConfig {
    /// Minimum devices to use parallel execution (below this, sequential is faster).
    pub min_devices_for_parallel: usize,
    /// Minimum devices per rayon task. None = rayon default.
    pub chunk_size: Option<usize>,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            min_devices_for_parallel: 4,
            chunk_size: None,
        }
    }
}

impl EnsembleConfig {
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = Some(size);
        self
    }

    pub fn with_min_parallel(mut self, min: usize) -> Self {
        self.min_devices_for_parallel = min;
        self
    }
}

/// Trajectories of every device in an ensemble.
#[derive(Debug, Clone, Default)]
pub struct EnsembleResult {
    /// One trajectory per device, in input order.
    pub trajectories: Vec<Trajectory>,
    /// Whether the rayon path ran.
    pub used_parallel: bool,
}

impl EnsembleResult {
    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    /// Final state of each device (NaN for an empty trajectory).
    pub fn final_states(&self) -> Vec<f64> {
        self.trajectories
            .iter()
            .map(|t| t.final_state().unwrap_or(f64::NAN))
            .collect()
    }

    /// Largest current magnitude of each device (NaN for an empty trajectory).
    pub fn peak_currents(&self) -> Vec<f64> {
        self.trajectories
            .iter()
            .map(|t| t.peak_current().unwrap_or(f64::NAN))
            .collect()
    }

    pub fn final_state_statistics(&self) -> EnsembleStatistics {
        EnsembleStatistics::from_samples(&self.final_states())
    }

    pub fn peak_current_statistics(&self) -> EnsembleStatistics {
        EnsembleStatistics::from_samples(&self.peak_currents())
    }

    /// One row per device: `device,final_state,peak_current`.
    pub fn summary_csv(&self, precision: usize) -> String {
        let mut out = String::from("device,final_state,peak_current\n");
        for (idx, (x, i)) in self
            .final_states()
            .into_iter()
            .zip(self.peak_currents())
            .enumerate()
        {
            let _ = writeln!(out, "{idx},{x:.prec$e},{i:.prec$e}", prec = precision);
        }
        out
    }

    pub fn write_summary_csv(&self, path: &Path, precision: usize) -> Result<()> {
        fs::write(path, self.summary_csv(precision))?;
        log::info!("wrote ensemble summary for {} devices to {}", self.len(), path.display());
        Ok(())
    }
}

/// Simulate every model in `models` under the same drive.
///
/// Runs sequentially when there are fewer than
/// `config.min_devices_for_parallel` devices or only one rayon thread.
/// The first failing device aborts the ensemble with its index.
pub fn run_ensemble<M, S>(
    models: &[M],
    signal: &S,
    axis: &TimeAxis,
    params: &TransientParams,
    config: &EnsembleConfig,
) -> Result<EnsembleResult>
where
    M: MemristorModel,
    S: VoltageSignal + ?Sized,
{
    let run = |(index, model): (usize, &M)| {
        simulate(model, signal, axis, params).map_err(|source| Error::Device { index, source })
    };

    let use_parallel =
        models.len() >= config.min_devices_for_parallel && rayon::current_num_threads() > 1;

    if !use_parallel {
        log::debug!("running {} devices sequentially", models.len());
        let trajectories = models
            .iter()
            .enumerate()
            .map(run)
            .collect::<Result<Vec<_>>>()?;
        return Ok(EnsembleResult {
            trajectories,
            used_parallel: false,
        });
    }

    log::info!(
        "running {} devices in parallel ({} threads, {} points each)",
        models.len(),
        rayon::current_num_threads(),
        axis.len()
    );

    let trajectories = match config.chunk_size {
        Some(chunk_size) => models
            .par_iter()
            .with_min_len(chunk_size.max(1))
            .enumerate()
            .map(run)
            .collect::<Result<Vec<_>>>()?,
        None => models
            .par_iter()
            .enumerate()
            .map(run)
            .collect::<Result<Vec<_>>>()?,
    };

    Ok(EnsembleResult {
        trajectories,
        used_parallel: true,
    })
}
