//! Transient simulation of a single memristor under a voltage drive.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use memristive_devices::{MemristorModel, VoltageSignal};

use crate::error::{Error, Result};
use crate::integrate::{CurrentProbe, IntegrationMethod, integrate_projected};
use crate::time_axis::TimeAxis;

/// Transient simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransientParams {
    /// Initial state variable, in [0, 1].
    pub x0: f64,
    /// Integration method.
    pub method: IntegrationMethod,
}

impl Default for TransientParams {
    fn default() -> Self {
        Self {
            x0: 0.1,
            method: IntegrationMethod::Euler,
        }
    }
}

impl TransientParams {
    pub fn new(x0: f64, method: IntegrationMethod) -> Self {
        Self { x0, method }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.x0.is_finite() || !(0.0..=1.0).contains(&self.x0) {
            return Err(Error::InvalidInitialState(self.x0));
        }
        Ok(())
    }
}

/// A single simulated point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    pub time: f64,
    pub voltage: f64,
    pub current: f64,
    /// Sanitized state; the next point is stepped from this value.
    pub state: f64,
}

/// Result of a transient simulation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    /// All computed points, in time order.
    pub points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn times(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.time).collect()
    }

    pub fn voltages(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.voltage).collect()
    }

    pub fn currents(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.current).collect()
    }

    pub fn states(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.state).collect()
    }

    pub fn last(&self) -> Option<&TrajectoryPoint> {
        self.points.last()
    }

    pub fn final_state(&self) -> Option<f64> {
        self.last().map(|p| p.state)
    }

    /// Largest current magnitude over the run.
    pub fn peak_current(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.current.abs())
            .fold(None, |acc, i| Some(acc.map_or(i, |a: f64| a.max(i))))
    }

    /// Columns: time, voltage, current, state.
    pub fn to_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.points.len(), 4, |row, col| {
            let p = &self.points[row];
            match col {
                0 => p.time,
                1 => p.voltage,
                2 => p.current,
                _ => p.state,
            }
        })
    }
}

/// Evaluates a model's current under a voltage signal.
pub struct ModelCurrentProbe<'a, M: ?Sized, S: ?Sized> {
    pub model: &'a M,
    pub signal: &'a S,
}

impl<M, S> CurrentProbe for ModelCurrentProbe<'_, M, S>
where
    M: MemristorModel + ?Sized,
    S: VoltageSignal + ?Sized,
{
    fn evaluate(&self, t: f64, x: f64) -> f64 {
        self.model.current(self.signal.voltage(t), x)
    }
}

/// Integrate the state of `model` driven by `signal` over `axis`.
///
/// The state derivative is evaluated at the instantaneous drive voltage.
/// Each state passes through [`MemristorModel::sanitize_state`] before it
/// is recorded and stepped from. Currents are recorded at every `(t[n], x[n])`, so `current[0]` is the
/// current at the initial state.
pub fn simulate<M, S>(
    model: &M,
    signal: &S,
    axis: &TimeAxis,
    params: &TransientParams,
) -> Result<Trajectory>
where
    M: MemristorModel + ?Sized,
    S: VoltageSignal + ?Sized,
{
    params.validate()?;

    log::debug!(
        "simulating {} over {} points (t = {:.3e}..{:.3e}, dt = {:.3e}, method = {})",
        model.name(),
        axis.len(),
        axis.start(),
        axis.end(),
        axis.dt(),
        params.method
    );

    let probe = ModelCurrentProbe { model, signal };
    let rhs = |t: f64, x: f64| model.state_derivative(signal.voltage(t), x);
    let out = integrate_projected(
        params.method,
        rhs,
        axis,
        params.x0,
        Some(&probe),
        |x| model.sanitize_state(x),
    );

    let currents = out.currents.unwrap_or_default();
    let points: Vec<TrajectoryPoint> = axis
        .points()
        .iter()
        .zip(&out.states)
        .zip(&currents)
        .map(|((&time, &x), &current)| TrajectoryPoint {
            time,
            voltage: signal.voltage(time),
            current,
            state: x,
        })
        .collect();

    if let Some(last) = points.last() {
        if !last.state.is_finite() {
            log::warn!(
                "{} state diverged to {} at t = {:.3e}; consider a smaller step",
                model.name(),
                last.state,
                last.time
            );
        }
    }

    Ok(Trajectory { points })
}
