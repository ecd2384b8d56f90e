//! Explicit fixed-step integrators for scalar state equations.
//!
//! Both integrators return the full trajectory: one state per point of the
//! time axis, with `states[0]` equal to the initial value. An optional
//! [`CurrentProbe`] is evaluated at every `(t[n], x[n])` pair so callers can
//! record an observable alongside the state without a second pass.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::time_axis::TimeAxis;

/// Fixed-step integration scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntegrationMethod {
    /// Forward Euler (first order).
    #[default]
    #[serde(rename = "euler")]
    Euler,
    /// Classic fourth-order Runge-Kutta.
    #[serde(rename = "rk4")]
    RungeKutta4,
}

impl IntegrationMethod {
    pub fn name(&self) -> &'static str {
        match self {
            IntegrationMethod::Euler => "euler",
            IntegrationMethod::RungeKutta4 => "rk4",
        }
    }

    /// Convergence order of the global error.
    pub fn order(&self) -> u32 {
        match self {
            IntegrationMethod::Euler => 1,
            IntegrationMethod::RungeKutta4 => 4,
        }
    }
}

impl fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IntegrationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "euler" => Ok(IntegrationMethod::Euler),
            "rk4" | "runge-kutta4" | "rungekutta4" => Ok(IntegrationMethod::RungeKutta4),
            other => Err(format!("unknown integration method '{other}' (expected euler or rk4)")),
        }
    }
}

/// Observable evaluated alongside the state at each time point.
pub trait CurrentProbe {
    fn evaluate(&self, t: f64, x: f64) -> f64;
}

impl<F> CurrentProbe for F
where
    F: Fn(f64, f64) -> f64,
{
    fn evaluate(&self, t: f64, x: f64) -> f64 {
        self(t, x)
    }
}

/// Output of a fixed-step integration.
#[derive(Debug, Clone, PartialEq)]
pub struct Integration {
    /// State at every point of the time axis.
    pub states: Vec<f64>,
    /// Probe values at every point, when a probe was supplied.
    pub currents: Option<Vec<f64>>,
}

impl Integration {
    pub fn final_state(&self) -> f64 {
        self.states[self.states.len() - 1]
    }
}

/// One forward Euler step: `x + f(t, x)·dt`.
#[inline]
pub fn euler_step<F>(rhs: &F, t: f64, x: f64, dt: f64) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    x + rhs(t, x) * dt
}

/// One classic RK4 step from `(t, x)`.
#[inline]
pub fn rk4_step<F>(rhs: &F, t: f64, x: f64, dt: f64) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    let half = 0.5 * dt;
    let k1 = rhs(t, x);
    let k2 = rhs(t + half, x + half * k1);
    let k3 = rhs(t + half, x + half * k2);
    let k4 = rhs(t + dt, x + dt * k3);
    x + dt / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4)
}

/// Integrate `dx/dt = rhs(t, x)` over `axis` with forward Euler.
pub fn integrate_euler<F>(
    rhs: F,
    axis: &TimeAxis,
    x0: f64,
    probe: Option<&dyn CurrentProbe>,
) -> Integration
where
    F: Fn(f64, f64) -> f64,
{
    march(axis, x0, probe, |t, x, dt| euler_step(&rhs, t, x, dt), identity)
}

/// Integrate `dx/dt = rhs(t, x)` over `axis` with classic RK4.
pub fn integrate_rk4<F>(
    rhs: F,
    axis: &TimeAxis,
    x0: f64,
    probe: Option<&dyn CurrentProbe>,
) -> Integration
where
    F: Fn(f64, f64) -> f64,
{
    march(axis, x0, probe, |t, x, dt| rk4_step(&rhs, t, x, dt), identity)
}

/// Dispatch to the integrator selected by `method`.
pub fn integrate<F>(
    method: IntegrationMethod,
    rhs: F,
    axis: &TimeAxis,
    x0: f64,
    probe: Option<&dyn CurrentProbe>,
) -> Integration
where
    F: Fn(f64, f64) -> f64,
{
    match method {
        IntegrationMethod::Euler => integrate_euler(rhs, axis, x0, probe),
        IntegrationMethod::RungeKutta4 => integrate_rk4(rhs, axis, x0, probe),
    }
}

/// Like [`integrate`], but every state passes through `project` before it
/// is recorded, probed and stepped from.
pub fn integrate_projected<F, P>(
    method: IntegrationMethod,
    rhs: F,
    axis: &TimeAxis,
    x0: f64,
    probe: Option<&dyn CurrentProbe>,
    project: P,
) -> Integration
where
    F: Fn(f64, f64) -> f64,
    P: Fn(f64) -> f64,
{
    match method {
        IntegrationMethod::Euler => {
            march(axis, x0, probe, |t, x, dt| euler_step(&rhs, t, x, dt), project)
        }
        IntegrationMethod::RungeKutta4 => {
            march(axis, x0, probe, |t, x, dt| rk4_step(&rhs, t, x, dt), project)
        }
    }
}

#[inline]
fn identity(x: f64) -> f64 {
    x
}

fn march<S, P>(
    axis: &TimeAxis,
    x0: f64,
    probe: Option<&dyn CurrentProbe>,
    step: S,
    project: P,
) -> Integration
where
    S: Fn(f64, f64, f64) -> f64,
    P: Fn(f64) -> f64,
{
    let times = axis.points();
    let dt = axis.dt();

    let mut states = Vec::with_capacity(times.len());
    let mut currents = probe.map(|_| Vec::with_capacity(times.len()));

    let mut x = project(x0);
    for (n, &t) in times.iter().enumerate() {
        if n > 0 {
            x = project(step(times[n - 1], x, dt));
        }
        states.push(x);
        if let (Some(probe), Some(currents)) = (probe, currents.as_mut()) {
            currents.push(probe.evaluate(t, x));
        }
    }

    Integration { states, currents }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decay(_t: f64, x: f64) -> f64 {
        -x
    }

    fn final_error(method: IntegrationMethod, dt: f64) -> f64 {
        let axis = TimeAxis::until(0.0, 1.0, dt).unwrap();
        let out = integrate(method, decay, &axis, 1.0, None);
        (out.final_state() - (-axis.end()).exp()).abs()
    }

    #[test]
    fn trajectory_covers_every_time_point() {
        let axis = TimeAxis::new(0.0, 0.1, 25).unwrap();
        for method in [IntegrationMethod::Euler, IntegrationMethod::RungeKutta4] {
            let out = integrate(method, decay, &axis, 1.0, None);
            assert_eq!(out.states.len(), 25, "{method} trajectory length");
            assert_eq!(out.states[0], 1.0, "{method} initial state");
            assert!(out.currents.is_none());
        }
    }

    #[test]
    fn euler_matches_hand_computed_steps() {
        let axis = TimeAxis::new(0.0, 0.5, 3).unwrap();
        let out = integrate_euler(decay, &axis, 1.0, None);
        assert_eq!(out.states, vec![1.0, 0.5, 0.25]);
    }

    #[test]
    fn euler_uses_start_of_step_time() {
        let axis = TimeAxis::new(0.0, 1.0, 3).unwrap();
        let out = integrate_euler(|t, _x| t, &axis, 0.0, None);
        // x1 = 0 + 0·1, x2 = 0 + 1·1
        assert_eq!(out.states, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn rk4_is_exact_for_cubic_in_time() {
        let axis = TimeAxis::new(0.0, 0.25, 9).unwrap();
        let out = integrate_rk4(|t, _x| 3.0 * t * t, &axis, 0.0, None);
        for (t, x) in axis.points().iter().zip(&out.states) {
            assert!((x - t.powi(3)).abs() < 1e-12, "x({t}) = {x}, expected {}", t.powi(3));
        }
    }

    #[test]
    fn decay_converges_at_expected_order() {
        let euler_ratio = final_error(IntegrationMethod::Euler, 0.01)
            / final_error(IntegrationMethod::Euler, 0.005);
        let rk4_ratio = final_error(IntegrationMethod::RungeKutta4, 0.01)
            / final_error(IntegrationMethod::RungeKutta4, 0.005);

        assert!(
            (euler_ratio - 2.0).abs() < 0.1,
            "Euler error ratio {euler_ratio} (expected ~2)"
        );
        assert!(
            (rk4_ratio - 16.0).abs() < 1.5,
            "RK4 error ratio {rk4_ratio} (expected ~16)"
        );
        assert!(final_error(IntegrationMethod::RungeKutta4, 0.01) < 1e-9);
    }

    #[test]
    fn probe_sees_each_time_and_state() {
        let axis = TimeAxis::new(0.0, 0.5, 3).unwrap();
        let probe = |t: f64, x: f64| 10.0 * t + x;
        let out = integrate_euler(decay, &axis, 1.0, Some(&probe));
        let currents = out.currents.expect("probe values");
        assert_eq!(currents, vec![1.0, 5.5, 10.25]);
    }

    #[test]
    fn projected_state_is_carried_forward() {
        let axis = TimeAxis::new(0.0, 0.1, 5).unwrap();
        let reset = |x: f64| if x > 0.5 { 0.0 } else { x };
        let probe = |_t: f64, x: f64| x;
        let out = integrate_projected(
            IntegrationMethod::Euler,
            |_t, _x| 1.0,
            &axis,
            0.4,
            Some(&probe),
            reset,
        );
        assert_eq!(out.states, vec![0.4, 0.5, 0.0, 0.1, 0.2]);
        assert_eq!(out.currents.as_deref(), Some(out.states.as_slice()));
    }

    #[test]
    fn single_point_axis_returns_initial_state() {
        let axis = TimeAxis::from_points(vec![2.0]).unwrap();
        let out = integrate_rk4(decay, &axis, 0.4, None);
        assert_eq!(out.states, vec![0.4]);
    }

    #[test]
    fn method_parsing() {
        assert_eq!("Euler".parse::<IntegrationMethod>(), Ok(IntegrationMethod::Euler));
        assert_eq!("rk4".parse::<IntegrationMethod>(), Ok(IntegrationMethod::RungeKutta4));
        assert!("midpoint".parse::<IntegrationMethod>().is_err());
        let json = serde_json::to_string(&IntegrationMethod::RungeKutta4).unwrap();
        assert_eq!(json, "\"rk4\"");
    }
}
