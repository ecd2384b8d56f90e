//! Device models as seen by the integrators.

use std::fmt;

use memristive_core::{DeviceParameters, snap_state};
use serde::{Deserialize, Serialize};

use crate::dynamics;
use crate::iv;
use crate::window::WindowFunction;

/// Physical behavior of a two-terminal memristive device.
///
/// Implementations must be pure: the same `(v, x)` always gives the same
/// result, so independent simulations can share a model across threads.
pub trait MemristorModel: Send + Sync {
    /// Device current (A) at bias `v` and state `x`.
    fn current(&self, v: f64, x: f64) -> f64;

    /// Rate of change of the state (1/s) at bias `v` and state `x`.
    fn state_derivative(&self, v: f64, x: f64) -> f64;

    /// Short model name for logs and reports.
    fn name(&self) -> &str;

    /// The state value the current law actually reads for `x`.
    ///
    /// Simulators store this value in their trajectories. Defaults to `x`.
    fn sanitize_state(&self, x: f64) -> f64 {
        x
    }
}

/// The Yakopcic memristor: current law, state-derivative law, and an
/// optional extra window on top of the built-in boundary term.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct YakopcicModel {
    /// Model constants.
    pub params: DeviceParameters,
    /// Extra window multiplier. `WindowFunction::None` leaves the
    /// state-derivative law untouched.
    #[serde(default)]
    pub window: WindowFunction,
}

impl YakopcicModel {
    /// Create a model with no extra window.
    pub fn new(params: DeviceParameters) -> Self {
        Self {
            params,
            window: WindowFunction::None,
        }
    }

    /// Apply an extra window function to the state derivative.
    pub fn with_window(mut self, window: WindowFunction) -> Self {
        self.window = window;
        self
    }
}

impl MemristorModel for YakopcicModel {
    fn current(&self, v: f64, x: f64) -> f64 {
        iv::current(v, x, &self.params)
    }

    fn state_derivative(&self, v: f64, x: f64) -> f64 {
        let rate = dynamics::state_derivative(v, x, &self.params);
        match self.window {
            WindowFunction::None => rate,
            window => rate * window.evaluate(x, self.current(v, x)),
        }
    }

    fn name(&self) -> &str {
        "yakopcic"
    }

    fn sanitize_state(&self, x: f64) -> f64 {
        snap_state(x)
    }
}

impl fmt::Display for YakopcicModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.params;
        write!(
            f,
            "yakopcic (Ap = {}, An = {}, Vp = {}, Vn = {}, xp = {}, xn = {}, eta = {}), {}",
            p.a_p,
            p.a_n,
            p.v_p,
            p.v_n,
            p.x_p,
            p.x_n,
            p.eta.sign(),
            self.window
        )
    }
}
