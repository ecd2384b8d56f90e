//! Time integration for memristor state equations.
//!
//! This crate provides:
//! - [`TimeAxis`]: validated, uniformly spaced time grids
//! - Forward Euler and RK4 integrators over a scalar state ([`integrate`])
//! - Transient simulation of a [`MemristorModel`](memristive_devices::MemristorModel)
//!   under a voltage drive ([`simulate`])
//! - CSV export of the resulting [`Trajectory`]

pub mod error;
pub mod export;
pub mod integrate;
pub mod time_axis;
pub mod transient;

pub use error::{Error, Result};
pub use export::{CSV_HEADER, to_csv_string, write_csv};
pub use integrate::{
    CurrentProbe, Integration, IntegrationMethod, euler_step, integrate, integrate_euler,
    integrate_projected, integrate_rk4, rk4_step,
};
pub use time_axis::{MAX_POINTS, TimeAxis};
pub use transient::{ModelCurrentProbe, Trajectory, TrajectoryPoint, TransientParams, simulate};
