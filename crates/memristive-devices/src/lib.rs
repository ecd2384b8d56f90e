//! Yakopcic memristor laws and driving waveforms.
//!
//! This crate provides:
//! - The current law: a state-weighted blend of two piecewise conduction branches
//! - The state-derivative law: voltage activation times a soft boundary term
//! - Window functions (Joglekar, Biolek, Anusudha) for simpler drift models
//! - [`MemristorModel`], the device interface the integrators drive
//! - Voltage waveforms, including spline-interpolated data, and the
//!   [`VoltageSignal`] contract

pub mod bias;
pub mod dynamics;
pub mod error;
pub mod iv;
pub mod model;
pub mod spline;
pub mod waveforms;
pub mod window;

pub use bias::Bias;
pub use dynamics::{activation, boundary, state_derivative, state_derivatives, wn, wp};
pub use error::{Error, Result};
pub use iv::{SanitizedCurrent, current, current_sanitized, currents, currents_in_place};
pub use model::{MemristorModel, YakopcicModel};
pub use spline::InterpolatingSpline;
pub use waveforms::{VoltageSignal, Waveform, WaveformConfig};
pub use window::WindowFunction;
