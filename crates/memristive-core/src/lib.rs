//! Core data types for the memristive device simulator.
//!
//! This crate holds what every other crate agrees on: the Yakopcic
//! [`DeviceParameters`] record, the [`Polarity`] convention, handling of the
//! internal state variable, and SI unit helpers.

pub mod error;
pub mod params;
pub mod state;
pub mod units;

pub use error::{Error, Result};
pub use params::{DeviceField, DeviceParameters, Polarity};
pub use state::{SNAP_TOLERANCE, snap_state, snap_states_in_place};
