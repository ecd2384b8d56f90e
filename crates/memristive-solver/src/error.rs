//! Error types for memristive-solver.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("time axis must contain at least one point")]
    EmptyTimeAxis,

    #[error("invalid time step: {0}")]
    InvalidTimeStep(f64),

    #[error("invalid time span: start {start}, end {end}")]
    InvalidTimeSpan { start: f64, end: f64 },

    #[error("time axis would need {requested} points, more than the limit of {limit}")]
    TooManyPoints { requested: f64, limit: usize },

    #[error("time axis is not strictly increasing at index {index}")]
    NonIncreasingTime { index: usize },

    #[error("time axis spacing is not uniform at index {index}: expected {expected}, got {actual}")]
    NonUniformTime {
        index: usize,
        expected: f64,
        actual: f64,
    },

    #[error("initial state must lie in [0, 1], got {0}")]
    InvalidInitialState(f64),

    #[error("device error: {0}")]
    Device(#[from] memristive_devices::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
