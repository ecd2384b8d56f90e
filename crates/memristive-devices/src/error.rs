//! Error types for memristive-devices.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown window function: {0} (expected none, joglekar, biolek or anusudha)")]
    UnknownWindow(String),

    #[error("waveform needs a frequency or a period")]
    MissingTiming,

    #[error("invalid waveform frequency: {0}")]
    InvalidFrequency(f64),

    #[error("waveform duration t_max must be positive, got {0}")]
    InvalidDuration(f64),

    #[error("invalid interpolation data: {0}")]
    InvalidInterpolation(String),

    #[error("unsupported interpolation degree {0} (expected 1 to 5)")]
    UnsupportedDegree(usize),

    #[error("interpolation system is singular")]
    SingularInterpolation,

    #[error("slice length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Core(#[from] memristive_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Check that two paired slices have the same length.
pub(crate) fn check_lengths(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::LengthMismatch { expected, actual })
    }
}
