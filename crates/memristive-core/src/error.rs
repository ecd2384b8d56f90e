//! Error types for memristive-core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("device parameter {name} has invalid value: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("polarity must be 1 or -1, got {0}")]
    InvalidPolarity(f64),

    #[error("unknown device parameter: {0}")]
    UnknownParameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;
