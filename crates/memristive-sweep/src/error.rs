//! Error types for memristive-sweep.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("device {index} failed: {source}")]
    Device {
        index: usize,
        #[source]
        source: memristive_solver::Error,
    },

    #[error("solver error: {0}")]
    Solver(#[from] memristive_solver::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
