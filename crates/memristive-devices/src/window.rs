//! Window functions for boundary enforcement.
//!
//! A window multiplies the state derivative and falls toward zero as the
//! state approaches 0 or 1, keeping simple drift models inside `[0, 1]`.
//! Shape parameters are not validated: a non-integer `p` with a negative
//! base yields NaN, which callers accept as part of the model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, check_lengths};

fn default_p() -> f64 {
    1.0
}

fn default_j() -> f64 {
    1.0
}

/// Heaviside step with `H(0) = 1`. NaN propagates.
#[inline]
fn heaviside(a: f64) -> f64 {
    if a.is_nan() {
        a
    } else if a >= 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Window function variant with its shape parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WindowFunction {
    /// No suppression; always 1.
    #[default]
    None,
    /// `1 - (2x - 1)^(2p)`; symmetric, zero at both boundaries.
    Joglekar {
        #[serde(default = "default_p")]
        p: f64,
    },
    /// `1 - (x - H(-i))^(2p)`; suppresses only the boundary the current
    /// is driving toward.
    Biolek {
        #[serde(default = "default_p")]
        p: f64,
    },
    /// `j * (1 - 2 * (x^3 - x + 1)^p)`.
    Anusudha {
        #[serde(default = "default_p")]
        p: f64,
        #[serde(default = "default_j")]
        j: f64,
    },
}

impl WindowFunction {
    /// Build a window by name with explicit shape parameters.
    ///
    /// `j` is only used by `anusudha`.
    pub fn from_name(name: &str, p: f64, j: f64) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(WindowFunction::None),
            "joglekar" => Ok(WindowFunction::Joglekar { p }),
            "biolek" => Ok(WindowFunction::Biolek { p }),
            "anusudha" => Ok(WindowFunction::Anusudha { p, j }),
            _ => Err(Error::UnknownWindow(name.to_string())),
        }
    }

    /// Name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            WindowFunction::None => "none",
            WindowFunction::Joglekar { .. } => "joglekar",
            WindowFunction::Biolek { .. } => "biolek",
            WindowFunction::Anusudha { .. } => "anusudha",
        }
    }

    /// Evaluate the window at state `x`.
    ///
    /// `i` is the device current; only `biolek` reads it.
    pub fn evaluate(&self, x: f64, i: f64) -> f64 {
        match *self {
            WindowFunction::None => 1.0,
            WindowFunction::Joglekar { p } => 1.0 - (2.0 * x - 1.0).powf(2.0 * p),
            WindowFunction::Biolek { p } => 1.0 - (x - heaviside(-i)).powf(2.0 * p),
            WindowFunction::Anusudha { p, j } => {
                j * (1.0 - 2.0 * (x.powi(3) - x + 1.0).powf(p))
            }
        }
    }

    /// Elementwise [`evaluate`](Self::evaluate) over paired states and currents.
    pub fn evaluate_slice(&self, x: &[f64], i: &[f64]) -> Result<Vec<f64>> {
        check_lengths(x.len(), i.len())?;
        Ok(x.iter()
            .zip(i)
            .map(|(&x, &i)| self.evaluate(x, i))
            .collect())
    }
}

impl FromStr for WindowFunction {
    type Err = Error;

    /// Parse a bare variant name with default shape parameters (`p = 1`, `j = 1`).
    fn from_str(s: &str) -> Result<Self> {
        WindowFunction::from_name(s, default_p(), default_j())
    }
}

impl fmt::Display for WindowFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowFunction::None => write!(f, "window none"),
            WindowFunction::Joglekar { p } | WindowFunction::Biolek { p } => {
                write!(f, "window {} (p = {})", self.name(), p)
            }
            WindowFunction::Anusudha { p, j } => {
                write!(f, "window anusudha (p = {}, j = {})", p, j)
            }
        }
    }
}
