//! Yakopcic device parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Polarity convention of the device (`eta` in the Yakopcic equations).
///
/// `Forward` drives the state toward 1 under positive bias; `Reverse` swaps
/// the roles of the two bias directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum Polarity {
    #[default]
    Forward,
    Reverse,
}

impl Polarity {
    /// Numeric value of `eta`: `+1.0` or `-1.0`.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Polarity::Forward => 1.0,
            Polarity::Reverse => -1.0,
        }
    }
}

impl TryFrom<f64> for Polarity {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        if value == 1.0 {
            Ok(Polarity::Forward)
        } else if value == -1.0 {
            Ok(Polarity::Reverse)
        } else {
            Err(Error::InvalidPolarity(value))
        }
    }
}

impl From<Polarity> for f64 {
    fn from(p: Polarity) -> f64 {
        p.sign()
    }
}

/// Constants of the Yakopcic memristor model.
///
/// The current law blends a high-conductance branch (`gmax_*`, `bmax_*`) and
/// a low-conductance branch (`gmin_*`, `bmin_*`) by the state variable. The
/// state-derivative law uses the rate constants `a_p`/`a_n`, the activation
/// thresholds `v_p`/`v_n`, and the boundary constants `x_p`/`x_n` with decay
/// rates `alpha_p`/`alpha_n`.
///
/// Field names serialize with the conventional symbols (`Ap`, `Vn`, `xp`, ...)
/// so parameter files read like the published model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceParameters {
    /// High-branch conductance scale for `v >= 0` (A).
    pub gmax_p: f64,
    /// High-branch exponent for `v >= 0` (1/V).
    pub bmax_p: f64,
    /// High-branch conductance scale for `v < 0` (A).
    pub gmax_n: f64,
    /// High-branch exponent for `v < 0` (1/V).
    pub bmax_n: f64,
    /// Low-branch conductance scale for `v >= 0` (A).
    pub gmin_p: f64,
    /// Low-branch exponent for `v >= 0` (1/V).
    pub bmin_p: f64,
    /// Low-branch conductance scale for `v < 0` (A).
    pub gmin_n: f64,
    /// Low-branch exponent for `v < 0` (1/V).
    pub bmin_n: f64,
    /// State drift rate above the positive threshold (1/s).
    #[serde(rename = "Ap")]
    pub a_p: f64,
    /// State drift rate below the negative threshold (1/s).
    #[serde(rename = "An")]
    pub a_n: f64,
    /// Positive activation threshold (V).
    #[serde(rename = "Vp")]
    pub v_p: f64,
    /// Negative activation threshold (V).
    #[serde(rename = "Vn")]
    pub v_n: f64,
    /// State above which positive drift is damped.
    #[serde(rename = "xp")]
    pub x_p: f64,
    /// State below which negative drift is damped.
    #[serde(rename = "xn")]
    pub x_n: f64,
    /// Decay rate of the positive boundary term.
    #[serde(rename = "alphap")]
    pub alpha_p: f64,
    /// Decay rate of the negative boundary term.
    #[serde(rename = "alphan")]
    pub alpha_n: f64,
    /// Polarity convention.
    pub eta: Polarity,
}

impl Default for DeviceParameters {
    /// Reference parameter set fitted to a HfO2-style bipolar device.
    fn default() -> Self {
        Self {
            gmax_p: 4.338e-4,
            bmax_p: 4.988,
            gmax_n: 8.44e-6,
            bmax_n: 6.272,
            gmin_p: 3.136e-2,
            bmin_p: 2.226e-3,
            gmin_n: 1.45e-5,
            bmin_n: 3.295,
            a_p: 0.071,
            a_n: 0.3,
            v_p: 0.0,
            v_n: 0.0,
            x_p: 0.11,
            x_n: 0.1,
            alpha_p: 9.2,
            alpha_n: 0.7,
            eta: Polarity::Forward,
        }
    }
}

impl DeviceParameters {
    /// Set the activation thresholds.
    pub fn with_thresholds(mut self, v_p: f64, v_n: f64) -> Self {
        self.v_p = v_p;
        self.v_n = v_n;
        self
    }

    /// Set the drift rate constants.
    pub fn with_rates(mut self, a_p: f64, a_n: f64) -> Self {
        self.a_p = a_p;
        self.a_n = a_n;
        self
    }

    /// Set the boundary reference points.
    pub fn with_boundaries(mut self, x_p: f64, x_n: f64) -> Self {
        self.x_p = x_p;
        self.x_n = x_n;
        self
    }

    /// Set the boundary decay rates.
    pub fn with_decay(mut self, alpha_p: f64, alpha_n: f64) -> Self {
        self.alpha_p = alpha_p;
        self.alpha_n = alpha_n;
        self
    }

    /// Set the polarity convention.
    pub fn with_polarity(mut self, eta: Polarity) -> Self {
        self.eta = eta;
        self
    }

    /// Read a parameter by field.
    pub fn get(&self, field: DeviceField) -> f64 {
        match field {
            DeviceField::GmaxP => self.gmax_p,
            DeviceField::BmaxP => self.bmax_p,
            DeviceField::GmaxN => self.gmax_n,
            DeviceField::BmaxN => self.bmax_n,
            DeviceField::GminP => self.gmin_p,
            DeviceField::BminP => self.bmin_p,
            DeviceField::GminN => self.gmin_n,
            DeviceField::BminN => self.bmin_n,
            DeviceField::Ap => self.a_p,
            DeviceField::An => self.a_n,
            DeviceField::Vp => self.v_p,
            DeviceField::Vn => self.v_n,
            DeviceField::Xp => self.x_p,
            DeviceField::Xn => self.x_n,
            DeviceField::AlphaP => self.alpha_p,
            DeviceField::AlphaN => self.alpha_n,
        }
    }

    /// Overwrite a parameter by field.
    pub fn set(&mut self, field: DeviceField, value: f64) {
        let slot = match field {
            DeviceField::GmaxP => &mut self.gmax_p,
            DeviceField::BmaxP => &mut self.bmax_p,
            DeviceField::GmaxN => &mut self.gmax_n,
            DeviceField::BmaxN => &mut self.bmax_n,
            DeviceField::GminP => &mut self.gmin_p,
            DeviceField::BminP => &mut self.bmin_p,
            DeviceField::GminN => &mut self.gmin_n,
            DeviceField::BminN => &mut self.bmin_n,
            DeviceField::Ap => &mut self.a_p,
            DeviceField::An => &mut self.a_n,
            DeviceField::Vp => &mut self.v_p,
            DeviceField::Vn => &mut self.v_n,
            DeviceField::Xp => &mut self.x_p,
            DeviceField::Xn => &mut self.x_n,
            DeviceField::AlphaP => &mut self.alpha_p,
            DeviceField::AlphaN => &mut self.alpha_n,
        };
        *slot = value;
    }

    /// Check the parameter set for values the laws cannot evaluate.
    ///
    /// The laws themselves never call this; it is a construction-time check
    /// for callers that load parameters from files.
    pub fn validate(&self) -> Result<()> {
        for field in DeviceField::ALL {
            let value = self.get(field);
            if !value.is_finite() {
                return Err(Error::InvalidParameter {
                    name: field.name(),
                    value,
                });
            }
        }
        if self.x_n == 0.0 {
            return Err(Error::InvalidParameter {
                name: DeviceField::Xn.name(),
                value: self.x_n,
            });
        }
        if self.x_p == 1.0 {
            return Err(Error::InvalidParameter {
                name: DeviceField::Xp.name(),
                value: self.x_p,
            });
        }
        if self.v_n > self.v_p {
            return Err(Error::InvalidParameter {
                name: DeviceField::Vn.name(),
                value: self.v_n,
            });
        }
        Ok(())
    }
}

/// Identifies one numeric field of [`DeviceParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DeviceField {
    GmaxP,
    BmaxP,
    GmaxN,
    BmaxN,
    GminP,
    BminP,
    GminN,
    BminN,
    Ap,
    An,
    Vp,
    Vn,
    Xp,
    Xn,
    AlphaP,
    AlphaN,
}

impl DeviceField {
    /// Every numeric field, in declaration order.
    pub const ALL: [DeviceField; 16] = [
        DeviceField::GmaxP,
        DeviceField::BmaxP,
        DeviceField::GmaxN,
        DeviceField::BmaxN,
        DeviceField::GminP,
        DeviceField::BminP,
        DeviceField::GminN,
        DeviceField::BminN,
        DeviceField::Ap,
        DeviceField::An,
        DeviceField::Vp,
        DeviceField::Vn,
        DeviceField::Xp,
        DeviceField::Xn,
        DeviceField::AlphaP,
        DeviceField::AlphaN,
    ];

    /// Conventional symbol for the field.
    pub fn name(self) -> &'static str {
        match self {
            DeviceField::GmaxP => "gmax_p",
            DeviceField::BmaxP => "bmax_p",
            DeviceField::GmaxN => "gmax_n",
            DeviceField::BmaxN => "bmax_n",
            DeviceField::GminP => "gmin_p",
            DeviceField::BminP => "bmin_p",
            DeviceField::GminN => "gmin_n",
            DeviceField::BminN => "bmin_n",
            DeviceField::Ap => "Ap",
            DeviceField::An => "An",
            DeviceField::Vp => "Vp",
            DeviceField::Vn => "Vn",
            DeviceField::Xp => "xp",
            DeviceField::Xn => "xn",
            DeviceField::AlphaP => "alphap",
            DeviceField::AlphaN => "alphan",
        }
    }
}

impl fmt::Display for DeviceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DeviceField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        DeviceField::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownParameter(s.to_string()))
    }
}

impl TryFrom<String> for DeviceField {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<DeviceField> for String {
    fn from(field: DeviceField) -> String {
        field.name().to_string()
    }
}
