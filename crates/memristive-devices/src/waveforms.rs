//! Voltage waveforms that drive a device over time.
//!
//! The integrators only need the [`VoltageSignal`] contract. [`Waveform`]
//! provides the usual stimuli for memristor characterization: asymmetric
//! sine sweeps, triangular pulse trains that flip polarity halfway through
//! the run, and interpolated measured data.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::spline::InterpolatingSpline;

/// A voltage as a function of time.
pub trait VoltageSignal: Send + Sync {
    /// Voltage (V) at time `t` (s).
    fn voltage(&self, t: f64) -> f64;

    /// Elementwise voltage over a slice of times.
    fn voltages(&self, times: &[f64]) -> Vec<f64> {
        times.iter().map(|&t| self.voltage(t)).collect()
    }
}

impl<F> VoltageSignal for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn voltage(&self, t: f64) -> f64 {
        self(t)
    }
}

/// A time-varying voltage waveform.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Waveform {
    /// Constant voltage.
    Dc(f64),

    /// Sine with separate magnitudes per half-wave:
    /// `vp * sin(2πft)` where that is positive, `vn * sin(2πft)` elsewhere.
    Sine { vp: f64, vn: f64, frequency: f64 },

    /// Triangular pulses `|sawtooth(2πft + π/2)|`, scaled by `vp` up to
    /// `t_max / 2` and by `-vn` afterwards.
    Triangle {
        vp: f64,
        vn: f64,
        frequency: f64,
        t_max: f64,
    },

    /// Interpolating spline through sampled `(time, voltage)` data,
    /// extrapolated along its end pieces.
    Interpolated {
        points: Vec<(f64, f64)>,
        spline: InterpolatingSpline,
    },
}

/// Resolve the frequency from an optional frequency and an optional period.
///
/// A period takes precedence when both are given.
fn resolve_frequency(frequency: Option<f64>, period: Option<f64>) -> Result<f64> {
    let frequency = match (frequency, period) {
        (_, Some(period)) if period != 0.0 => 1.0 / period,
        (Some(frequency), _) if frequency != 0.0 => frequency,
        _ => return Err(Error::MissingTiming),
    };
    if frequency.is_finite() && frequency > 0.0 {
        Ok(frequency)
    } else {
        Err(Error::InvalidFrequency(frequency))
    }
}

/// Negative magnitude defaults to the positive one when absent or zero.
fn resolve_vn(vp: f64, vn: Option<f64>) -> f64 {
    match vn {
        Some(vn) if vn != 0.0 => vn,
        _ => vp,
    }
}

/// Symmetric sawtooth (`width = 0.5`) with period `2π`, ranging over `[-1, 1]`.
fn triangle_phase(phase: f64) -> f64 {
    let t = phase.rem_euclid(2.0 * PI);
    if t < PI {
        2.0 * t / PI - 1.0
    } else {
        3.0 - 2.0 * t / PI
    }
}

impl Waveform {
    /// Create a constant waveform.
    pub fn dc(value: f64) -> Self {
        Waveform::Dc(value)
    }

    /// Create a sine waveform.
    ///
    /// `vn` defaults to `vp`. Exactly one of `frequency` / `period` is needed;
    /// supplying neither is rejected.
    pub fn sine(
        vp: f64,
        vn: Option<f64>,
        frequency: Option<f64>,
        period: Option<f64>,
    ) -> Result<Self> {
        Ok(Waveform::Sine {
            vp,
            vn: resolve_vn(vp, vn),
            frequency: resolve_frequency(frequency, period)?,
        })
    }

    /// Create a triangular pulse train lasting `t_max` seconds.
    ///
    /// The polarity flip at `t_max / 2` needs a positive `t_max`.
    pub fn triangle(
        vp: f64,
        vn: Option<f64>,
        frequency: Option<f64>,
        period: Option<f64>,
        t_max: f64,
    ) -> Result<Self> {
        let frequency = resolve_frequency(frequency, period)?;
        if t_max.is_nan() || t_max <= 0.0 {
            return Err(Error::InvalidDuration(t_max));
        }
        Ok(Waveform::Triangle {
            vp,
            vn: resolve_vn(vp, vn),
            frequency,
            t_max,
        })
    }

    /// Create an interpolated waveform from sampled data.
    ///
    /// Times must be finite and strictly increasing, with at least two
    /// samples and more than `degree` of them. Degrees 1 (piecewise linear)
    /// through [`MAX_DEGREE`](crate::spline::MAX_DEGREE) are supported.
    pub fn interpolated(times: &[f64], voltages: &[f64], degree: usize) -> Result<Self> {
        if times.len() != voltages.len() {
            return Err(Error::InvalidInterpolation(format!(
                "{} times but {} voltages",
                times.len(),
                voltages.len()
            )));
        }
        if times.len() < 2 {
            return Err(Error::InvalidInterpolation(
                "at least two samples are required".to_string(),
            ));
        }
        if times.iter().chain(voltages).any(|v| !v.is_finite()) {
            return Err(Error::InvalidInterpolation(
                "samples must be finite".to_string(),
            ));
        }
        if let Some(i) = times.windows(2).position(|w| w[1] <= w[0]) {
            return Err(Error::InvalidInterpolation(format!(
                "times must be strictly increasing (index {})",
                i + 1
            )));
        }
        let spline = InterpolatingSpline::fit(times, voltages, degree)?;
        Ok(Waveform::Interpolated {
            points: times.iter().copied().zip(voltages.iter().copied()).collect(),
            spline,
        })
    }

    /// Evaluate the waveform at time `t`.
    pub fn value_at(&self, t: f64) -> f64 {
        match self {
            Waveform::Dc(v) => *v,
            Waveform::Sine { vp, vn, frequency } => eval_sine(*vp, *vn, *frequency, t),
            Waveform::Triangle {
                vp,
                vn,
                frequency,
                t_max,
            } => eval_triangle(*vp, *vn, *frequency, *t_max, t),
            Waveform::Interpolated { spline, .. } => spline.evaluate(t),
        }
    }

    /// Short name of the waveform shape.
    pub fn shape(&self) -> &'static str {
        match self {
            Waveform::Dc(_) => "dc",
            Waveform::Sine { .. } => "sine",
            Waveform::Triangle { .. } => "triangle",
            Waveform::Interpolated { .. } => "custom",
        }
    }

    /// Frequency in Hz, for periodic shapes.
    pub fn frequency(&self) -> Option<f64> {
        match self {
            Waveform::Sine { frequency, .. } | Waveform::Triangle { frequency, .. } => {
                Some(*frequency)
            }
            _ => None,
        }
    }

    /// Period in seconds, for periodic shapes.
    pub fn period(&self) -> Option<f64> {
        self.frequency().map(|f| 1.0 / f)
    }
}

impl VoltageSignal for Waveform {
    fn voltage(&self, t: f64) -> f64 {
        self.value_at(t)
    }
}

fn eval_sine(vp: f64, vn: f64, frequency: f64, t: f64) -> f64 {
    let s = (2.0 * PI * frequency * t).sin();
    let pos = vp * s;
    if pos > 0.0 { pos } else { vn * s }
}

fn eval_triangle(vp: f64, vn: f64, frequency: f64, t_max: f64, t: f64) -> f64 {
    let magnitude = triangle_phase(2.0 * PI * frequency * t + PI / 2.0).abs();
    let pos = if t > t_max / 2.0 {
        -vp * magnitude
    } else {
        vp * magnitude
    };
    if pos > 0.0 { pos } else { -vn * magnitude }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Waveform::Dc(v) => write!(f, "dc {} V", v),
            Waveform::Sine { vp, vn, frequency } => write!(
                f,
                "sine +{} / -{} V, {} Hz (period {} s)",
                vp,
                vn,
                frequency,
                1.0 / frequency
            ),
            Waveform::Triangle {
                vp,
                vn,
                frequency,
                t_max,
            } => write!(
                f,
                "triangle +{} / -{} V, {} Hz (period {} s), flips at {} s",
                vp,
                vn,
                frequency,
                1.0 / frequency,
                t_max / 2.0
            ),
            Waveform::Interpolated { points, spline } => write!(
                f,
                "custom waveform ({} samples, degree {})",
                points.len(),
                spline.degree()
            ),
        }
    }
}

fn default_magnitude() -> f64 {
    1.0
}

fn default_degree() -> usize {
    1
}

/// Serializable description of a [`Waveform`], validated by [`build`](Self::build).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum WaveformConfig {
    Dc {
        voltage: f64,
    },
    Sine {
        #[serde(default = "default_magnitude")]
        vp: f64,
        #[serde(default)]
        vn: Option<f64>,
        #[serde(default)]
        frequency: Option<f64>,
        #[serde(default)]
        period: Option<f64>,
    },
    Triangle {
        #[serde(default = "default_magnitude")]
        vp: f64,
        #[serde(default)]
        vn: Option<f64>,
        #[serde(default)]
        frequency: Option<f64>,
        #[serde(default)]
        period: Option<f64>,
        /// Defaults to the simulation length when left out.
        #[serde(default)]
        t_max: Option<f64>,
    },
    Interpolated {
        times: Vec<f64>,
        voltages: Vec<f64>,
        #[serde(default = "default_degree")]
        degree: usize,
    },
}

impl Default for WaveformConfig {
    fn default() -> Self {
        WaveformConfig::Sine {
            vp: 1.0,
            vn: None,
            frequency: Some(1.0),
            period: None,
        }
    }
}

impl WaveformConfig {
    /// Fill an unspecified triangle duration.
    pub fn with_default_duration(mut self, duration: f64) -> Self {
        if let WaveformConfig::Triangle { t_max, .. } = &mut self {
            t_max.get_or_insert(duration);
        }
        self
    }

    /// Validate and build the waveform.
    pub fn build(&self) -> Result<Waveform> {
        match self {
            WaveformConfig::Dc { voltage } => Ok(Waveform::dc(*voltage)),
            WaveformConfig::Sine {
                vp,
                vn,
                frequency,
                period,
            } => Waveform::sine(*vp, *vn, *frequency, *period),
            WaveformConfig::Triangle {
                vp,
                vn,
                frequency,
                period,
                t_max,
            } => Waveform::triangle(*vp, *vn, *frequency, *period, t_max.unwrap_or(0.0)),
            WaveformConfig::Interpolated {
                times,
                voltages,
                degree,
            } => Waveform::interpolated(times, voltages, *degree),
        }
    }
}
