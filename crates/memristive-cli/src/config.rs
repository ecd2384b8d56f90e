//! JSON simulation configuration.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use memristive_core::DeviceParameters;
use memristive_devices::{Waveform, WaveformConfig, WindowFunction, YakopcicModel};
use memristive_solver::{IntegrationMethod, TimeAxis, TransientParams};
use memristive_sweep::ParameterVariation;

/// Everything needed for one run. Every field has a default, so `{}` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Nominal device parameters.
    pub device: DeviceParameters,
    /// Extra window multiplier on the state derivative.
    pub window: WindowFunction,
    pub waveform: WaveformConfig,
    /// Initial state.
    pub x0: f64,
    /// Time step (s).
    pub dt: f64,
    /// Simulated duration (s).
    pub t_max: f64,
    pub method: IntegrationMethod,
    /// Number of devices. More than one runs an ensemble.
    pub devices: usize,
    /// Seed for parameter variability.
    pub seed: u64,
    pub variations: Vec<ParameterVariation>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            device: DeviceParameters::default(),
            window: WindowFunction::None,
            waveform: WaveformConfig::default(),
            x0: 0.1,
            dt: 1e-4,
            t_max: 1.0,
            method: IntegrationMethod::Euler,
            devices: 1,
            seed: 0,
            variations: Vec::new(),
        }
    }
}

impl SimulationConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: SimulationConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.device.validate().context("Invalid device parameters")?;
        ensure!(self.devices >= 1, "devices must be at least 1");
        ensure!(
            self.t_max > 0.0 && self.t_max.is_finite(),
            "t_max must be positive, got {}",
            self.t_max
        );
        Ok(())
    }

    pub fn model(&self) -> YakopcicModel {
        YakopcicModel::new(self.device).with_window(self.window)
    }

    pub fn waveform(&self) -> Result<Waveform> {
        self.waveform
            .clone()
            .with_default_duration(self.t_max)
            .build()
            .context("Invalid waveform")
    }

    pub fn time_axis(&self) -> Result<TimeAxis> {
        TimeAxis::until(0.0, self.t_max, self.dt).context("Invalid time axis")
    }

    pub fn transient_params(&self) -> TransientParams {
        TransientParams::new(self.x0, self.method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memristive_core::{DeviceField, Polarity};
    use std::io::Write;

    #[test]
    fn empty_object_is_default() {
        let config: SimulationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SimulationConfig::default());
        config.validate().unwrap();
        assert_eq!(config.time_axis().unwrap().len(), 10_001);
    }

    #[test]
    fn partial_config_overrides_fields() {
        let json = r#"{
            "device": {"Ap": 0.5, "eta": -1},
            "window": {"type": "joglekar", "p": 2},
            "waveform": {"shape": "triangle", "vp": 1.2, "frequency": 2},
            "method": "rk4",
            "t_max": 0.5,
            "devices": 8,
            "variations": [{"field": "xn", "sd": 0.01, "low": 0.05, "upp": 0.15}]
        }"#;
        let config: SimulationConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.device.a_p, 0.5);
        assert_eq!(config.device.eta, Polarity::Reverse);
        assert_eq!(config.device.x_n, DeviceParameters::default().x_n);
        assert_eq!(config.window, WindowFunction::Joglekar { p: 2.0 });
        assert_eq!(config.method, IntegrationMethod::RungeKutta4);
        assert_eq!(config.variations[0].field, DeviceField::Xn);
        assert_eq!(config.x0, 0.1);

        // Triangle picks up t_max from the run length.
        match config.waveform().unwrap() {
            Waveform::Triangle { t_max, .. } => assert_eq!(t_max, 0.5),
            other => panic!("expected triangle, got {other}"),
        }
    }

    #[test]
    fn validate_rejects_bad_runs() {
        let mut config = SimulationConfig::default();
        config.devices = 0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.device.x_n = 0.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.t_max = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn tiny_step_is_an_error_not_a_panic() {
        let mut config = SimulationConfig::default();
        config.dt = 1e-300;
        let err = config.time_axis().unwrap_err();
        assert!(err.to_string().contains("Invalid time axis"), "{err}");
    }

    #[test]
    fn load_reads_file_and_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, r#"{{"x0": 0.3, "dt": 0.001}}"#).unwrap();

        let config = SimulationConfig::load(&path).unwrap();
        assert_eq!(config.x0, 0.3);
        assert_eq!(config.dt, 0.001);

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        let err = SimulationConfig::load(&bad).unwrap_err();
        assert!(err.to_string().contains("Invalid config"), "{err}");

        assert!(SimulationConfig::load(&dir.path().join("missing.json")).is_err());
    }
}
