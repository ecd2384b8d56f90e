//! # Memristive
//!
//! Simulation of memristive devices with the Yakopcic model.
//!
//! Memristive provides:
//! - The device laws: current, state derivative, boundary and window functions
//! - Voltage drives (DC, sine, triangle, sampled data)
//! - Forward Euler and RK4 transient simulation with CSV export
//! - Truncated-normal device variability and rayon-parallel ensembles
//!
//! ## Quick Start
//!
//! ```rust
//! use memristive::prelude::*;
//!
//! let model = YakopcicModel::default();
//! let drive = Waveform::sine(1.0, None, Some(1.0), None).unwrap();
//! let axis = TimeAxis::until(0.0, 1.0, 1e-3).unwrap();
//!
//! let trajectory = simulate(&model, &drive, &axis, &TransientParams::default()).unwrap();
//! assert_eq!(trajectory.len(), axis.len());
//! ```
//!
//! ## Device Ensembles
//!
//! ```rust,no_run
//! use memristive::prelude::*;
//!
//! let variations = [ParameterVariation::new(DeviceField::Ap, 0.01).with_bounds(0.03, 0.12)];
//! let models: Vec<YakopcicModel> =
//!     sample_population(&DeviceParameters::default(), &variations, 100, 42)
//!         .into_iter()
//!         .map(YakopcicModel::new)
//!         .collect();
//!
//! let drive = Waveform::dc(1.0);
//! let axis = TimeAxis::until(0.0, 0.1, 1e-4).unwrap();
//! let result = run_ensemble(
//!     &models,
//!     &drive,
//!     &axis,
//!     &TransientParams::default(),
//!     &EnsembleConfig::default(),
//! )
//! .unwrap();
//! println!("{:?}", result.final_state_statistics());
//! ```

// Re-export member crates
pub use memristive_core as core;
pub use memristive_devices as devices;
pub use memristive_solver as solver;
pub use memristive_sweep as sweep;

// ============================================================================
// Convenient re-exports from memristive_core
// ============================================================================

pub use memristive_core::{
    DeviceField,
    DeviceParameters,
    // Errors
    Error as CoreError,
    Polarity,
    // State handling
    SNAP_TOLERANCE,
    snap_state,
};

// ============================================================================
// Convenient re-exports from memristive_devices
// ============================================================================

pub use memristive_devices::{
    // Errors
    Error as DeviceError,
    // Model
    MemristorModel,
    SanitizedCurrent,
    // Drives
    InterpolatingSpline,
    VoltageSignal,
    Waveform,
    WaveformConfig,
    WindowFunction,
    YakopcicModel,
    // Laws
    current,
    current_sanitized,
    currents,
    state_derivative,
};

// ============================================================================
// Convenient re-exports from memristive_solver
// ============================================================================

pub use memristive_solver::{
    CurrentProbe,
    // Errors
    Error as SolverError,
    IntegrationMethod,
    TimeAxis,
    Trajectory,
    TrajectoryPoint,
    TransientParams,
    integrate,
    simulate,
    write_csv,
};

// ============================================================================
// Convenient re-exports from memristive_sweep
// ============================================================================

pub use memristive_sweep::{
    EnsembleConfig,
    EnsembleResult,
    EnsembleStatistics,
    // Errors
    Error as SweepError,
    ParameterDraw,
    ParameterVariation,
    run_ensemble,
    sample_population,
    truncated_normal,
};

/// Re-export of nalgebra's dynamic matrix type.
pub use nalgebra::DMatrix;

/// Prelude module containing commonly used types and traits.
///
/// ```rust
/// use memristive::prelude::*;
/// ```
pub mod prelude {
    // Parameters
    pub use crate::{DeviceField, DeviceParameters, Polarity};

    // Models and drives
    pub use crate::{MemristorModel, VoltageSignal, Waveform, WindowFunction, YakopcicModel};

    // Simulation
    pub use crate::{IntegrationMethod, TimeAxis, Trajectory, TransientParams, simulate};

    // Ensembles
    pub use crate::{
        EnsembleConfig, EnsembleStatistics, ParameterVariation, run_ensemble, sample_population,
    };

    pub use crate::DMatrix;
}
