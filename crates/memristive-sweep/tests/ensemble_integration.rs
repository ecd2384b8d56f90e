//! Population sampling feeding parallel ensembles.

use memristive_core::{DeviceField, DeviceParameters};
use memristive_devices::{Waveform, YakopcicModel};
use memristive_solver::{IntegrationMethod, TimeAxis, TransientParams};
use memristive_sweep::{
    EnsembleConfig, EnsembleStatistics, ParameterVariation, run_ensemble, sample_population,
};

fn models(count: usize, seed: u64) -> Vec<YakopcicModel> {
    let variations = [
        ParameterVariation::new(DeviceField::Ap, 0.02).with_bounds(0.02, 0.2),
        ParameterVariation::new(DeviceField::Xp, 0.01).with_bounds(0.05, 0.2),
    ];
    sample_population(&DeviceParameters::default(), &variations, count, seed)
        .into_iter()
        .map(YakopcicModel::new)
        .collect()
}

#[test]
fn test_ensemble_is_reproducible_for_a_seed() {
    let drive = Waveform::sine(1.0, None, Some(5.0), None).unwrap();
    let axis = TimeAxis::until(0.0, 0.2, 1e-3).unwrap();
    let params = TransientParams::new(0.1, IntegrationMethod::RungeKutta4);
    let config = EnsembleConfig::default().with_min_parallel(1);

    let a = run_ensemble(&models(32, 5), &drive, &axis, &params, &config).unwrap();
    let b = run_ensemble(&models(32, 5), &drive, &axis, &params, &config).unwrap();
    assert_eq!(a.final_states(), b.final_states());
    assert_eq!(a.peak_currents(), b.peak_currents());
}

#[test]
fn test_variability_spreads_final_states() {
    let drive = Waveform::dc(1.0);
    let axis = TimeAxis::until(0.0, 0.05, 1e-3).unwrap();
    let params = TransientParams::new(0.05, IntegrationMethod::Euler);

    let result = run_ensemble(
        &models(64, 9),
        &drive,
        &axis,
        &params,
        &EnsembleConfig::default(),
    )
    .unwrap();

    let stats = result.final_state_statistics();
    assert_eq!(stats.count, 64);
    assert!(stats.std_dev > 0.0, "sampled devices should not all agree");
    assert!(stats.min >= 0.0 && stats.max <= 1.0, "{stats:?}");

    let nominal = run_ensemble(
        &[YakopcicModel::default()],
        &drive,
        &axis,
        &params,
        &EnsembleConfig::default(),
    )
    .unwrap();
    let nominal_final = nominal.final_states()[0];
    assert!(
        stats.min < nominal_final && nominal_final < stats.max,
        "nominal {nominal_final} outside sampled range [{}, {}]",
        stats.min,
        stats.max
    );
}

#[test]
fn test_summary_csv_written_to_disk() {
    let drive = Waveform::dc(0.5);
    let axis = TimeAxis::new(0.0, 1e-3, 20).unwrap();
    let result = run_ensemble(
        &models(5, 1),
        &drive,
        &axis,
        &TransientParams::default(),
        &EnsembleConfig::default(),
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.csv");
    result.write_summary_csv(&path, 6).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 6);

    let peaks = EnsembleStatistics::from_samples(&result.peak_currents());
    assert!(peaks.min > 0.0, "0.5 V drive should draw current: {peaks:?}");
}
