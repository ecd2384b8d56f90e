//! Memristor simulator command-line interface.

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use memristive_core::units::{format_value, format_with_unit, parse_value};
use memristive_devices::YakopcicModel;
use memristive_solver::{IntegrationMethod, Trajectory, simulate, write_csv};
use memristive_sweep::{EnsembleConfig, EnsembleStatistics, run_ensemble, sample_population};

use crate::config::SimulationConfig;

#[derive(Parser)]
#[command(name = "memristive")]
#[command(about = "Transient simulation of Yakopcic memristors", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON simulation config (defaults are used when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// CSV output: the trajectory for one device, a per-device summary for an ensemble
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Integration method: euler or rk4
    #[arg(long)]
    method: Option<IntegrationMethod>,

    /// Time step, SI suffixes allowed (e.g. 10u)
    #[arg(long, value_parser = parse_si)]
    dt: Option<f64>,

    /// Simulated duration, SI suffixes allowed (e.g. 500m)
    #[arg(long, value_parser = parse_si)]
    t_max: Option<f64>,

    /// Initial state in [0, 1]
    #[arg(long)]
    x0: Option<f64>,

    /// Number of devices to simulate
    #[arg(long)]
    devices: Option<usize>,

    /// Seed for device variability
    #[arg(long)]
    seed: Option<u64>,

    /// Digits after the decimal point in CSV output
    #[arg(long, default_value_t = 6)]
    precision: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_si(s: &str) -> std::result::Result<f64, String> {
    parse_value(s).ok_or_else(|| format!("invalid value '{s}'"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let mut config = match &cli.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    apply_overrides(&mut config, &cli);
    config.validate()?;

    if config.devices == 1 {
        run_single(&config, &cli)
    } else {
        run_ensemble_mode(&config, &cli)
    }
}

fn apply_overrides(config: &mut SimulationConfig, cli: &Cli) {
    if let Some(method) = cli.method {
        config.method = method;
    }
    if let Some(dt) = cli.dt {
        config.dt = dt;
    }
    if let Some(t_max) = cli.t_max {
        config.t_max = t_max;
    }
    if let Some(x0) = cli.x0 {
        config.x0 = x0;
    }
    if let Some(devices) = cli.devices {
        config.devices = devices;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
}

fn print_header(config: &SimulationConfig, model: &YakopcicModel, drive: &impl std::fmt::Display) {
    println!("Memristor Transient Simulation");
    println!("==============================");
    println!();
    println!("Model:    {}", model);
    println!("Drive:    {}", drive);
    println!(
        "Time:     0 .. {}s, dt = {}s ({})",
        format_value(config.t_max),
        format_value(config.dt),
        config.method
    );
    println!("x0:       {}", config.x0);
    println!();
}

fn run_single(config: &SimulationConfig, cli: &Cli) -> Result<()> {
    let model = config.model();
    let drive = config.waveform()?;
    let axis = config.time_axis()?;
    print_header(config, &model, &drive);

    let trajectory = simulate(&model, &drive, &axis, &config.transient_params())
        .context("Simulation failed")?;
    print_trajectory_summary(&trajectory);

    if let Some(path) = &cli.output {
        write_csv(&trajectory, path, cli.precision)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Trajectory written to {}", path.display());
    }
    Ok(())
}

fn print_trajectory_summary(trajectory: &Trajectory) {
    let Some(last) = trajectory.last() else {
        return;
    };
    let states = EnsembleStatistics::from_samples(&trajectory.states());

    println!("Points:        {}", trajectory.len());
    println!("Final state:   {:.6}", last.state);
    println!("State range:   {:.6} .. {:.6}", states.min, states.max);
    if let Some(peak) = trajectory.peak_current() {
        println!("Peak current:  {}", format_with_unit(peak, "A"));
    }
    println!();
}

fn run_ensemble_mode(config: &SimulationConfig, cli: &Cli) -> Result<()> {
    let nominal = config.model();
    let drive = config.waveform()?;
    let axis = config.time_axis()?;
    print_header(config, &nominal, &drive);

    let models: Vec<YakopcicModel> =
        sample_population(&config.device, &config.variations, config.devices, config.seed)
            .into_iter()
            .map(|params| YakopcicModel::new(params).with_window(config.window))
            .collect();

    let result = run_ensemble(
        &models,
        &drive,
        &axis,
        &config.transient_params(),
        &EnsembleConfig::default(),
    )
    .context("Ensemble simulation failed")?;

    let finals = result.final_state_statistics();
    let peaks = result.peak_current_statistics();

    println!("Ensemble of {} devices (seed {})", result.len(), config.seed);
    println!("{}", "-".repeat(56));
    println!("{:<14} {:>12} {:>12} {:>12}", "", "mean", "std dev", "range");
    println!(
        "{:<14} {:>12.6} {:>12.6} {:>12.6}",
        "final state",
        finals.mean,
        finals.std_dev,
        finals.range()
    );
    println!(
        "{:<14} {:>12} {:>12} {:>12}",
        "peak current",
        format_with_unit(peaks.mean, "A"),
        format_with_unit(peaks.std_dev, "A"),
        format_with_unit(peaks.range(), "A")
    );
    println!();

    if let Some(path) = &cli.output {
        result
            .write_summary_csv(path, cli.precision)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Summary written to {}", path.display());
    }
    Ok(())
}
