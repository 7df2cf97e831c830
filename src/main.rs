use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{ArgAction, Parser};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use parabolic_sim::core::params::EARTH_GRAVITY_MPS2;
use parabolic_sim::engine::config::ConfigFile;
use parabolic_sim::engine::metrics::FlightComparison;
use parabolic_sim::io::{csv, plot, write_json};
use parabolic_sim::{DerivedResults, GravityPreset, LaunchParameters, SimulationEngine};

const DEFAULT_SPEED_MPS: f64 = 20.0;
const DEFAULT_ANGLE_DEG: f64 = 45.0;

/// Solve a flat-ground projectile flight in closed form and replay it
/// through the fixed-step engine.
#[derive(Parser, Debug)]
#[command(name = "parabolic_sim", version, about)]
struct Cli {
    /// Launch speed (m/s)
    #[arg(short, long)]
    speed: Option<f64>,

    /// Launch angle above horizontal (degrees)
    #[arg(short, long, allow_negative_numbers = true)]
    angle: Option<f64>,

    /// Gravitational acceleration (m/s^2); overrides --preset
    #[arg(short, long)]
    gravity: Option<f64>,

    /// Named gravity environment
    #[arg(long, value_enum)]
    preset: Option<GravityPreset>,

    /// TOML file with [engine] and [launch] sections
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Clamp the angle into the configured range instead of rejecting it
    #[arg(long)]
    clamp: bool,

    /// Print the final engine snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Write the stepped trajectory as CSV
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Render an SVG chart; without a path a timestamped file name is used
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    plot: Option<Option<PathBuf>>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn resolve_parameters(cli: &Cli, file: &ConfigFile) -> Result<LaunchParameters> {
    let fallback = file.launch;
    let speed = cli
        .speed
        .or(fallback.map(|p| p.speed_mps()))
        .unwrap_or(DEFAULT_SPEED_MPS);
    let mut angle = cli
        .angle
        .or(fallback.map(|p| p.angle_deg()))
        .unwrap_or(DEFAULT_ANGLE_DEG);
    let gravity = cli
        .gravity
        .or(cli.preset.map(GravityPreset::gravity_mps2))
        .or(fallback.map(|p| p.gravity_mps2()))
        .unwrap_or(EARTH_GRAVITY_MPS2);

    if cli.clamp {
        let clamped = file.engine.clamp_angle(angle);
        if clamped != angle {
            info!(requested = angle, clamped, "angle clamped to configured range");
        }
        angle = clamped;
    }

    Ok(LaunchParameters::new(speed, angle, gravity)?)
}

fn print_report(
    params: &LaunchParameters,
    results: &DerivedResults,
    cmp: Option<&FlightComparison>,
) {
    println!(
        "Launch: {:.2} m/s at {:.2} deg, g = {:.3} m/s^2",
        params.speed_mps(),
        params.angle_deg(),
        params.gravity_mps2()
    );
    println!();
    println!(
        "Initial velocity:   ({:.4}, {:.4}) m/s",
        results.initial_velocity_x, results.initial_velocity_y
    );
    println!("Time to max height: {:.4} s", results.time_to_max_height);
    println!("Time of flight:     {:.4} s", results.time_of_flight);
    println!("Max height:         {:.4} m", results.max_height);
    println!("Horizontal range:   {:.4} m", results.horizontal_range);

    if let Some(cmp) = cmp {
        println!();
        println!("Stepped replay ({} samples):", cmp.samples);
        println!(
            "  peak   {:.4} m (closed form {:.4} m, off by {:.4} m)",
            cmp.sampled_peak_m, cmp.analytic_peak_m, cmp.peak_error_m
        );
        println!(
            "  range  {:.4} m (closed form {:.4} m, off by {:.4} m)",
            cmp.sampled_range_m, cmp.analytic_range_m, cmp.range_error_m
        );
        println!(
            "  flight {:.4} s, launch speed {:.4} m/s, landing speed {:.4} m/s",
            cmp.sampled_flight_time_s, cmp.launch_speed_mps, cmp.landing_speed_mps
        );
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file = match &cli.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    file.engine.validate()?;
    debug!(engine = ?file.engine, "engine configuration");

    let params = resolve_parameters(&cli, &file)?;
    let mut engine = SimulationEngine::manual(file.engine, params)?;
    engine.play()?;

    let results = engine.results();
    let max_frames = (results.time_of_flight / file.engine.time_step_s).ceil() as usize + 2;
    let frames = engine.run_until_settled(max_frames);
    info!(frames, phase = engine.phase().label(), "replay finished");

    if cli.json {
        write_json(&mut io::stdout().lock(), &engine.snapshot())?;
    } else {
        print_report(&params, &results, engine.comparison().as_ref());
    }

    if let Some(path) = &cli.csv {
        csv::write_trajectory_file(path, engine.trajectory())
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "trajectory CSV written");
    }

    if let Some(target) = &cli.plot {
        let path = target
            .clone()
            .unwrap_or_else(|| plot::default_plot_path(Local::now()));
        plot::write_trajectory_svg(&path, engine.trajectory(), &results, params.gravity_mps2())
            .with_context(|| format!("plotting {}", path.display()))?;
        info!(path = %path.display(), "trajectory plot written");
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("parabolic_sim").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_without_flags_or_file() {
        let params = resolve_parameters(&parse(&[]), &ConfigFile::default()).expect("defaults");
        assert_eq!(params, LaunchParameters::default());
    }

    #[test]
    fn flags_override_config_launch() {
        let file = ConfigFile::from_toml_str(
            "[launch]\nspeed_mps = 12.0\nangle_deg = 30.0\ngravity_mps2 = 3.71\n",
        )
        .expect("config");
        let params = resolve_parameters(&parse(&["--speed", "18"]), &file).expect("params");
        assert_eq!(params.speed_mps(), 18.0);
        assert_eq!(params.angle_deg(), 30.0);
        assert_eq!(params.gravity_mps2(), 3.71);

        let moon = resolve_parameters(&parse(&["--preset", "moon"]), &file).expect("params");
        assert_eq!(moon.gravity_mps2(), 1.62);
    }

    #[test]
    fn clamp_flag_pulls_angle_into_range() {
        let cli = parse(&["--angle", "90", "--clamp"]);
        let params = resolve_parameters(&cli, &ConfigFile::default()).expect("clamped params");
        assert_eq!(params.angle_deg(), 85.0);
    }

    #[test]
    fn invalid_gravity_is_reported() {
        let err = resolve_parameters(&parse(&["--gravity", "0"]), &ConfigFile::default())
            .expect_err("zero gravity should fail");
        assert!(err.to_string().contains("gravity"));
    }

    #[test]
    fn plot_flag_accepts_optional_path() {
        assert_eq!(parse(&["--plot"]).plot, Some(None));
        assert_eq!(
            parse(&["--plot", "out.svg"]).plot,
            Some(Some(PathBuf::from("out.svg")))
        );
        assert_eq!(parse(&[]).plot, None);
    }
}
