use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

// Define modules used by main
mod integrator;
mod physics;
mod report;
mod simulation;

use lorentz_common::SimulationConfig;

/// Integrates a charged particle through constant electric and magnetic fields
/// and prints sampled trajectories.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Optional TOML config overriding the particle, timing, initial conditions and output
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scenario to run (uniformB, combinedEB, crossedEB); repeat to run several.
    /// Defaults to the config's run list.
    #[arg(short, long = "scenario")]
    scenarios: Vec<String>,
}

fn main() -> Result<()> {
    // Initialize the logger. Logs go to stderr; stdout carries only the report.
    env_logger::init();
    let args = Args::parse();

    info!("Starting Lorentz force simulation...");

    // --- Load Configuration ---
    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            SimulationConfig::load(path)?
        }
        None => {
            info!("No config file given, using built-in electron parameters.");
            SimulationConfig::default()
        }
    };
    let params = config.get_sim_params();
    debug!("Simulation Parameters: {:#?}", params);

    let scenarios = if args.scenarios.is_empty() {
        config.run.scenarios.clone()
    } else {
        args.scenarios
    };
    info!("Scenarios: {:?}", scenarios);

    // --- Run and Report ---
    let start_time = Instant::now();
    let report = report::render_run(&scenarios, &params);
    info!("All runs finished in {:.3} seconds.", start_time.elapsed().as_secs_f64());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    out.write_all(report.as_bytes()).context("Failed to write report to stdout")?;
    out.flush().context("Failed to flush stdout")?;

    Ok(())
}
