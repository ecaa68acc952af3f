use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use maritime_router_core::ocean::{OceanQuery, OceanResult, Timestamp};
use maritime_router_core::vessel::AdmiraltyVessel;
use maritime_router_core::{optimize, Algorithm as CoreAlgorithm, JobSpec, ObjectiveWeights, OptimizeResult, Waypoint};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Maritime multi-objective route optimization",
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct GlobalOptions {
    /// Select the output format for CLI responses.
    #[arg(long, value_enum, default_value_t = OutputFormat::default())]
    format: OutputFormat,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Optimize a route between two waypoints against a synthetic ocean.
    Solve(SolveArgs),
}

#[derive(Args, Debug, Clone)]
struct SolveArgs {
    #[command(flatten)]
    endpoints: Endpoints,
    #[command(flatten)]
    vessel: VesselArgs,
    #[command(flatten)]
    options: SolveOptionsArgs,
}

#[derive(Args, Debug, Clone)]
struct Endpoints {
    /// Origin latitude in degrees.
    #[arg(long)]
    origin_lat: f64,
    /// Origin longitude in degrees.
    #[arg(long)]
    origin_lon: f64,
    /// Destination latitude in degrees.
    #[arg(long)]
    dest_lat: f64,
    /// Destination longitude in degrees.
    #[arg(long)]
    dest_lon: f64,
}

#[derive(Args, Debug, Clone)]
struct VesselArgs {
    /// Cruising speed in knots.
    #[arg(long, default_value_t = 18.0)]
    service_speed: f64,
    /// Minimum operable speed in knots.
    #[arg(long, default_value_t = 8.0)]
    min_speed: f64,
    /// Maximum operable speed in knots.
    #[arg(long, default_value_t = 24.0)]
    max_speed: f64,
    /// Design speed in knots, the calibration point for the power curve.
    #[arg(long, default_value_t = 22.0)]
    design_speed: f64,
    /// Engine power in kW at the design speed.
    #[arg(long, default_value_t = 15_000.0)]
    design_power_kw: f64,
    /// Specific fuel consumption in g/kWh.
    #[arg(long, default_value_t = 180.0)]
    sfc_g_per_kwh: f64,
}

impl VesselArgs {
    fn to_vessel(&self) -> AdmiraltyVessel {
        AdmiraltyVessel {
            service_speed_kt: self.service_speed,
            min_speed_kt: self.min_speed,
            max_speed_kt: self.max_speed,
            design_speed_kt: self.design_speed,
            design_power_kw: self.design_power_kw,
            sfc_g_per_kwh: self.sfc_g_per_kwh,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct SolveOptionsArgs {
    /// Optimization engine to run.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::default())]
    algorithm: AlgorithmArg,

    /// Swarm/population size.
    #[arg(long, default_value_t = 50)]
    swarm_size: usize,

    /// Maximum iterations/generations.
    #[arg(long, default_value_t = 200)]
    max_iterations: usize,

    /// Number of interior waypoints subject to optimization.
    #[arg(long, default_value_t = 10)]
    n_waypoints: usize,

    /// Objective weights: fuel, time, risk, emissions, discomfort. Need not
    /// sum to 1; normalized internally.
    #[arg(long, num_args = 5, default_values_t = [0.2, 0.2, 0.2, 0.2, 0.2])]
    weights: Vec<f64>,

    /// Deterministic seed. A random seed is used when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
enum AlgorithmArg {
    #[default]
    Hacopso,
    Ga,
}

impl From<AlgorithmArg> for CoreAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Hacopso => CoreAlgorithm::Hacopso,
            AlgorithmArg::Ga => CoreAlgorithm::Ga,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    fn render(self, result: &OptimizeResult) -> Result<()> {
        match self {
            OutputFormat::Text => {
                println!(
                    "ran {} iterations, archive holds {} route(s)",
                    result.iterations_run, result.archive_size
                );
                for (i, solution) in result.solutions.iter().enumerate() {
                    println!(
                        "  [{i}] fuel={:.1}t time={:.1}h risk={:.2} emissions={:.1}t comfort={:.2} (co2={:.1}t sox={:.1}kg nox={:.1}kg)",
                        solution.objectives.fuel_t,
                        solution.objectives.time_h,
                        solution.objectives.risk,
                        solution.objectives.emissions_t,
                        solution.objectives.comfort,
                        solution.emissions_breakdown.co2_tonnes,
                        solution.emissions_breakdown.sox_kg,
                        solution.emissions_breakdown.nox_kg,
                    );
                }
                if result.env_substitutions.total() > 0 {
                    println!(
                        "note: {} environment queries failed during the run and were substituted with neutral defaults",
                        result.env_substitutions.total()
                    );
                }
            }
            OutputFormat::Json => {
                let mut stdout = io::stdout();
                serde_json::to_writer_pretty(&mut stdout, result)?;
                stdout.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}

/// Uniform deep water with no storms, piracy, or currents. Stands in for a
/// real gridded ocean dataset, which is out of scope for this CLI.
#[derive(Debug, Clone, Copy, Default)]
struct SyntheticOcean;

impl OceanQuery for SyntheticOcean {
    fn is_land(&self, _lat: f64, _lon: f64) -> OceanResult<bool> {
        Ok(false)
    }

    fn depth(&self, _lat: f64, _lon: f64) -> OceanResult<f64> {
        Ok(4000.0)
    }

    fn wave_height(&self, _lat: f64, _lon: f64, _t: Timestamp) -> OceanResult<f64> {
        Ok(0.5)
    }

    fn current_vector(&self, _lat: f64, _lon: f64, _t: Timestamp) -> OceanResult<(f64, f64)> {
        Ok((0.0, 0.0))
    }

    fn storm_risk(&self, _lat: f64, _lon: f64, _t: Timestamp) -> OceanResult<f64> {
        Ok(0.0)
    }

    fn piracy_risk(&self, _lat: f64, _lon: f64) -> OceanResult<f64> {
        Ok(0.0)
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Solve(args) => handle_solve(&cli.global, &args),
    }
}

fn handle_solve(global: &GlobalOptions, args: &SolveArgs) -> Result<()> {
    let origin = Waypoint::new(args.endpoints.origin_lat, args.endpoints.origin_lon)
        .context("invalid origin waypoint")?;
    let destination = Waypoint::new(args.endpoints.dest_lat, args.endpoints.dest_lon)
        .context("invalid destination waypoint")?;

    let vessel = args.vessel.to_vessel();
    let ocean = SyntheticOcean;

    let mut job = JobSpec::new(origin, destination, &vessel, &ocean, 0.0);
    job.algorithm = args.options.algorithm.into();
    job.swarm_size = args.options.swarm_size;
    job.max_iterations = args.options.max_iterations;
    job.n_waypoints = args.options.n_waypoints;
    job.seed = args.options.seed;
    if args.options.weights.len() == 5 {
        let w: [f64; 5] = args.options.weights.clone().try_into().unwrap();
        job.weights = ObjectiveWeights(w);
    }

    let result = optimize(&job).context("optimization run failed")?;
    global.format.render(&result)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
