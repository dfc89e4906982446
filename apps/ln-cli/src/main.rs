use clap::{Args, Parser, Subcommand};
use ln_app::{AppError, AppResult, NetworkSummary, Session};
use ln_core::{ConductanceLaw, SimConfig};
use ln_sim::{RunLength, RunOptions};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ln-cli")]
#[command(about = "leafnet CLI - stochastic particle transport on leaf networks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print counts and extrema of a network file
    Info {
        /// Network file (.txt or .net)
        network: PathBuf,
        /// Simulation config (YAML or JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Advance a network and optionally record snapshots
    Run(RunArgs),
    /// Re-save a network in the format implied by the output extension
    Convert {
        input: PathBuf,
        /// .txt, .net or .eln
        output: PathBuf,
    },
    /// Recompute every channel conductance from width and length
    DeriveConductance {
        input: PathBuf,
        output: PathBuf,
        /// Law factor (conductance = factor * width^exponent / length)
        #[arg(long)]
        factor: Option<f64>,
        /// Law exponent
        #[arg(long)]
        exponent: Option<f64>,
    },
    /// Write the default simulation config
    InitConfig {
        /// Output path (.yaml, .yml or .json)
        path: PathBuf,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Network file (.txt or .net)
    network: PathBuf,
    /// Simulation config (YAML or JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of steps
    #[arg(long, conflicts_with = "time")]
    steps: Option<u64>,
    /// Simulated time (default 200)
    #[arg(long)]
    time: Option<f64>,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Let channel conductance follow the flow it carries
    #[arg(long)]
    adaptive: bool,
    /// Record a snapshot every N steps
    #[arg(long, requires = "record_to")]
    record_every: Option<u64>,
    /// Snapshot base path; files are named <stem><step>.txt
    #[arg(long)]
    record_to: Option<PathBuf>,
    /// Save the final network here
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { network, config } => cmd_info(&network, config.as_deref()),
        Commands::Run(args) => cmd_run(args),
        Commands::Convert { input, output } => cmd_convert(&input, &output),
        Commands::DeriveConductance {
            input,
            output,
            factor,
            exponent,
        } => cmd_derive_conductance(&input, &output, factor, exponent),
        Commands::InitConfig { path } => cmd_init_config(&path),
    }
}

fn load_config(path: Option<&Path>) -> AppResult<SimConfig> {
    match path {
        Some(path) => Ok(ln_io::load_config(path)?),
        None => Ok(SimConfig::default()),
    }
}

fn open(network: &Path, config: SimConfig) -> AppResult<Session> {
    let mut session = Session::new(config)?;
    session.load(network)?;
    Ok(session)
}

fn cmd_info(network: &Path, config: Option<&Path>) -> AppResult<()> {
    let session = open(network, load_config(config)?)?;
    println!("Network: {}", network.display());
    print_summary(&session.summary());
    Ok(())
}

fn cmd_run(args: RunArgs) -> AppResult<()> {
    let mut config = load_config(args.config.as_deref())?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.adaptive {
        config.adaptive_conductance = true;
    }
    let mut session = open(&args.network, config)?;

    let length = match (args.steps, args.time) {
        (Some(steps), _) => RunLength::Steps(steps),
        (None, Some(time)) => RunLength::Time(time),
        (None, None) => RunOptions::default().length,
    };
    let record_every = match (&args.record_to, args.record_every) {
        (Some(_), every) => Some(every.unwrap_or(10)),
        (None, _) => None,
    };
    let opts = RunOptions {
        length,
        record_every,
    };

    println!("Running: {}", args.network.display());
    println!(
        "  dt = {}, adaptive = {}",
        session.config().dt,
        session.config().adaptive_conductance
    );

    let started = Instant::now();
    tracing::info!(?opts, seed = ?session.config().seed, "run requested");
    let run = session.run(&opts, args.record_to.as_deref())?;
    tracing::info!(
        steps = run.steps_run,
        final_step = run.final_step,
        records = run.records,
        drained = run.drained,
        "run finished"
    );
    println!(
        "✓ {} steps in {:.2} s ({} snapshots, {} particles drained)",
        run.steps_run,
        started.elapsed().as_secs_f64(),
        run.records,
        run.drained
    );
    print_summary(&session.summary());

    if let Some(output) = &args.output {
        session.save(output)?;
        println!("✓ Saved: {}", output.display());
    }
    Ok(())
}

fn cmd_convert(input: &Path, output: &Path) -> AppResult<()> {
    if input == output {
        return Err(AppError::InvalidInput(
            "input and output are the same file".to_string(),
        ));
    }
    let session = open(input, SimConfig::default())?;
    session.save(output)?;
    println!("✓ {} -> {}", input.display(), output.display());
    Ok(())
}

fn cmd_derive_conductance(
    input: &Path,
    output: &Path,
    factor: Option<f64>,
    exponent: Option<f64>,
) -> AppResult<()> {
    let mut session = open(input, SimConfig::default())?;
    let default = ConductanceLaw::default();
    let law = ConductanceLaw {
        factor: factor.unwrap_or(default.factor),
        exponent: exponent.unwrap_or(default.exponent),
    };
    session.derive_conductances(law)?;
    tracing::info!(factor = law.factor, exponent = law.exponent, "conductances derived");
    session.save(output)?;
    println!(
        "✓ Conductance = {} * w^{} / l for {} channels",
        law.factor,
        law.exponent,
        session.network().channel_count()
    );
    Ok(())
}

fn cmd_init_config(path: &Path) -> AppResult<()> {
    ln_io::save_config(path, &SimConfig::default())?;
    println!("✓ Wrote default config: {}", path.display());
    Ok(())
}

fn print_summary(summary: &NetworkSummary) {
    println!(
        "  Junctions: {} ({} sources, {} sinks)",
        summary.junctions, summary.sources, summary.sinks
    );
    println!("  Channels: {}", summary.channels);
    println!("  Valves: {}", summary.valves);
    println!("  Particles: {}", summary.total_particles);
    let e = &summary.extrema;
    println!("  Flow range: {} .. {}", e.min_flow, e.max_flow);
    println!(
        "  Particle range: {} .. {}",
        e.min_particles, e.max_particles
    );
    println!("  Max conductance: {}", e.max_conductance);
    println!("  Max width: {}", e.max_width);
    if summary.steps > 0 {
        println!(
            "  Steps: {} (t = {})",
            summary.steps, summary.elapsed_time
        );
    }
}
