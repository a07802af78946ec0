use clap::{Parser, Subcommand, ValueEnum};
use em_app::{
    AppResult, Field, IntegratorType, ParameterSet, SimulationResult, load_json, load_yaml,
    run_parameter_set, validate, write_csv, write_json,
};
use em_core::TimeGrid;
use em_sim::stability_report;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "em-cli")]
#[command(about = "MotorSim CLI - DC motor response to rectangle, triangle and harmonic drives", long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Parameter sources shared by the commands that simulate.
#[derive(clap::Args)]
struct ParamArgs {
    /// Parameter file (YAML, or JSON with a .json extension)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override a field, e.g. `--set L=0.05 --set signal_type=Harmonic`
    #[arg(short, long = "set", value_name = "NAME=VALUE")]
    set: Vec<String>,
    /// Use the fourth-order Runge-Kutta integrator instead of forward Euler
    #[arg(long)]
    rk4: bool,
    /// Sampling rate of the time grid in Hz
    #[arg(long)]
    sample_rate: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and print or export the result
    Run {
        #[command(flatten)]
        params: ParamArgs,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
        format: OutputFormat,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the default parameter file
    Defaults,
    /// Check that a parameter set can be simulated
    Validate {
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Report whether the fixed step is stable for a parameter set
    Stability {
        #[command(flatten)]
        params: ParamArgs,
    },
    /// List the recognised field names
    Fields,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Summary,
    Csv,
    Json,
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            params,
            format,
            output,
        } => cmd_run(&params, format, output.as_deref()),
        Commands::Defaults => cmd_defaults(),
        Commands::Validate { params } => cmd_validate(&params),
        Commands::Stability { params } => cmd_stability(&params),
        Commands::Fields => cmd_fields(),
    }
}

fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn load_params(args: &ParamArgs) -> AppResult<ParameterSet> {
    let mut set = match &args.config {
        Some(path) if path.extension().is_some_and(|ext| ext == "json") => load_json(path)?,
        Some(path) => load_yaml(path)?,
        None => ParameterSet::default(),
    };
    set.apply_assignments(args.set.iter().map(String::as_str))?;
    if args.rk4 {
        set.solver.integrator = IntegratorType::RK4;
    }
    if let Some(rate) = args.sample_rate {
        set.solver.sample_rate_hz = rate;
    }
    Ok(set)
}

fn cmd_run(args: &ParamArgs, format: OutputFormat, output: Option<&Path>) -> AppResult<()> {
    let set = load_params(args)?;
    let result = run_parameter_set(&set)?;

    match output {
        Some(path) => {
            let file = BufWriter::new(File::create(path)?);
            write_result(&set, &result, format, file)?;
            eprintln!("✓ Wrote {} samples to {}", result.len(), path.display());
        }
        None => write_result(&set, &result, format, io::stdout().lock())?,
    }
    Ok(())
}

fn write_result<W: Write>(
    set: &ParameterSet,
    result: &SimulationResult,
    format: OutputFormat,
    mut out: W,
) -> AppResult<()> {
    match format {
        OutputFormat::Csv => write_csv(result, out),
        OutputFormat::Json => write_json(result, out),
        OutputFormat::Summary => {
            let summary = result.summary();
            writeln!(
                out,
                "✓ {} signal, {} V at {} Hz over {} s ({})",
                set.signal.kind,
                set.signal.amplitude,
                set.signal.frequency,
                set.signal.duration,
                set.solver.integrator.label()
            )?;
            writeln!(out, "  samples:        {}", summary.samples)?;
            writeln!(out, "  step:           {:.6} s", summary.dt_s)?;
            writeln!(out, "  final current:  {:.6} A", summary.final_current_a)?;
            writeln!(out, "  peak |current|: {:.6} A", summary.peak_current_a)?;
            writeln!(out, "  final omega:    {:.6} rad/s", summary.final_omega_rad_s)?;
            writeln!(out, "  peak |omega|:   {:.6} rad/s", summary.peak_omega_rad_s)?;
            for chart in result.charts() {
                writeln!(out, "  [{}] {} vs {}", chart.title, chart.y_label, chart.x_label)?;
            }
            Ok(())
        }
    }
}

fn cmd_defaults() -> AppResult<()> {
    print!("{}", ParameterSet::default().to_yaml_string()?);
    Ok(())
}

fn cmd_validate(args: &ParamArgs) -> AppResult<()> {
    let set = load_params(args)?;
    validate(&set)?;
    println!("✓ Parameters are valid");
    Ok(())
}

fn cmd_stability(args: &ParamArgs) -> AppResult<()> {
    let set = load_params(args)?;
    validate(&set)?;

    let grid = TimeGrid::new(set.signal_spec().duration, em_core::hz(set.solver.sample_rate_hz))?;
    let report = stability_report(&set.motor, grid.dt(), set.solver.integrator);

    println!(
        "Integrator: {} (dt = {:.6} s)",
        report.integrator.label(),
        report.dt
    );
    println!("Eigenvalues:");
    for l in &report.eigenvalues {
        println!("  {:+.4} {:+.4}i", l.re, l.im);
    }
    println!("Amplification factor: {:.6}", report.amplification);
    if report.is_stable() {
        println!("✓ Step size is stable for these parameters");
    } else {
        println!("✗ Step size is unstable for these parameters; the trajectory will diverge");
    }
    Ok(())
}

fn cmd_fields() -> AppResult<()> {
    let defaults = ParameterSet::default();
    println!("{:<12} {:<18} default", "name", "label");
    for field in Field::ALL {
        println!(
            "{:<12} {:<18} {}",
            field.name(),
            field.label(),
            defaults.field_text(field)
        );
    }
    Ok(())
}
