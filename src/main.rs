use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context;
use approx_riemann::{
    output::{write_raw, write_table},
    problem::{run, Preset, RiemannProblem, SystemConfig},
    solver::SolverKind,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve the Riemann problem described in a TOML file.
    Solve {
        problem: PathBuf,
        #[command(flatten)]
        common: Common,
    },
    /// Solve one of the built-in Riemann problems.
    Preset {
        #[arg(value_enum)]
        name: Preset,
        #[command(flatten)]
        common: Common,
    },
    /// List the available systems, solvers and presets.
    List,
}

#[derive(clap::Args, Debug)]
struct Common {
    /// Solvers to run, overriding the problem file.
    #[arg(short, long, value_enum)]
    solver: Vec<SolverKind>,
    /// Number of sample points in x/t.
    #[arg(short, long)]
    points: Option<usize>,
    #[arg(long, allow_hyphen_values = true)]
    xi_min: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    xi_max: Option<f64>,
    /// Also write the samples as raw little-endian f64 to this file.
    #[arg(long)]
    raw: Option<PathBuf>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn execute(mut problem: RiemannProblem, common: Common) -> anyhow::Result<()> {
    if !common.solver.is_empty() {
        problem.solvers = common.solver;
    }
    if common.points.is_some() {
        problem.sampling.points = common.points;
    }
    if common.xi_min.is_some() {
        problem.sampling.xi_min = common.xi_min;
    }
    if common.xi_max.is_some() {
        problem.sampling.xi_max = common.xi_max;
    }
    let report = run(&problem).context("cannot solve the Riemann problem")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_table(&report, &mut out)?;
    out.flush()?;

    if let Some(path) = common.raw {
        let file = File::create(&path)
            .with_context(|| format!("cannot create raw output {}", path.display()))?;
        let mut raw = BufWriter::new(file);
        write_raw(&report, &mut raw)?;
        raw.flush()?;
        tracing::info!(path = %path.display(), "raw samples written");
    }
    Ok(())
}

fn list() {
    println!("# systems");
    for name in SystemConfig::NAMES {
        println!("{name}");
    }
    println!("\n# solvers");
    for kind in SolverKind::ALL {
        println!("{:<10} {}", kind.name(), kind.description());
    }
    println!("\n# presets");
    for preset in <Preset as clap::ValueEnum>::value_variants() {
        if let Some(v) = clap::ValueEnum::to_possible_value(preset) {
            println!("{}", v.get_name());
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Solve { problem, common } => {
            let problem = RiemannProblem::from_file(&problem)
                .with_context(|| format!("cannot load {}", problem.display()))?;
            execute(problem, common)
        }
        Command::Preset { name, common } => execute(name.problem(), common),
        Command::List => {
            list();
            Ok(())
        }
    }
}
