mod reports;
mod simulation;
mod wheel_args;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use prize_wheel_engine::SpinEngine;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;

use simulation::{SimulationReport, run_simulation};

#[derive(Debug, Parser)]
#[command(name = "prize-wheel-tester", version = "0.1.0")]
#[command(about = "Headless spin simulator for the prize wheel - checks odds and rotation")]
struct Args {
    /// Wheel options as `label=weight` pairs (comma-separated); defaults to the stock wheel
    #[arg(long)]
    options: Option<String>,

    /// Spread the total evenly across all options before spinning
    #[arg(long)]
    even: bool,

    /// Number of spins to simulate
    #[arg(long, default_value_t = 10_000)]
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    spins: u64,

    /// RNG seed for a reproducible run
    #[arg(long, default_value_t = 1337)]
    seed: u64,

    /// Allowed absolute drift between observed and configured odds
    #[arg(long, default_value_t = 0.02)]
    tolerance: f64,

    /// Optional JSON wheel config (limits, spin distance, total window)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Print every spin as it settles
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    announce_banner();

    let report = simulate(&args)?;
    write_reports(&args, &report)?;

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}

// stderr keeps stdout clean for the report itself
fn announce_banner() {
    eprintln!("{}", "🎡 Prize Wheel Tester".bright_cyan().bold());
    eprintln!("{}", "=====================".cyan());
}

fn simulate(args: &Args) -> Result<SimulationReport> {
    let config = wheel_args::load_config(args.config.as_deref())?;
    let store = wheel_args::build_store(args.options.as_deref(), config, args.even)?;
    log::info!(
        "simulating {} spins over {} options (seed {})",
        args.spins,
        store.len(),
        args.seed
    );
    let mut engine = SpinEngine::with_seed(store, args.seed);
    Ok(run_simulation(
        &mut engine,
        args.seed,
        args.spins,
        args.tolerance,
        args.verbose,
    ))
}

fn write_reports(args: &Args, report: &SimulationReport) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, report)?,
        "markdown" => reports::generate_markdown_report(&mut output_target, report)?,
        _ => reports::generate_console_report(&mut output_target, report)?,
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
