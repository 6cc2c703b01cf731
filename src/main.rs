//! gilt-benchmark CLI
//!
//! Select ICMA pricing benchmarks from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Benchmark for a new issue maturing on a given date
//! gilt-benchmark select --input gilts.json --date 2028-03-15
//!
//! # With an exclusion list, as JSON
//! gilt-benchmark --format json select --input gilts.json --date 2028-03-15 --config exclusions.json
//!
//! # Validate the rules over every day of a range
//! gilt-benchmark sweep --input gilts.json --from 2025-01-01 --to 2030-01-01
//!
//! # Generate a synthetic gilt book
//! gilt-benchmark generate --count 60 --seed 7 --output gilts.json
//! ```

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use gilt_benchmark::config::EngineConfig;
use gilt_benchmark::core::gilt::GiltSet;
use gilt_benchmark::engine::evaluation::BenchmarkEngine;
use gilt_benchmark::error::Result;
use gilt_benchmark::input::{gilts_to_json, load_gilts};
use gilt_benchmark::simulation::synthetic::{generate_gilt_book, BookConfig};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::process;

/// ICMA Rule 7.4 pricing benchmark selection for UK conventional gilts
#[derive(Parser)]
#[command(name = "gilt-benchmark")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    /// Log every rule the cascade evaluates
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select the benchmark for one new-issue maturity date
    Select(SelectArgs),
    /// Run the selection for every day of a date range and summarise
    Sweep(SweepArgs),
    /// Generate a synthetic gilt book (for testing)
    Generate(GenerateArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Args)]
struct SourceArgs {
    /// Path to JSON gilt records
    #[arg(long)]
    input: PathBuf,

    /// Path to JSON engine config (exclusion list)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct SelectArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// New issue maturity date (YYYY-MM-DD)
    #[arg(long)]
    date: NaiveDate,
}

#[derive(Args)]
struct SweepArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// First maturity date of the sweep (YYYY-MM-DD)
    #[arg(long)]
    from: NaiveDate,

    /// Last maturity date of the sweep, inclusive (YYYY-MM-DD)
    #[arg(long)]
    to: NaiveDate,
}

#[derive(Args)]
struct GenerateArgs {
    /// Number of gilts
    #[arg(long, default_value_t = 60)]
    count: usize,

    /// First redemption year
    #[arg(long, default_value_t = 2025)]
    first_year: i32,

    /// Last redemption year
    #[arg(long, default_value_t = 2073)]
    last_year: i32,

    /// Share of gilts generated without a redemption date
    #[arg(long, default_value_t = 0.0)]
    missing_date_rate: f64,

    /// Seed for a reproducible book
    #[arg(long)]
    seed: Option<u64>,

    /// Write to file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Load the engine and the conventional gilts it runs on.
fn load(source: &SourceArgs) -> Result<(BenchmarkEngine, GiltSet)> {
    let config = match &source.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    let all = load_gilts(&source.input)?;
    let gilts = all.conventional();
    info!(
        "loaded {} gilt(s) from {}, {} conventional",
        all.len(),
        source.input.display(),
        gilts.len()
    );
    Ok((BenchmarkEngine::new(config), gilts))
}

fn cmd_select(args: SelectArgs, format: OutputFormat) -> Result<()> {
    let (engine, gilts) = load(&args.source)?;
    let evaluation = engine.evaluate(&gilts, args.date);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&evaluation)?),
        OutputFormat::Text => print!("{}", evaluation),
    }
    Ok(())
}

fn cmd_sweep(args: SweepArgs, format: OutputFormat) -> Result<()> {
    let (engine, gilts) = load(&args.source)?;
    let report = engine.sweep(&gilts, args.from, args.to)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", report),
    }
    Ok(())
}

fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let config = BookConfig {
        gilt_count: args.count,
        first_year: args.first_year,
        last_year: args.last_year,
        missing_date_rate: args.missing_date_rate,
        seed: args.seed,
        ..Default::default()
    };
    let book = generate_gilt_book(&config);
    let json = gilts_to_json(&book)?;

    match args.output {
        Some(path) => {
            fs::write(&path, &json)?;
            eprintln!("Generated {} gilts → {}", book.len(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Select(args) => cmd_select(args, cli.format),
        Commands::Sweep(args) => cmd_sweep(args, cli.format),
        Commands::Generate(args) => cmd_generate(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
