#![warn(missing_docs)]
//! Solcost CLI Library
//!
//! Command-line pipeline for estimating contract deployment cost: discovers
//! contract sources under a directory, samples the external estimator per
//! contract, and persists the aggregated statistics as a fixed-column table.
//!
//! # Example
//!
//! ```text
//! solcost ./contracts --trials 10 --format csv --output contract_estimates.csv
//! ```

mod config;
mod executor;
mod planner;

pub use config::*;
pub use executor::{DEFAULT_TRIALS, SampleAggregator, TrialPolicy, build_report, format_human_output};
pub use planner::discover_contracts;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use solcost_oracle::CommandInvoker;
use solcost_report::{OutputFormat, generate_csv_report, generate_json_report};
use std::path::PathBuf;

/// Solcost CLI arguments
#[derive(Parser, Debug)]
#[command(name = "solcost")]
#[command(author, version, about = "Solcost - contract deployment cost estimation")]
pub struct Cli {
    /// Optional subcommand (list, run); defaults to run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory containing contract source files
    pub directory: PathBuf,

    /// Trials per contract
    #[arg(long, short = 'n')]
    pub trials: Option<usize>,

    /// Program that runs the estimator (e.g. "node")
    #[arg(long)]
    pub oracle_command: Option<String>,

    /// Estimator script passed before the contract path
    #[arg(long)]
    pub oracle_script: Option<String>,

    /// Per-trial timeout (e.g. "60s", "2m")
    #[arg(long)]
    pub timeout: Option<String>,

    /// Output format: csv, json, human
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (defaults to the configured report path;
    /// human format prints to stdout unless set)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Source file extension to discover
    #[arg(long)]
    pub extension: Option<String>,

    /// Dry run - list contracts without invoking the estimator
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all discovered contracts
    List,
    /// Run the estimation pipeline (default)
    Run,
}

/// Run the Solcost CLI with the given arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if the report cannot be
/// produced or persisted.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the Solcost CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("solcost=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("solcost=info")
            .init();
    }

    // Discover solcost.toml configuration (CLI flags override)
    let config = SolcostConfig::discover().unwrap_or_default();

    match cli.command {
        Some(Commands::List) => list_contracts(&cli, &config),
        Some(Commands::Run) => run_estimation(&cli, &config),
        None => {
            if cli.dry_run {
                list_contracts(&cli, &config)
            } else {
                run_estimation(&cli, &config)
            }
        }
    }
}

fn extension<'a>(cli: &'a Cli, config: &'a SolcostConfig) -> &'a str {
    cli.extension.as_deref().unwrap_or(&config.contracts.extension)
}

fn list_contracts(cli: &Cli, config: &SolcostConfig) -> anyhow::Result<()> {
    let units = discover_contracts(&cli.directory, extension(cli, config))?;

    println!("Solcost Plan:");
    for unit in &units {
        println!("├── {} ({})", unit.name, unit.path.display());
    }
    println!("{} contracts found.", units.len());
    Ok(())
}

/// Build the estimator invoker by layering CLI overrides on top of
/// solcost.toml defaults.
fn build_invoker(cli: &Cli, config: &SolcostConfig) -> anyhow::Result<CommandInvoker> {
    let program = cli
        .oracle_command
        .clone()
        .unwrap_or_else(|| config.oracle.command.clone());
    let script = cli
        .oracle_script
        .clone()
        .unwrap_or_else(|| config.oracle.script.clone());
    let script = if script.is_empty() {
        None
    } else {
        Some(PathBuf::from(script))
    };
    let timeout = SolcostConfig::parse_duration(
        cli.timeout.as_deref().unwrap_or(&config.oracle.timeout),
    )?;

    Ok(CommandInvoker::new(program, script, timeout))
}

fn run_estimation(cli: &Cli, config: &SolcostConfig) -> anyhow::Result<()> {
    let units = discover_contracts(&cli.directory, extension(cli, config))?;
    if units.is_empty() {
        println!("No contracts found.");
        return Ok(());
    }

    let format_str = cli
        .format
        .clone()
        .unwrap_or_else(|| config.output.format.clone());
    let format: OutputFormat = format_str
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let trials = cli.trials.unwrap_or(config.sampling.trials).max(1);
    let invoker = build_invoker(cli, config)?;
    let oracle_command = invoker.command_line();

    println!(
        "Estimating {} contracts, {} trials each via '{}'...\n",
        units.len(),
        trials,
        oracle_command
    );

    let aggregator = SampleAggregator::new(invoker, TrialPolicy { trials });

    let progress = ProgressBar::new(units.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}") {
        progress.set_style(style);
    }

    // Contracts are processed one at a time, trials strictly sequentially;
    // rows land in enumeration order.
    let mut rows = Vec::with_capacity(units.len());
    for unit in &units {
        progress.set_message(unit.name.clone());
        tracing::info!(contract = %unit.name, "estimating deployment cost");
        rows.push(aggregator.aggregate(unit));
        progress.inc(1);
    }
    progress.finish_and_clear();

    let report = build_report(rows, oracle_command, trials);

    let output = match format {
        OutputFormat::Csv => generate_csv_report(&report),
        OutputFormat::Json => generate_json_report(&report)?,
        OutputFormat::Human => format_human_output(&report),
    };

    // Persistence failure is the one fatal error of a run: every other
    // failure has already been absorbed into undefined cells.
    if format == OutputFormat::Human && cli.output.is_none() {
        print!("{}", output);
    } else {
        let path = cli
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.output.path));
        std::fs::write(&path, &output)?;
        println!("Report written to: {}", path.display());
    }

    println!(
        "{} of {} contracts estimated, {} undefined.",
        report.summary.succeeded, report.summary.total_contracts, report.summary.undefined
    );

    Ok(())
}
