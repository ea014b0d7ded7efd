//! LotLab CLI — run a batch of long/flat strategies from a TOML config.
//!
//! Commands:
//! - `run` — load a batch config, run every strategy, print summaries,
//!   optionally save per-run artifacts and a batch report

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lotlab_runner::config::rule_params;
use lotlab_runner::export::{generate_batch_report, save_artifacts};
use lotlab_runner::runner::RunOutcome;
use lotlab_runner::{run_batch, BatchConfig, StrategyConfig};

#[derive(Parser)]
#[command(name = "lotlab", about = "LotLab CLI — lot-based long/flat backtester")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every strategy in a TOML batch config.
    Run {
        /// Path to the batch config file.
        #[arg(long)]
        config: PathBuf,

        /// Save per-run artifacts (manifest, CSVs, report) under this directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output_dir } => run_cmd(&config, output_dir.as_deref()),
    }
}

fn run_cmd(config_path: &std::path::Path, output_dir: Option<&std::path::Path>) -> Result<()> {
    let batch = BatchConfig::load(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    let runs = run_batch(&batch);

    let mut failures = 0usize;
    for (run, config) in runs.iter().zip(&batch.strategies) {
        match &run.outcome {
            Ok(outcome) => {
                print_summary(outcome, config);
                if let Some(dir) = output_dir {
                    let run_dir = save_artifacts(outcome, dir)?;
                    println!("Artifacts saved to: {}", run_dir.display());
                    println!();
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!("{}: FAILED: {e}", run.name);
                eprintln!();
            }
        }
    }

    if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        let report_path = dir.join("batch_report.md");
        std::fs::write(&report_path, generate_batch_report(&runs))?;
        println!("Batch report: {}", report_path.display());
    }

    println!(
        "{} strategies run, {} succeeded, {failures} failed",
        runs.len(),
        runs.len() - failures
    );

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn print_summary(outcome: &RunOutcome, config: &StrategyConfig) {
    let m = &outcome.metrics;
    println!("=== {} ===", outcome.name);
    println!("Symbol:           {}", outcome.symbol);
    print!("Rule:             {}", outcome.rule);
    let params = rule_params(&config.rule);
    if !params.is_empty() {
        let pairs: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        print!(" ({})", pairs.join(", "));
    }
    println!();
    println!("Timeframe:        {}", outcome.timeframe);
    println!("Bars:             {}", outcome.bar_count);
    println!("Run ID:           {}", outcome.run_id);
    println!();
    println!("Sharpe:           {}", fmt_metric(m.sharpe));
    println!("Calmar:           {}", fmt_metric(m.calmar));
    println!("Max Drawdown:     {:.2}%", m.max_drawdown_pct);
    println!("Time in Drawdown: {} bars", m.time_in_drawdown);
    println!("CAGR:             {:.2}%", m.cagr_pct);
    println!("Trades:           {}", m.total_trades);
    println!("Win Rate:         {:.2}%", m.win_rate_pct);
    println!();
}

fn fmt_metric(v: f64) -> String {
    if v.is_nan() {
        "n/a".to_string()
    } else {
        format!("{v:.3}")
    }
}
