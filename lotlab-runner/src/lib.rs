//! LotLab Runner — metrics, strategy rules, configuration, batch orchestration.
//!
//! The core crate turns price + signal into an equity curve; this crate
//! owns everything around that: deriving the signal from a configured
//! strategy rule, computing the summary `MetricsReport`, loading bars from
//! CSV, running batches of strategies (in parallel, each run independent),
//! and exporting artifacts.

pub mod config;
pub mod data_loader;
pub mod export;
pub mod metrics;
pub mod runner;
pub mod strategies;

pub use config::{BatchConfig, ConfigError, InstrumentSpec, SignalRule, StrategyConfig};
pub use data_loader::{load_bars_csv, LoadError};
pub use metrics::MetricsReport;
pub use runner::{run, run_batch, RunError, RunOutcome, StrategyRun};
