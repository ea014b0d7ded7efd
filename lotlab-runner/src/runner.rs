//! Batch orchestration — pure single runs, parallel batches.
//!
//! `run()` is a pure function from (config, bars, capital) to a result:
//! no shared state, no I/O. `run_batch()` owns iteration across strategy
//! configs, loading each strategy's data file, dispatching runs to rayon
//! workers, and collecting every run's `Result` independently so a single
//! structural failure never stops the batch.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use lotlab_core::domain::Bar;
use lotlab_core::error::DataError;
use lotlab_core::resample::resample;
use lotlab_core::sim::{simulate, PositionRecord};

use crate::config::{BatchConfig, ConfigError, RunId, StrategyConfig};
use crate::data_loader::{load_bars_csv, LoadError};
use crate::metrics::MetricsReport;

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("load error: {0}")]
    Load(#[from] LoadError),
    #[error("data error: {0}")]
    Data(#[from] DataError),
}

/// Complete result of a single run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_id: RunId,
    pub name: String,
    pub symbol: String,
    pub rule: String,
    pub timeframe: String,
    pub bar_count: usize,
    pub capital: f64,
    pub metrics: MetricsReport,
    pub records: Vec<PositionRecord>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// One strategy's slot in a batch: the run either completed or failed,
/// and failures travel alongside successes instead of aborting the batch.
#[derive(Debug)]
pub struct StrategyRun {
    pub name: String,
    pub outcome: Result<RunOutcome, RunError>,
}

/// Run a single strategy over pre-loaded raw bars. Pure: no I/O.
///
/// Pipeline: resample to the configured timeframe, derive the signal from
/// the configured rule, simulate, compute metrics.
pub fn run(config: &StrategyConfig, bars: &[Bar], capital: f64) -> Result<RunOutcome, RunError> {
    let instrument = config.instrument.resolve()?;
    let resampled = resample(bars, config.timeframe)?;
    let signal = config.rule.generate(&resampled);
    let sim = simulate(&resampled, &signal, capital, &instrument)?;
    let metrics = MetricsReport::from_simulation(&sim)?;

    Ok(RunOutcome {
        schema_version: SCHEMA_VERSION,
        run_id: config.run_id(),
        name: config.name.clone(),
        symbol: instrument.symbol,
        rule: config.rule.label().to_string(),
        timeframe: config.timeframe.to_string(),
        bar_count: sim.records.len(),
        capital,
        metrics,
        records: sim.records,
    })
}

/// Load each strategy's data file and run it. Runs are independent, so
/// they are dispatched across rayon workers; results come back in config
/// order.
pub fn run_batch(batch: &BatchConfig) -> Vec<StrategyRun> {
    batch
        .strategies
        .par_iter()
        .map(|config| {
            let outcome = load_bars_csv(&config.data)
                .map_err(RunError::from)
                .and_then(|bars| run(config, &bars, batch.capital));
            StrategyRun {
                name: config.name.clone(),
                outcome,
            }
        })
        .collect()
}
