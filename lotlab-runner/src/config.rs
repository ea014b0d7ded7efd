//! Serializable batch configuration.
//!
//! A TOML file describes a batch: shared starting capital plus one
//! `[[strategy]]` table per run. Each strategy names its data file,
//! instrument (preset or inline contract terms), resampling timeframe,
//! and signal rule.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lotlab_core::domain::{Bar, Instrument, SignalSeries};
use lotlab_core::resample::Timeframe;

use crate::strategies;

/// Unique identifier for a run configuration (content-addressable hash).
pub type RunId = String;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown instrument preset '{0}' (known: nifty, banknifty)")]
    UnknownInstrument(String),

    #[error("batch capital must be positive, got {0}")]
    InvalidCapital(f64),
}

/// A whole batch: shared capital and the strategies to run over it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Starting capital for every run (default 1 crore, as the original).
    #[serde(default = "default_capital")]
    pub capital: f64,

    #[serde(rename = "strategy", default)]
    pub strategies: Vec<StrategyConfig>,
}

fn default_capital() -> f64 {
    1e7
}

impl BatchConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text)?;
        if !config.capital.is_finite() || config.capital <= 0.0 {
            return Err(ConfigError::InvalidCapital(config.capital));
        }
        Ok(config)
    }
}

/// Configuration for a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub name: String,

    /// CSV file holding the raw bars for this strategy's instrument.
    pub data: PathBuf,

    pub instrument: InstrumentSpec,

    pub timeframe: Timeframe,

    pub rule: SignalRule,
}

impl StrategyConfig {
    /// Deterministic content hash of this configuration.
    ///
    /// Two identical configs share a RunId, so results can be compared or
    /// cached across batches.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("StrategyConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

/// Instrument reference: a preset name or inline contract terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstrumentSpec {
    Preset(String),
    Custom(Instrument),
}

impl InstrumentSpec {
    pub fn resolve(&self) -> Result<Instrument, ConfigError> {
        match self {
            InstrumentSpec::Preset(name) => Instrument::preset(name)
                .ok_or_else(|| ConfigError::UnknownInstrument(name.clone())),
            InstrumentSpec::Custom(inst) => Ok(inst.clone()),
        }
    }
}

/// Signal rule configuration (serializable tagged enum).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignalRule {
    /// Trend-confirmed SMA crossover with breakout and RSI filters.
    MaCrossover {
        #[serde(default = "default_fast")]
        fast: usize,
        #[serde(default = "default_slow")]
        slow: usize,
    },

    /// RSI + Bollinger band mean reversion.
    RsiReversal {
        #[serde(default = "default_rsi_period")]
        period: usize,
        #[serde(default = "default_oversold_30")]
        oversold: f64,
        #[serde(default = "default_exit_50")]
        exit_above: f64,
    },

    /// MACD 12/26/9 crossover with an RSI momentum window.
    MacdTrend,

    /// Mean reversion below a long SMA with an RSI up-turn.
    MeanReversion {
        #[serde(default = "default_slow")]
        ma_period: usize,
        #[serde(default = "default_oversold_35")]
        oversold: f64,
        #[serde(default = "default_exit_60")]
        exit_above: f64,
    },

    /// Fixed signal values, for tests and sanity checks.
    Fixed { values: Vec<u8> },
}

fn default_fast() -> usize {
    20
}
fn default_slow() -> usize {
    50
}
fn default_rsi_period() -> usize {
    14
}
fn default_oversold_30() -> f64 {
    30.0
}
fn default_oversold_35() -> f64 {
    35.0
}
fn default_exit_50() -> f64 {
    50.0
}
fn default_exit_60() -> f64 {
    60.0
}

impl SignalRule {
    /// Evaluate the rule over a bar table.
    pub fn generate(&self, bars: &[Bar]) -> SignalSeries {
        match self {
            SignalRule::MaCrossover { fast, slow } => {
                strategies::ma_crossover(bars, *fast, *slow)
            }
            SignalRule::RsiReversal { period, oversold, exit_above } => {
                strategies::rsi_reversal(bars, *period, *oversold, *exit_above)
            }
            SignalRule::MacdTrend => strategies::macd_trend(bars),
            SignalRule::MeanReversion { ma_period, oversold, exit_above } => {
                strategies::mean_reversion(bars, *ma_period, *oversold, *exit_above)
            }
            SignalRule::Fixed { values } => {
                let mut padded = values.clone();
                padded.resize(bars.len(), 0);
                SignalSeries::new(padded)
            }
        }
    }

    /// Human-readable rule name for reports.
    pub fn label(&self) -> &'static str {
        match self {
            SignalRule::MaCrossover { .. } => "ma_crossover",
            SignalRule::RsiReversal { .. } => "rsi_reversal",
            SignalRule::MacdTrend => "macd_trend",
            SignalRule::MeanReversion { .. } => "mean_reversion",
            SignalRule::Fixed { .. } => "fixed",
        }
    }
}

/// Parameter map for report rendering, sorted by parameter name.
pub fn rule_params(rule: &SignalRule) -> BTreeMap<&'static str, String> {
    let mut params = BTreeMap::new();
    match rule {
        SignalRule::MaCrossover { fast, slow } => {
            params.insert("fast", fast.to_string());
            params.insert("slow", slow.to_string());
        }
        SignalRule::RsiReversal { period, oversold, exit_above } => {
            params.insert("period", period.to_string());
            params.insert("oversold", oversold.to_string());
            params.insert("exit_above", exit_above.to_string());
        }
        SignalRule::MeanReversion { ma_period, oversold, exit_above } => {
            params.insert("ma_period", ma_period.to_string());
            params.insert("oversold", oversold.to_string());
            params.insert("exit_above", exit_above.to_string());
        }
        SignalRule::MacdTrend | SignalRule::Fixed { .. } => {}
    }
    params
}
