//! Performance metrics — pure functions over the simulator's output.
//!
//! Every metric is a pure function: equity/PnL series in, scalar out. A
//! degenerate input never aborts the report: zero return deviation makes
//! Sharpe NaN, a drawdown-free curve makes Calmar NaN, and a failed CAGR
//! computation falls back to 0. Only a structurally empty run is an error.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use lotlab_core::error::DataError;
use lotlab_core::sim::SimResult;

/// Bars assumed per calendar year when annualizing Sharpe.
const BARS_PER_YEAR: f64 = 252.0;

/// Cap on raw CAGR to suppress overflow on degenerate short series.
const CAGR_CAP: f64 = 10.0;

/// Flat summary report for a single run.
///
/// `sharpe` and `calmar` use NaN as the undefined sentinel; `win_rate_pct`
/// is defined as exactly 0 when there are no trades. Percentages are
/// rounded to 2 decimals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    pub sharpe: f64,
    pub calmar: f64,
    pub max_drawdown_pct: f64,
    pub time_in_drawdown: usize,
    pub cagr_pct: f64,
    pub total_trades: usize,
    pub win_rate_pct: f64,
}

impl MetricsReport {
    /// Compute all metrics from a simulation result.
    pub fn from_simulation(sim: &SimResult) -> Result<Self, DataError> {
        Self::compute(
            &sim.equity_curve(),
            &sim.pnl_series(),
            &sim.timestamps(),
            sim.capital,
        )
    }

    /// Compute all metrics from raw series.
    ///
    /// The three slices must be aligned 1:1 and non-empty.
    pub fn compute(
        equity: &[f64],
        pnl: &[f64],
        timestamps: &[NaiveDateTime],
        capital: f64,
    ) -> Result<Self, DataError> {
        if equity.is_empty() {
            return Err(DataError::Empty);
        }
        if pnl.len() != equity.len() || timestamps.len() != equity.len() {
            return Err(DataError::SignalLengthMismatch {
                signal_len: pnl.len(),
                bar_len: equity.len(),
            });
        }

        let final_equity = *equity.last().expect("non-empty");
        let drawdowns = drawdown_series(equity);
        let max_dd = drawdowns.iter().copied().fold(0.0_f64, f64::min);

        let total_trades = pnl.iter().filter(|&&p| p != 0.0).count();
        let wins = pnl.iter().filter(|&&p| p > 0.0).count();
        let win_rate_pct = if total_trades > 0 {
            round2(wins as f64 / total_trades as f64 * 100.0)
        } else {
            0.0
        };

        Ok(Self {
            sharpe: sharpe_ratio(&bar_returns(equity)),
            calmar: calmar_ratio(final_equity, capital, max_dd),
            max_drawdown_pct: round2(max_dd * 100.0),
            time_in_drawdown: drawdowns.iter().filter(|&&d| d < 0.0).count(),
            cagr_pct: round2(cagr(final_equity, capital, timestamps) * 100.0),
            total_trades,
            win_rate_pct,
        })
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Per-bar percentage change in equity; the first bar's return is 0.
///
/// A zero previous value would be a division fault; it degrades to a
/// 0 return for that bar (only reachable when losses wipe equity exactly).
pub fn bar_returns(equity: &[f64]) -> Vec<f64> {
    let mut returns = Vec::with_capacity(equity.len());
    for (i, &e) in equity.iter().enumerate() {
        if i == 0 {
            returns.push(0.0);
        } else if equity[i - 1] != 0.0 {
            returns.push((e - equity[i - 1]) / equity[i - 1]);
        } else {
            returns.push(0.0);
        }
    }
    returns
}

/// Annualized Sharpe: mean(returns) / std(returns) * sqrt(252).
///
/// NaN sentinel when the standard deviation is 0 (constant equity) or the
/// series is too short for a sample deviation.
pub fn sharpe_ratio(returns: &[f64]) -> f64 {
    let std = std_dev(returns);
    if std == 0.0 || !std.is_finite() {
        return f64::NAN;
    }
    (mean(returns) / std) * BARS_PER_YEAR.sqrt()
}

/// Drawdown per bar: (equity - running_peak) / running_peak, always <= 0.
pub fn drawdown_series(equity: &[f64]) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;
    equity
        .iter()
        .map(|&e| {
            peak = peak.max(e);
            if peak != 0.0 {
                (e - peak) / peak
            } else {
                0.0
            }
        })
        .collect()
}

/// Calmar: total return over |max drawdown|. NaN when no drawdown was
/// ever observed (max_dd == 0), avoiding the division by zero.
pub fn calmar_ratio(final_equity: f64, capital: f64, max_dd: f64) -> f64 {
    if max_dd == 0.0 {
        return f64::NAN;
    }
    (final_equity / capital - 1.0) / max_dd.abs()
}

/// Compound annual growth rate over the run's elapsed calendar time.
///
/// Elapsed days are floored to 1; the raw value is capped at 10.0
/// (1000%); any non-finite intermediate falls back to 0.
pub fn cagr(final_equity: f64, capital: f64, timestamps: &[NaiveDateTime]) -> f64 {
    let (Some(first), Some(last)) = (timestamps.first(), timestamps.last()) else {
        return 0.0;
    };
    let days = (last.date() - first.date()).num_days().max(1) as f64;
    let raw = (final_equity / capital).powf(365.25 / days) - 1.0;
    if !raw.is_finite() {
        return 0.0;
    }
    raw.min(CAGR_CAP)
}

// ─── Helpers ────────────────────────────────────────────────────────

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (ddof = 1), matching pandas `.std()`.
pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Round to 2 decimals for reported percentages.
pub(crate) fn round2(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    (x * 100.0).round() / 100.0
}
