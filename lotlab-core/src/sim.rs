//! Trade simulator — long/flat signal to position sizing, PnL, and equity.
//!
//! Single pass over the bars. Per bar, in order: defensive one-bar signal
//! lag, slippage-adjusted execution price, margin-constrained integer lot
//! sizing, entry/exit price tracking, single-bar PnL realization, running
//! equity. PnL is recognized entirely on flat bars; there is no
//! mark-to-market accrual while the position is held.
//!
//! Two inherited behaviors are reproduced deliberately:
//! - the entry-price reference is overwritten on every held bar, not frozen
//!   at the bar that opened the position;
//! - after the first entry the reference forward-fills indefinitely, so
//!   every later flat bar realizes PnL against the most recent held-bar
//!   price.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{validate_bars, Bar, Instrument, SignalSeries};
use crate::error::{DataError, NumericError};

/// Per-bar output of the simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub timestamp: NaiveDateTime,
    pub close: f64,
    /// Desired position actually applied on this bar (signal lagged by one).
    pub position: u8,
    /// Close adjusted for slippage; the price any fill on this bar gets.
    pub exec_price: f64,
    /// Lots affordable at this bar's execution price under the margin
    /// constraint. Sizing capacity, not necessarily the lots funding a fill.
    pub lots: u64,
    /// Forward-filled entry-price reference (overwritten on every held bar).
    pub entry_price: Option<f64>,
    /// Execution price on flat bars; `None` while the position is held.
    pub exit_price: Option<f64>,
    pub pnl: f64,
    pub cumulative_pnl: f64,
    pub equity: f64,
}

/// Complete output of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimResult {
    pub capital: f64,
    pub records: Vec<PositionRecord>,
}

impl SimResult {
    pub fn equity_curve(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.equity).collect()
    }

    pub fn pnl_series(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.pnl).collect()
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.records.iter().map(|r| r.timestamp).collect()
    }
}

/// Lots affordable under the margin constraint:
/// `floor(capital / (exec_price * lot_size * margin_fraction))`.
///
/// A zero or non-finite margin-per-lot is a `NumericError`; the simulator
/// degrades it to 0 lots for the bar rather than dividing through.
pub fn lot_count(
    capital: f64,
    exec_price: f64,
    lot_size: u32,
    margin_fraction: f64,
) -> Result<u64, NumericError> {
    let margin_per_lot = exec_price * f64::from(lot_size) * margin_fraction;
    if margin_per_lot <= 0.0 || !margin_per_lot.is_finite() {
        return Err(NumericError::DegenerateMarginPerLot { exec_price });
    }
    let lots = (capital / margin_per_lot).floor();
    if lots <= 0.0 {
        return Ok(0);
    }
    Ok(lots as u64)
}

/// Run the long/flat simulation.
///
/// `signal` is the rule's desired position per bar, already lagged by the
/// rule itself; the simulator applies one more bar of lag on top. Capital
/// must be positive and finite. Insufficient capital for a single lot is
/// not an error: lot counts stay 0 and no PnL is ever realized.
pub fn simulate(
    bars: &[Bar],
    signal: &SignalSeries,
    capital: f64,
    instrument: &Instrument,
) -> Result<SimResult, DataError> {
    validate_bars(bars)?;
    signal.check_alignment(bars.len())?;
    if !capital.is_finite() || capital <= 0.0 {
        return Err(DataError::InvalidCapital(capital));
    }

    let slippage = instrument.slippage_rate;
    let lot_size = f64::from(instrument.lot_size);
    let values = signal.values();

    let mut records = Vec::with_capacity(bars.len());
    let mut entry_price: Option<f64> = None;
    let mut held_lots: u64 = 0;
    let mut in_position = false;
    let mut cumulative_pnl = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        let position = if i == 0 { 0 } else { values[i - 1] };
        let exec_price = bar.close * (1.0 + slippage);
        let lots = lot_count(capital, exec_price, instrument.lot_size, instrument.margin_fraction)
            .unwrap_or(0);

        let mut exit_price = None;
        let mut pnl = 0.0;

        if position == 1 {
            if !in_position {
                // Lots are locked in at the transition into the position and
                // funded from starting capital, not current equity.
                held_lots = lots;
                in_position = true;
            }
            entry_price = Some(exec_price);
        } else {
            exit_price = Some(exec_price);
            if let Some(entry) = entry_price {
                let scale = held_lots as f64 * lot_size;
                pnl = (exec_price - entry) * scale - (entry + exec_price) * slippage * scale;
            }
            in_position = false;
        }

        cumulative_pnl += pnl;
        records.push(PositionRecord {
            timestamp: bar.timestamp,
            close: bar.close,
            position,
            exec_price,
            lots,
            entry_price,
            exit_price,
            pnl,
            cumulative_pnl,
            equity: capital + cumulative_pnl,
        });
    }

    Ok(SimResult { capital, records })
}
