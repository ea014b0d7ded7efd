//! Bar — the fundamental market data unit.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// One OHLCV sample for a fixed time interval.
///
/// Timestamps carry minute resolution because the raw feeds are
/// minute-level; daily bars simply sit at midnight. A bar sequence handed
/// to the resampler or simulator is owned immutably by the caller for the
/// duration of the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Returns true if any OHLCV field is non-finite.
    pub fn has_non_finite(&self) -> bool {
        !(self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.volume.is_finite())
    }

    /// Basic OHLC sanity check: high >= low, high bounds open/close.
    pub fn is_sane(&self) -> bool {
        if self.has_non_finite() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
    }
}

/// Structural validation for a bar sequence.
///
/// Enforces the input invariants every core operation assumes: the
/// sequence is non-empty, every numeric field is finite, and timestamps
/// are strictly increasing (which also makes them unique).
pub fn validate_bars(bars: &[Bar]) -> Result<(), DataError> {
    if bars.is_empty() {
        return Err(DataError::Empty);
    }
    for (i, bar) in bars.iter().enumerate() {
        if !bar.open.is_finite() {
            return Err(DataError::NonFiniteField { field: "open", index: i });
        }
        if !bar.high.is_finite() {
            return Err(DataError::NonFiniteField { field: "high", index: i });
        }
        if !bar.low.is_finite() {
            return Err(DataError::NonFiniteField { field: "low", index: i });
        }
        if !bar.close.is_finite() {
            return Err(DataError::NonFiniteField { field: "close", index: i });
        }
        if !bar.volume.is_finite() {
            return Err(DataError::NonFiniteField { field: "volume", index: i });
        }
        if i > 0 && bars[i - 1].timestamp >= bar.timestamp {
            return Err(DataError::OutOfOrderTimestamps { index: i });
        }
    }
    Ok(())
}
