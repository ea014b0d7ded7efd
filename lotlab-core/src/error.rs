//! Two-tier error taxonomy.
//!
//! `DataError` is structural: the input itself is unusable and the run
//! aborts. `NumericError` is a degenerate arithmetic condition: callers
//! always recover it locally to a defined sentinel (0 lots, NaN metric)
//! and the run continues.

use thiserror::Error;

/// Structurally invalid input. Aborts the current run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("empty bar sequence")]
    Empty,

    #[error("timestamps not strictly increasing at bar {index}")]
    OutOfOrderTimestamps { index: usize },

    #[error("non-finite {field} at bar {index}")]
    NonFiniteField { field: &'static str, index: usize },

    #[error("signal length {signal_len} does not match bar count {bar_len}")]
    SignalLengthMismatch { signal_len: usize, bar_len: usize },

    #[error("starting capital must be a positive finite number, got {0}")]
    InvalidCapital(f64),
}

/// Degenerate arithmetic condition. Never aborts a run: the caller
/// degrades it to a sentinel value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericError {
    #[error("margin per lot is zero or non-finite (execution price {exec_price})")]
    DegenerateMarginPerLot { exec_price: f64 },
}
