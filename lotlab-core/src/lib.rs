//! LotLab Core — domain types, resampler, trade simulator, indicators.
//!
//! This crate contains the numerical heart of the backtester:
//! - Domain types (bars, signal series, instruments, position records)
//! - OHLCV bar resampling into coarser calendar buckets
//! - The long/flat trade simulator (lot sizing, entry/exit tracking, PnL)
//! - Indicator functions consumed by the runner's strategy rules
//! - The two-tier error taxonomy (structural `DataError` vs degenerate
//!   `NumericError`)
//!
//! Everything here is synchronous and purely functional over in-memory
//! slices: no I/O, no shared mutable state, no cross-run interaction.

pub mod domain;
pub mod error;
pub mod indicators;
pub mod resample;
pub mod sim;

pub use error::{DataError, NumericError};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: core types are Send + Sync.
    ///
    /// Batch runs may be dispatched across rayon workers; every value that
    /// crosses a worker boundary must pass this check.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::SignalSeries>();
        require_sync::<domain::SignalSeries>();
        require_send::<domain::Instrument>();
        require_sync::<domain::Instrument>();
        require_send::<sim::PositionRecord>();
        require_sync::<sim::PositionRecord>();
        require_send::<sim::SimResult>();
        require_sync::<sim::SimResult>();
        require_send::<resample::Timeframe>();
        require_sync::<resample::Timeframe>();
        require_send::<DataError>();
        require_sync::<DataError>();
        require_send::<NumericError>();
        require_sync::<NumericError>();
    }
}
