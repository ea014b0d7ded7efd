//! Strategy signal rules — pure functions from a bar table to a 0/1 signal.
//!
//! Each rule evaluates an entry condition and an exit condition per bar
//! (exit wins when both fire) and lags the result by one bar so the signal
//! is free of lookahead before it ever reaches the simulator. A rule holds
//! only while its entry condition keeps holding; there is no latching
//! between an entry bar and a later exit bar.
//!
//! Indicator warmup produces NaN values; every comparison against NaN is
//! false, so no rule can fire inside its warmup window.

pub mod ma_crossover;
pub mod macd_trend;
pub mod mean_reversion;
pub mod rsi_reversal;

pub use ma_crossover::ma_crossover;
pub use macd_trend::macd_trend;
pub use mean_reversion::mean_reversion;
pub use rsi_reversal::rsi_reversal;

use lotlab_core::domain::SignalSeries;

/// Shift raw per-bar desired positions back by one bar (position on the
/// first bar is flat) and wrap them as a validated signal.
pub(crate) fn lag_one(raw: &[bool]) -> SignalSeries {
    let mut values = Vec::with_capacity(raw.len());
    if !raw.is_empty() {
        values.push(0);
        values.extend(raw[..raw.len() - 1].iter().map(|&v| u8::from(v)));
    }
    SignalSeries::new(values)
}
