//! RSI + Bollinger band mean reversion.
//!
//! Entry: RSI oversold and close under the lower band. Exit: RSI back
//! above the exit level.

use lotlab_core::domain::{Bar, SignalSeries};
use lotlab_core::indicators::{bollinger, rsi};

use super::lag_one;

pub fn rsi_reversal(bars: &[Bar], period: usize, oversold: f64, exit_above: f64) -> SignalSeries {
    let rsi_values = rsi(bars, period);
    let bands = bollinger(bars, 20, 2.0);

    let raw: Vec<bool> = (0..bars.len())
        .map(|i| {
            let entry = rsi_values[i] < oversold && bars[i].close < bands.lower[i];
            let exit = rsi_values[i] > exit_above;
            entry && !exit
        })
        .collect();

    lag_one(&raw)
}
