//! Trend-confirmed moving-average crossover.
//!
//! Entry: fast SMA above slow SMA, close breaking the previous bar's
//! trailing high, RSI above 50. Exit: close under the slow SMA or RSI
//! under 45.

use lotlab_core::domain::{Bar, SignalSeries};
use lotlab_core::indicators::{closes, rolling_max, rsi, sma};

use super::lag_one;

pub fn ma_crossover(bars: &[Bar], fast: usize, slow: usize) -> SignalSeries {
    let close = closes(bars);
    let fast_ma = sma(bars, fast);
    let slow_ma = sma(bars, slow);
    let trailing_high = rolling_max(&close, fast);
    let rsi14 = rsi(bars, 14);

    let raw: Vec<bool> = (0..bars.len())
        .map(|i| {
            let prev_high = if i > 0 { trailing_high[i - 1] } else { f64::NAN };
            let entry = fast_ma[i] > slow_ma[i] && close[i] > prev_high && rsi14[i] > 50.0;
            let exit = close[i] < slow_ma[i] || rsi14[i] < 45.0;
            entry && !exit
        })
        .collect();

    lag_one(&raw)
}
