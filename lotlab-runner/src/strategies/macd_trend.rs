//! MACD crossover trend following.
//!
//! Entry: MACD crossing above its signal line on this bar, with RSI in a
//! 40-65 "healthy momentum" zone. Exit: MACD back under the signal line
//! or RSI overbought above 70.

use lotlab_core::domain::{Bar, SignalSeries};
use lotlab_core::indicators::{macd, rsi};

use super::lag_one;

pub fn macd_trend(bars: &[Bar]) -> SignalSeries {
    let m = macd(bars, 12, 26, 9);
    let rsi14 = rsi(bars, 14);

    let raw: Vec<bool> = (0..bars.len())
        .map(|i| {
            let crossed_up = i > 0
                && m.macd[i] > m.signal[i]
                && m.macd[i - 1] <= m.signal[i - 1];
            let entry = crossed_up && rsi14[i] > 40.0 && rsi14[i] < 65.0;
            let exit = m.macd[i] < m.signal[i] || rsi14[i] > 70.0;
            entry && !exit
        })
        .collect();

    lag_one(&raw)
}
