//! Daily mean reversion below the long moving average.
//!
//! Entry: close under the long SMA while RSI turns up from oversold and
//! price ticks up. Exit: close back above the SMA or RSI above the exit
//! level.

use lotlab_core::domain::{Bar, SignalSeries};
use lotlab_core::indicators::{rsi, sma};

use super::lag_one;

pub fn mean_reversion(bars: &[Bar], ma_period: usize, oversold: f64, exit_above: f64) -> SignalSeries {
    let ma = sma(bars, ma_period);
    let rsi14 = rsi(bars, 14);

    let raw: Vec<bool> = (0..bars.len())
        .map(|i| {
            let rsi_rising = i > 0 && rsi14[i] > rsi14[i - 1];
            let price_up = i > 0 && bars[i].close > bars[i - 1].close;
            let entry = bars[i].close < ma[i] && rsi_rising && rsi14[i] < oversold && price_up;
            let exit = bars[i].close > ma[i] || rsi14[i] > exit_above;
            entry && !exit
        })
        .collect();

    lag_one(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn daily_bars(closes: &[f64]) -> Vec<Bar> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar {
                timestamp: base + chrono::Duration::days(i as i64),
                open: c,
                high: c,
                low: c,
                close: c,
                volume: 1.0,
            })
            .collect()
    }

    #[test]
    fn fires_on_bounce_below_average() {
        // Long flat stretch establishes the SMA, then a waterfall decline
        // drives RSI oversold, then a first up-tick below the average.
        let mut prices: Vec<f64> = vec![100.0; 55];
        for i in 0..12 {
            prices.push(98.0 - 2.0 * i as f64);
        }
        prices.push(77.0); // up-tick from 76 while deep under the SMA
        prices.push(78.0);
        let signal = mean_reversion(&daily_bars(&prices), 50, 35.0, 60.0);
        assert!(signal.values().iter().any(|&v| v == 1));
    }

    #[test]
    fn silent_above_average() {
        let prices: Vec<f64> = (0..80).map(|i| 100.0 + i as f64).collect();
        let signal = mean_reversion(&daily_bars(&prices), 50, 35.0, 60.0);
        assert!(signal.values().iter().all(|&v| v == 0));
    }
}
