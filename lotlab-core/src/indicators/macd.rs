//! MACD — moving average convergence/divergence.
//!
//! macd = EMA(close, fast) - EMA(close, slow); signal = EMA(macd, signal).
//! Standard periods 12/26/9.

use crate::domain::Bar;
use crate::indicators::ema::ema_of_series;
use crate::indicators::closes;

/// MACD line and its signal line, aligned 1:1 with the input bars.
#[derive(Debug, Clone)]
pub struct Macd {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
}

pub fn macd(bars: &[Bar], fast: usize, slow: usize, signal_period: usize) -> Macd {
    assert!(fast < slow, "MACD fast period must be shorter than slow");
    let close = closes(bars);
    let fast_ema = ema_of_series(&close, fast);
    let slow_ema = ema_of_series(&close, slow);

    let line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal = ema_of_series(&line, signal_period);

    Macd { macd: line, signal }
}
