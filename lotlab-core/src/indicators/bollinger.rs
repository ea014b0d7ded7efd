//! Bollinger Bands — moving average +/- standard deviation multiplier.
//!
//! Middle: SMA(close, period); upper/lower: middle +/- mult * stddev.
//! Uses population stddev (divide by N). First valid at period - 1.

use crate::domain::Bar;
use crate::indicators::sma;

/// All three bands, aligned 1:1 with the input bars.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

pub fn bollinger(bars: &[Bar], period: usize, multiplier: f64) -> BollingerBands {
    assert!(period >= 1, "Bollinger period must be >= 1");
    let n = bars.len();
    let middle = sma(bars, period);
    let mut upper = vec![f64::NAN; n];
    let mut lower = vec![f64::NAN; n];

    for i in (period.saturating_sub(1))..n {
        if middle[i].is_nan() {
            continue;
        }
        let window = &bars[i + 1 - period..=i];
        let mean = middle[i];
        let variance =
            window.iter().map(|b| (b.close - mean).powi(2)).sum::<f64>() / period as f64;
        let band = multiplier * variance.sqrt();
        upper[i] = mean + band;
        lower[i] = mean - band;
    }

    BollingerBands { upper, middle, lower }
}
