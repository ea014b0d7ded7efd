//! Simple Moving Average (SMA).
//!
//! Rolling mean of close prices; first valid value at index period - 1.

use crate::domain::Bar;

pub fn sma(bars: &[Bar], period: usize) -> Vec<f64> {
    assert!(period >= 1, "SMA period must be >= 1");
    let n = bars.len();
    let mut result = vec![f64::NAN; n];
    if n < period {
        return result;
    }

    let mut sum: f64 = bars.iter().take(period).map(|b| b.close).sum();
    result[period - 1] = sum / period as f64;

    for i in period..n {
        sum += bars[i].close - bars[i - period].close;
        result[i] = sum / period as f64;
    }
    result
}
