//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1],
//! alpha = 2 / (period + 1). Seed: SMA of the first `period` values.

use crate::domain::Bar;

pub fn ema(bars: &[Bar], period: usize) -> Vec<f64> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    ema_of_series(&closes, period)
}

/// EMA over a raw f64 series. Used by MACD, which needs the EMA of a
/// derived series rather than of close prices.
pub fn ema_of_series(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "EMA period must be >= 1");
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    // First index where a full seed window of finite values ends.
    let Some(seed_end) = first_seed_end(values, period) else {
        return result;
    };

    let alpha = 2.0 / (period as f64 + 1.0);
    let seed: f64 = values[seed_end + 1 - period..=seed_end].iter().sum::<f64>() / period as f64;
    result[seed_end] = seed;

    let mut prev = seed;
    for i in (seed_end + 1)..n {
        if values[i].is_nan() {
            // Taint: once broken, the recursion cannot recover.
            return result;
        }
        prev = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = prev;
    }
    result
}

/// Find the last index of the earliest window of `period` consecutive
/// finite values, or None if no such window exists.
fn first_seed_end(values: &[f64], period: usize) -> Option<usize> {
    let mut run = 0usize;
    for (i, v) in values.iter().enumerate() {
        if v.is_nan() {
            run = 0;
        } else {
            run += 1;
            if run >= period {
                return Some(i);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn ema_3_known_values() {
        // alpha = 0.5; seed at index 2: SMA(10,11,12) = 11.0
        // EMA[3] = 0.5*13 + 0.5*11 = 12.0; EMA[4] = 0.5*14 + 0.5*12 = 13.0
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let result = ema(&bars, 3);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 11.0, DEFAULT_EPSILON);
        assert_approx(result[3], 12.0, DEFAULT_EPSILON);
        assert_approx(result[4], 13.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_period_1_equals_close() {
        let bars = make_bars(&[100.0, 200.0, 300.0]);
        let result = ema(&bars, 1);
        assert_approx(result[0], 100.0, DEFAULT_EPSILON);
        assert_approx(result[2], 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_of_series_skips_leading_nan() {
        // Leading NaN (warmup of an upstream indicator) delays the seed.
        let values = [f64::NAN, f64::NAN, 10.0, 11.0, 12.0, 13.0];
        let result = ema_of_series(&values, 3);
        assert!(result[3].is_nan());
        assert_approx(result[4], 11.0, DEFAULT_EPSILON);
        assert_approx(result[5], 12.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_too_few_values() {
        assert!(ema_of_series(&[1.0, 2.0], 5).iter().all(|v| v.is_nan()));
    }
}
