//! Indicator functions consumed by strategy rules.
//!
//! Each function takes a bar slice and returns a `Vec<f64>` aligned 1:1
//! with the input, with NaN before the warmup window. Indicators are
//! collaborators of the simulator, not part of it: the engine only ever
//! sees the 0/1 signal a rule derives from these columns.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rolling;
pub mod rsi;
pub mod sma;

pub use bollinger::{bollinger, BollingerBands};
pub use ema::{ema, ema_of_series};
pub use macd::{macd, Macd};
pub use rolling::rolling_max;
pub use rsi::rsi;
pub use sma::sma;

use crate::domain::Bar;

/// Extract the close column.
pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Create synthetic daily bars from close prices for testing.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                timestamp: base + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
