//! Bar resampling — aggregate fine-grained bars into coarser calendar buckets.
//!
//! Standard OHLCV reduction per bucket: open = first, high = max, low = min,
//! close = last, volume = sum. Buckets with no source bars are simply absent
//! from the output; there is no forward-fill or zero-fill.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::domain::{validate_bars, Bar};
use crate::error::DataError;

/// Fixed-width calendar bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Timeframe {
    /// N-minute buckets anchored at midnight (e.g. 15-minute).
    Minutes(u32),
    Hourly,
    Daily,
}

impl Timeframe {
    /// Truncate a timestamp to the start of its bucket.
    pub fn bucket_start(&self, ts: NaiveDateTime) -> NaiveDateTime {
        let midnight = ts.date().and_hms_opt(0, 0, 0).expect("midnight is valid");
        match self {
            Timeframe::Minutes(m) => {
                let minute_of_day = ts.hour() * 60 + ts.minute();
                let bucket = minute_of_day - minute_of_day % m;
                midnight + chrono::Duration::minutes(i64::from(bucket))
            }
            Timeframe::Hourly => midnight + chrono::Duration::hours(i64::from(ts.hour())),
            Timeframe::Daily => midnight,
        }
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" | "1d" => Ok(Timeframe::Daily),
            "hourly" | "1h" => Ok(Timeframe::Hourly),
            other => {
                let digits = other.strip_suffix("min").or_else(|| other.strip_suffix('m'));
                match digits.and_then(|d| d.parse::<u32>().ok()) {
                    Some(m) if m >= 1 => Ok(Timeframe::Minutes(m)),
                    _ => Err(format!("unrecognized timeframe '{s}'")),
                }
            }
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeframe::Minutes(m) => write!(f, "{m}min"),
            Timeframe::Hourly => write!(f, "hourly"),
            Timeframe::Daily => write!(f, "daily"),
        }
    }
}

impl TryFrom<String> for Timeframe {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Timeframe> for String {
    fn from(tf: Timeframe) -> Self {
        tf.to_string()
    }
}

/// Aggregate `bars` into `timeframe` buckets.
///
/// Input must be a valid ascending bar sequence (`DataError` otherwise).
/// Output preserves ascending order, one bar per non-empty bucket, stamped
/// at the bucket start.
pub fn resample(bars: &[Bar], timeframe: Timeframe) -> Result<Vec<Bar>, DataError> {
    validate_bars(bars)?;

    let mut out: Vec<Bar> = Vec::new();
    for bar in bars {
        let start = timeframe.bucket_start(bar.timestamp);
        match out.last_mut() {
            // Ascending input means bars of one bucket are contiguous.
            Some(current) if current.timestamp == start => {
                current.high = current.high.max(bar.high);
                current.low = current.low.min(bar.low);
                current.close = bar.close;
                current.volume += bar.volume;
            }
            _ => out.push(Bar {
                timestamp: start,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                volume: bar.volume,
            }),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(day: u32, h: u32, m: u32, o: f64, hi: f64, lo: f64, c: f64, v: f64) -> Bar {
        Bar {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, day)
                .unwrap()
                .and_hms_opt(h, m, 0)
                .unwrap(),
            open: o,
            high: hi,
            low: lo,
            close: c,
            volume: v,
        }
    }

    #[test]
    fn parses_timeframes() {
        assert_eq!("daily".parse::<Timeframe>().unwrap(), Timeframe::Daily);
        assert_eq!("1D".parse::<Timeframe>().unwrap(), Timeframe::Daily);
        assert_eq!("1h".parse::<Timeframe>().unwrap(), Timeframe::Hourly);
        assert_eq!("15min".parse::<Timeframe>().unwrap(), Timeframe::Minutes(15));
        assert_eq!("5m".parse::<Timeframe>().unwrap(), Timeframe::Minutes(5));
        assert!("fortnight".parse::<Timeframe>().is_err());
        assert!("0min".parse::<Timeframe>().is_err());
    }

    #[test]
    fn bucket_start_truncates() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(10, 37, 0)
            .unwrap();
        assert_eq!(
            Timeframe::Minutes(15).bucket_start(ts),
            NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap()
        );
        assert_eq!(
            Timeframe::Hourly.bucket_start(ts),
            NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
        );
        assert_eq!(
            Timeframe::Daily.bucket_start(ts),
            NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn hourly_reduction() {
        let bars = vec![
            bar(2, 9, 15, 100.0, 101.0, 99.0, 100.5, 10.0),
            bar(2, 9, 30, 100.5, 103.0, 100.0, 102.0, 20.0),
            bar(2, 9, 45, 102.0, 102.5, 98.0, 99.0, 5.0),
            bar(2, 10, 0, 99.0, 99.5, 98.5, 99.2, 7.0),
        ];
        let out = resample(&bars, Timeframe::Hourly).unwrap();
        assert_eq!(out.len(), 2);

        // 09:00 bucket: first open, max high, min low, last close, sum volume
        assert_eq!(out[0].timestamp, bar(2, 9, 0, 0.0, 0.0, 0.0, 0.0, 0.0).timestamp);
        assert_eq!(out[0].open, 100.0);
        assert_eq!(out[0].high, 103.0);
        assert_eq!(out[0].low, 98.0);
        assert_eq!(out[0].close, 99.0);
        assert_eq!(out[0].volume, 35.0);

        assert_eq!(out[1].open, 99.0);
        assert_eq!(out[1].volume, 7.0);
    }

    #[test]
    fn empty_buckets_are_absent() {
        // A gap from 09:xx to 14:xx must not produce bars for 10:00-13:00.
        let bars = vec![
            bar(2, 9, 20, 100.0, 101.0, 99.0, 100.0, 1.0),
            bar(2, 14, 5, 105.0, 106.0, 104.0, 105.5, 2.0),
        ];
        let out = resample(&bars, Timeframe::Hourly).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].timestamp.hour(), 9);
        assert_eq!(out[1].timestamp.hour(), 14);
    }

    #[test]
    fn daily_reduction_spans_days() {
        let bars = vec![
            bar(2, 9, 15, 100.0, 104.0, 99.0, 103.0, 10.0),
            bar(2, 15, 15, 103.0, 105.0, 102.0, 104.0, 12.0),
            bar(3, 9, 15, 104.0, 104.5, 101.0, 102.0, 8.0),
        ];
        let out = resample(&bars, Timeframe::Daily).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].high, 105.0);
        assert_eq!(out[0].low, 99.0);
        assert_eq!(out[0].close, 104.0);
        assert_eq!(out[0].volume, 22.0);
        assert_eq!(out[1].close, 102.0);
    }

    #[test]
    fn empty_input_is_data_error() {
        assert_eq!(resample(&[], Timeframe::Daily), Err(DataError::Empty));
    }

    #[test]
    fn output_is_ascending() {
        let bars: Vec<Bar> = (0..120)
            .map(|i| bar(2, 9 + i / 60, i % 60, 100.0, 101.0, 99.0, 100.0, 1.0))
            .collect();
        let out = resample(&bars, Timeframe::Minutes(15)).unwrap();
        assert!(out.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert_eq!(out.len(), 8);
    }
}
