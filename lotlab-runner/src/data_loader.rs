//! CSV bar loading with header normalization.
//!
//! Accepts the raw exchange dumps the original pipeline consumed: a
//! timestamp column named `datetime`, `date`, or `timestamp` (minute or
//! date resolution) plus `open`/`high`/`low`/`close`/`volume`. Headers
//! are matched case-insensitively after trimming. Rows are sorted by
//! timestamp before structural validation.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use lotlab_core::domain::{validate_bars, Bar};
use lotlab_core::error::DataError;

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("no timestamp column found (expected one of: datetime, date, timestamp)")]
    MissingTimestamp,

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("unparseable timestamp '{value}' on line {line}")]
    BadTimestamp { line: usize, value: String },

    #[error("unparseable number in column '{column}' on line {line}")]
    BadNumber { line: usize, column: &'static str },

    #[error("data error: {0}")]
    Data(#[from] DataError),
}

const TIMESTAMP_COLUMNS: [&str; 3] = ["datetime", "date", "timestamp"];
const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Load and validate a bar table from a CSV file.
pub fn load_bars_csv(path: &Path) -> Result<Vec<Bar>, LoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| match e.kind() {
        csv::ErrorKind::Io(_) => LoadError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::other(e.to_string()),
        },
        _ => LoadError::Csv(e),
    })?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_ascii_lowercase())
        .collect();

    let col = |name: &'static str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(LoadError::MissingColumn(name))
    };
    let ts_col = TIMESTAMP_COLUMNS
        .iter()
        .find_map(|name| headers.iter().position(|h| h == name))
        .ok_or(LoadError::MissingTimestamp)?;
    let open_col = col("open")?;
    let high_col = col("high")?;
    let low_col = col("low")?;
    let close_col = col("close")?;
    let volume_col = col("volume")?;

    let mut bars = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let line = i + 2; // header is line 1

        let raw_ts = record.get(ts_col).unwrap_or("").trim();
        let timestamp = parse_timestamp(raw_ts).ok_or_else(|| LoadError::BadTimestamp {
            line,
            value: raw_ts.to_string(),
        })?;

        let number = |idx: usize, column: &'static str| -> Result<f64, LoadError> {
            record
                .get(idx)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .ok_or(LoadError::BadNumber { line, column })
        };

        bars.push(Bar {
            timestamp,
            open: number(open_col, "open")?,
            high: number(high_col, "high")?,
            low: number(low_col, "low")?,
            close: number(close_col, "close")?,
            volume: number(volume_col, "volume")?,
        });
    }

    bars.sort_by_key(|b| b.timestamp);
    validate_bars(&bars)?;
    Ok(bars)
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(ts);
        }
    }
    // Date-only rows (daily files) sit at midnight.
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_minute_bars() {
        let file = write_csv(
            "datetime,open,high,low,close,volume\n\
             2024-01-02 09:15:00,100,101,99,100.5,1200\n\
             2024-01-02 09:16:00,100.5,102,100,101,900\n",
        );
        let bars = load_bars_csv(file.path()).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 100.5);
        assert_eq!(bars[1].volume, 900.0);
    }

    #[test]
    fn normalizes_headers_and_accepts_date_column() {
        let file = write_csv(
            " Date ,Open,High,Low,Close,Volume\n\
             2024-01-02,100,101,99,100.5,1200\n\
             2024-01-03,100.5,102,100,101,900\n",
        );
        let bars = load_bars_csv(file.path()).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].timestamp.time(), chrono::NaiveTime::MIN);
    }

    #[test]
    fn sorts_rows_by_timestamp() {
        let file = write_csv(
            "datetime,open,high,low,close,volume\n\
             2024-01-03 09:15:00,2,2,2,2,1\n\
             2024-01-02 09:15:00,1,1,1,1,1\n",
        );
        let bars = load_bars_csv(file.path()).unwrap();
        assert!(bars[0].timestamp < bars[1].timestamp);
        assert_eq!(bars[0].close, 1.0);
    }

    #[test]
    fn missing_timestamp_column_is_load_error() {
        let file = write_csv("open,high,low,close,volume\n1,1,1,1,1\n");
        assert!(matches!(
            load_bars_csv(file.path()),
            Err(LoadError::MissingTimestamp)
        ));
    }

    #[test]
    fn missing_ohlcv_column_is_load_error() {
        let file = write_csv("datetime,open,high,low,close\n2024-01-02,1,1,1,1\n");
        assert!(matches!(
            load_bars_csv(file.path()),
            Err(LoadError::MissingColumn("volume"))
        ));
    }

    #[test]
    fn bad_timestamp_reports_line() {
        let file = write_csv(
            "datetime,open,high,low,close,volume\n\
             2024-01-02 09:15:00,1,1,1,1,1\n\
             not-a-date,1,1,1,1,1\n",
        );
        match load_bars_csv(file.path()) {
            Err(LoadError::BadTimestamp { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn duplicate_timestamps_are_a_data_error() {
        let file = write_csv(
            "datetime,open,high,low,close,volume\n\
             2024-01-02 09:15:00,1,1,1,1,1\n\
             2024-01-02 09:15:00,2,2,2,2,2\n",
        );
        assert!(matches!(
            load_bars_csv(file.path()),
            Err(LoadError::Data(DataError::OutOfOrderTimestamps { .. }))
        ));
    }
}
