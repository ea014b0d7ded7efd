//! End-to-end batch test: TOML config + CSV data files on disk, through
//! `run_batch`, down to exported artifacts.

use std::io::Write;
use std::path::Path;

use lotlab_runner::export::{load_artifacts, save_artifacts};
use lotlab_runner::runner::RunError;
use lotlab_runner::{run_batch, BatchConfig};

fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

/// Minute bars over two trading days, trending up then down.
fn minute_csv() -> String {
    let mut csv = String::from("datetime,open,high,low,close,volume\n");
    for day in [2, 3] {
        for minute in 0..120 {
            let h = 9 + minute / 60;
            let price = if day == 2 {
                100.0 + minute as f64 * 0.05
            } else {
                106.0 - minute as f64 * 0.04
            };
            csv.push_str(&format!(
                "2024-01-{day:02} {h:02}:{:02}:00,{price:.2},{:.2},{:.2},{price:.2},1000\n",
                minute % 60,
                price + 0.5,
                price - 0.5,
            ));
        }
    }
    csv
}

#[test]
fn batch_runs_strategies_and_survives_failures() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_file(dir.path(), "bars.csv", &minute_csv());

    let config_toml = format!(
        r#"
capital = 1e6

[[strategy]]
name = "hourly_fixed"
data = "{data}"
instrument = "nifty"
timeframe = "1h"
rule = {{ type = "fixed", values = [1, 0, 1, 0] }}

[[strategy]]
name = "missing_data"
data = "{missing}"
instrument = "nifty"
timeframe = "daily"
rule = {{ type = "macd_trend" }}

[[strategy]]
name = "daily_macd"
data = "{data}"
instrument = "banknifty"
timeframe = "daily"
rule = {{ type = "macd_trend" }}
"#,
        data = data.display(),
        missing = dir.path().join("nope.csv").display(),
    );
    let config_path = write_file(dir.path(), "batch.toml", &config_toml);

    let batch = BatchConfig::load(&config_path).unwrap();
    let runs = run_batch(&batch);
    assert_eq!(runs.len(), 3);

    // First strategy: 120 minutes per day resample to 2 hourly bars per day.
    let first = runs[0].outcome.as_ref().unwrap();
    assert_eq!(first.bar_count, 4);
    assert_eq!(first.timeframe, "1h");
    assert_eq!(first.symbol, "nifty");

    // Second fails to load but does not poison the batch.
    assert!(matches!(runs[1].outcome, Err(RunError::Load(_))));

    // Third still runs: 2 daily bars, signal all zero (MACD warmup).
    let third = runs[2].outcome.as_ref().unwrap();
    assert_eq!(third.bar_count, 2);
    assert_eq!(third.metrics.total_trades, 0);
    assert_eq!(third.metrics.win_rate_pct, 0.0);
}

#[test]
fn batch_artifacts_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_file(dir.path(), "bars.csv", &minute_csv());

    let config_toml = format!(
        r#"
capital = 1e6

[[strategy]]
name = "daily_fixed"
data = "{data}"
instrument = "nifty"
timeframe = "daily"
rule = {{ type = "fixed", values = [1, 0] }}
"#,
        data = data.display(),
    );
    let config_path = write_file(dir.path(), "batch.toml", &config_toml);

    let batch = BatchConfig::load(&config_path).unwrap();
    let runs = run_batch(&batch);
    let outcome = runs[0].outcome.as_ref().unwrap();

    let out_dir = dir.path().join("artifacts");
    let run_dir = save_artifacts(outcome, &out_dir).unwrap();
    let loaded = load_artifacts(&run_dir).unwrap();

    assert_eq!(loaded.run_id, outcome.run_id);
    assert_eq!(loaded.records.len(), outcome.records.len());
    assert_eq!(loaded.metrics.total_trades, outcome.metrics.total_trades);
}
