//! Reporting and export — JSON, CSV, and Markdown artifact generation.
//!
//! Three export formats for run results:
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: position tape and equity curve for external analysis tools
//! - **Markdown**: human-readable single-run summaries
//!
//! Persisted manifests carry a `schema_version` field; unknown versions
//! are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::runner::{RunOutcome, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `RunOutcome` to pretty JSON.
pub fn export_json(outcome: &RunOutcome) -> Result<String> {
    serde_json::to_string_pretty(outcome).context("failed to serialize RunOutcome to JSON")
}

/// Deserialize a `RunOutcome` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<RunOutcome> {
    let outcome: RunOutcome =
        serde_json::from_str(json).context("failed to deserialize RunOutcome from JSON")?;
    if outcome.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            outcome.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(outcome)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export the bar-by-bar position tape as CSV.
///
/// Columns: timestamp, close, position, exec_price, lots, entry_price,
/// exit_price, pnl, cumulative_pnl, equity
pub fn export_positions_csv(outcome: &RunOutcome) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "timestamp",
        "close",
        "position",
        "exec_price",
        "lots",
        "entry_price",
        "exit_price",
        "pnl",
        "cumulative_pnl",
        "equity",
    ])?;

    let opt = |v: Option<f64>| v.map(|x| format!("{x:.6}")).unwrap_or_default();
    for r in &outcome.records {
        wtr.write_record([
            &r.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            &format!("{:.6}", r.close),
            &r.position.to_string(),
            &format!("{:.6}", r.exec_price),
            &r.lots.to_string(),
            &opt(r.entry_price),
            &opt(r.exit_price),
            &format!("{:.2}", r.pnl),
            &format!("{:.2}", r.cumulative_pnl),
            &format!("{:.2}", r.equity),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Export an equity curve as CSV with bar_index and equity columns.
pub fn export_equity_csv(equity_curve: &[f64]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["bar_index", "equity"])?;
    for (i, eq) in equity_curve.iter().enumerate() {
        wtr.write_record([&i.to_string(), &format!("{:.2}", eq)])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Markdown report ────────────────────────────────────────────────

/// Generate a Markdown summary for a single run.
pub fn generate_report(outcome: &RunOutcome) -> String {
    let mut md = String::with_capacity(1024);

    md.push_str(&format!("# {}\n\n", outcome.name));

    md.push_str("## Run\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Symbol | {} |\n", outcome.symbol));
    md.push_str(&format!("| Rule | {} |\n", outcome.rule));
    md.push_str(&format!("| Timeframe | {} |\n", outcome.timeframe));
    md.push_str(&format!("| Bars | {} |\n", outcome.bar_count));
    md.push_str(&format!("| Capital | {:.0} |\n", outcome.capital));
    md.push_str(&format!("| Run ID | {} |\n", outcome.run_id));
    md.push('\n');

    let m = &outcome.metrics;
    md.push_str("## Performance\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Sharpe | {} |\n", fmt_metric(m.sharpe)));
    md.push_str(&format!("| Calmar | {} |\n", fmt_metric(m.calmar)));
    md.push_str(&format!("| Max Drawdown | {:.2}% |\n", m.max_drawdown_pct));
    md.push_str(&format!(
        "| Time in Drawdown | {} bars |\n",
        m.time_in_drawdown
    ));
    md.push_str(&format!("| CAGR | {:.2}% |\n", m.cagr_pct));
    md.push_str(&format!("| Trades | {} |\n", m.total_trades));
    md.push_str(&format!("| Win Rate | {:.2}% |\n", m.win_rate_pct));
    md.push('\n');

    md
}

/// Markdown table of a whole batch, one row per strategy, for quick
/// side-by-side comparison. Failed runs get an error row.
pub fn generate_batch_report(runs: &[crate::runner::StrategyRun]) -> String {
    let mut md = String::with_capacity(1024);
    md.push_str("# Batch Results\n\n");
    md.push_str("| Strategy | Sharpe | Calmar | Max DD | CAGR | Trades | Win Rate |\n");
    md.push_str("| --- | ---: | ---: | ---: | ---: | ---: | ---: |\n");
    for run in runs {
        match &run.outcome {
            Ok(o) => {
                let m = &o.metrics;
                md.push_str(&format!(
                    "| {} | {} | {} | {:.2}% | {:.2}% | {} | {:.2}% |\n",
                    run.name,
                    fmt_metric(m.sharpe),
                    fmt_metric(m.calmar),
                    m.max_drawdown_pct,
                    m.cagr_pct,
                    m.total_trades,
                    m.win_rate_pct
                ));
            }
            Err(e) => {
                md.push_str(&format!("| {} | failed: {e} | | | | | |\n", run.name));
            }
        }
    }
    md.push('\n');
    md
}

/// NaN sentinels render as "n/a" rather than "NaN".
fn fmt_metric(v: f64) -> String {
    if v.is_nan() {
        "n/a".to_string()
    } else {
        format!("{v:.3}")
    }
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for a single run.
///
/// Creates a directory named `{name}_{run_id_prefix}/` under `output_dir`
/// containing:
/// - `manifest.json` — the full `RunOutcome`
/// - `positions.csv` — bar-by-bar position tape
/// - `equity.csv` — equity curve
/// - `report.md` — Markdown summary
///
/// Returns the path to the created directory.
pub fn save_artifacts(outcome: &RunOutcome, output_dir: &Path) -> Result<PathBuf> {
    let id_prefix: String = outcome.run_id.chars().take(8).collect();
    let run_dir = output_dir.join(format!("{}_{}", outcome.name, id_prefix));
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    std::fs::write(run_dir.join("manifest.json"), export_json(outcome)?)?;
    std::fs::write(run_dir.join("positions.csv"), export_positions_csv(outcome)?)?;

    let equity: Vec<f64> = outcome.records.iter().map(|r| r.equity).collect();
    std::fs::write(run_dir.join("equity.csv"), export_equity_csv(&equity)?)?;

    std::fs::write(run_dir.join("report.md"), generate_report(outcome))?;

    Ok(run_dir)
}

/// Load a `RunOutcome` back from an artifact directory's manifest.json.
pub fn load_artifacts(dir: &Path) -> Result<RunOutcome> {
    let manifest_path = dir.join("manifest.json");
    let json = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    import_json(&json)
}
