//! High-level analyses of the bundled people dataset.
//!
//! Each analysis runs the full pipeline once: load → normalize → compute.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use log::info;

use crate::config::Config;
use crate::error::Result;
use crate::ingestion::{load_from_path, LoadJournal, LoadOptions, LogObserver};
use crate::processing::{normalize, NormalizeOptions};
use crate::report::Reporter;
use crate::statistics::{compute, StatRequest};
use crate::types::StatsResult;

/// Numeric fields of the CSV people file.
pub const CSV_NUMERIC_FIELDS: &[&str] = &["age", "salary"];
/// Numeric fields of the JSON people file.
pub const JSON_NUMERIC_FIELDS: &[&str] = &["age"];

/// Statistics computed for the CSV people file.
pub fn csv_requests() -> Vec<StatRequest> {
    vec![
        StatRequest::Count,
        StatRequest::mean("age"),
        StatRequest::mean("salary"),
        StatRequest::group_count("city"),
        StatRequest::min("salary"),
        StatRequest::max("salary"),
    ]
}

/// Statistics computed for the JSON people file.
pub fn json_requests() -> Vec<StatRequest> {
    vec![StatRequest::Count, StatRequest::mean("age")]
}

/// Load options for `config`: loads are logged, and also journaled when `config.load_log` is set.
pub fn load_options(config: &Config) -> Result<LoadOptions> {
    let mut options = LoadOptions::default().with_observer(Arc::new(LogObserver));
    if let Some(path) = &config.load_log {
        options = options.with_observer(Arc::new(LoadJournal::open(path)?));
    }
    Ok(options)
}

/// Run the pipeline on one file.
pub fn analyze_file(
    path: impl AsRef<Path>,
    load: &LoadOptions,
    normalize_opts: &NormalizeOptions,
    requests: &[StatRequest],
) -> Result<StatsResult> {
    let path = path.as_ref();
    let raw = load_from_path(path, load)?;
    let normalized = normalize(&raw, normalize_opts)?;
    info!(
        "analyzing {}: {} rows kept, {} rejected",
        path.display(),
        normalized.dataset.row_count(),
        normalized.rejections.len()
    );
    compute(&normalized.dataset, requests)
}

/// Analyze the bundled CSV file (`records`, `mean_age`, `mean_salary`, `group_count_city`,
/// `min_salary`, `max_salary`).
///
/// ```no_run
/// let stats = datalab::analyze_csv_data()?;
/// println!("{:?}", stats.count("records"));
/// # Ok::<(), datalab::DataLabError>(())
/// ```
pub fn analyze_csv_data() -> Result<StatsResult> {
    analyze_csv_with(&Config::default(), &LoadOptions::default())
}

/// Analyze the bundled JSON file (`records`, `mean_age`).
pub fn analyze_json_data() -> Result<StatsResult> {
    analyze_json_with(&Config::default(), &LoadOptions::default())
}

/// Analyze `config.csv_path()`.
pub fn analyze_csv_with(config: &Config, load: &LoadOptions) -> Result<StatsResult> {
    analyze_file(
        config.csv_path(),
        load,
        &NormalizeOptions::numeric(CSV_NUMERIC_FIELDS.iter().copied()),
        &csv_requests(),
    )
}

/// Analyze `config.json_path()`.
pub fn analyze_json_with(config: &Config, load: &LoadOptions) -> Result<StatsResult> {
    analyze_file(
        config.json_path(),
        load,
        &NormalizeOptions::numeric(JSON_NUMERIC_FIELDS.iter().copied()),
        &json_requests(),
    )
}

/// The full application flow: analyze the JSON file, then the CSV file, reporting each.
pub fn run<W: Write>(config: &Config, load: &LoadOptions, reporter: &mut Reporter<W>) -> Result<()> {
    let rule = "=".repeat(60);
    reporter.log("Welcome to DataLab - Data Analysis Tool")?;
    reporter.blank()?;

    reporter.log(&rule)?;
    let json_stats = analyze_json_with(config, load)?;
    reporter.print_report(&config.json_file, &json_stats)?;
    reporter.blank()?;

    reporter.log(&rule)?;
    let csv_stats = analyze_csv_with(config, load)?;
    reporter.print_report(&config.csv_file, &csv_stats)?;
    reporter.blank()?;

    reporter.log(&rule)?;
    reporter.log("Analysis complete!")?;
    Ok(())
}
