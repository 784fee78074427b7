//! `datalab` loads a small people dataset (CSV or JSON) into an in-memory [`types::DataSet`],
//! normalizes it, and computes descriptive statistics.
//!
//! The pipeline has three stages:
//!
//! - [`ingestion`] (loader): CSV with a header row, or a JSON array of flat objects. CSV values
//!   stay strings; JSON keeps native types.
//! - [`processing`] (processor): coerces declared numeric fields, skipping rows that fail and
//!   recording why.
//! - [`statistics`] (engine): count, mean, min, max, sum, and group counts into an ordered
//!   [`types::StatsResult`].
//!
//! [`analysis`] wires the stages together for the bundled dataset, and the `datalab` binary prints
//! the reports.
//!
//! ## Quick example
//!
//! ```no_run
//! # fn main() -> Result<(), datalab::DataLabError> {
//! let results = datalab::analyze_csv_data()?;
//! println!("records={:?}", results.count("records"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Running the stages by hand
//!
//! ```no_run
//! use datalab::ingestion::{load_from_path, LoadOptions};
//! use datalab::processing::{normalize, NormalizeOptions};
//! use datalab::statistics::{compute, StatRequest};
//!
//! # fn main() -> Result<(), datalab::DataLabError> {
//! let raw = load_from_path("people.csv", &LoadOptions::default())?;
//! let clean = normalize(&raw, &NormalizeOptions::numeric(["age"]))?;
//! for rejected in &clean.rejections {
//!     eprintln!("skipped {rejected}");
//! }
//! let stats = compute(
//!     &clean.dataset,
//!     &[StatRequest::Count, StatRequest::mean("age"), StatRequest::group_count("city")],
//! )?;
//! println!("{}", serde_json::to_string(&stats).unwrap());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`config`]: explicit configuration (data directory, default files, report settings)
//! - [`error`]: the crate error type
//! - [`export`]: write a dataset back to CSV/JSON
//! - [`files`]: data-directory file helpers (listing, glob lookup, backups)
//! - [`report`]: number formatting and the prefixed report sink

pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod files;
pub mod ingestion;
pub mod processing;
pub mod report;
pub mod statistics;
pub mod types;

pub use analysis::{analyze_csv_data, analyze_json_data};
pub use config::Config;
pub use error::{DataLabError, Result};
pub use report::{format_number, log};
