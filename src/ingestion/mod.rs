//! Loader: reads CSV and JSON files into an in-memory [`crate::types::DataSet`].
//!
//! Most callers should use [`load_from_path`] (from [`unified`]) which:
//!
//! - auto-detects format by file extension (or you can override via [`LoadOptions`])
//! - loads the whole file into memory
//! - reports success/failure/alerts to any attached [`LoadObserver`]s, such as [`LogObserver`]
//!   or a [`LoadJournal`] file
//!
//! Format-specific functions are also available under [`csv`] and [`json`].

pub mod csv;
pub mod json;
pub mod observability;
pub mod unified;

pub use observability::{LoadContext, LoadJournal, LoadObserver, LoadSeverity, LoadStats, LogObserver};
pub use unified::{load_from_path, DataFormat, LoadOptions, LoadRequest};
