//! Unified loading entrypoint.
//!
//! Most callers should use [`load_from_path`], which loads a file into an in-memory
//! [`crate::types::DataSet`].
//!
//! - If [`LoadOptions::format`] is `None`, the format is inferred from the file extension.
//! - Every [`super::observability::LoadObserver`] attached to the options is told about the
//!   outcome, in the order they were attached.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{DataLabError, Result};
use crate::types::DataSet;

use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};
use super::{csv, json};

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// JSON array of flat objects.
    Json,
}

impl DataFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Infer the format from `path`'s extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                DataLabError::format(format!(
                    "cannot infer format: path has no extension ({})",
                    path.display()
                ))
            })?;

        Self::from_extension(ext).ok_or_else(|| {
            DataLabError::format(format!(
                "cannot infer format from extension '{ext}' for path ({})",
                path.display()
            ))
        })
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Csv => "csv",
            Self::Json => "json",
        })
    }
}

/// Options controlling [`load_from_path`].
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// If `None`, auto-detect format from file extension.
    pub format: Option<DataFormat>,
    /// Observers notified of each load outcome.
    pub observers: Vec<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("format", &self.format)
            .field("observers", &self.observers.len())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            observers: Vec::new(),
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

impl LoadOptions {
    /// Force a specific format instead of inferring it from the extension.
    pub fn with_format(mut self, format: DataFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Attach an observer after any already attached.
    pub fn with_observer(mut self, observer: Arc<dyn LoadObserver>) -> Self {
        self.observers.push(observer);
        self
    }
}

/// Load a CSV or JSON file into a [`DataSet`].
///
/// Each attached observer receives:
///
/// - `on_success` on success, with row/field counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use datalab::ingestion::{load_from_path, LoadOptions};
///
/// # fn main() -> Result<(), datalab::DataLabError> {
/// // Uses `.csv` to select CSV loading.
/// let ds = load_from_path("people.csv", &LoadOptions::default())?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
///
/// Force a format explicitly:
///
/// ```no_run
/// use datalab::ingestion::{load_from_path, DataFormat, LoadOptions};
///
/// # fn main() -> Result<(), datalab::DataLabError> {
/// let opts = LoadOptions::default().with_format(DataFormat::Json);
/// let ds = load_from_path("people_export", &opts)?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
pub fn load_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> Result<DataSet> {
    let path = path.as_ref();
    let fmt = match options.format {
        Some(f) => f,
        None => DataFormat::from_path(path)?,
    };

    let result = match fmt {
        DataFormat::Csv => csv::load_csv_from_path(path),
        DataFormat::Json => json::load_json_from_path(path),
    };

    if !options.observers.is_empty() {
        let ctx = LoadContext {
            path: path.to_path_buf(),
            format: fmt,
        };
        match &result {
            Ok(ds) => {
                let stats = LoadStats {
                    rows: ds.row_count(),
                    fields: ds.schema.len(),
                };
                for obs in &options.observers {
                    obs.on_success(&ctx, stats);
                }
            }
            Err(e) => {
                let sev = LoadSeverity::for_error(e);
                let alert = sev >= options.alert_at_or_above;
                for obs in &options.observers {
                    obs.on_failure(&ctx, sev, e);
                    if alert {
                        obs.on_alert(&ctx, sev, e);
                    }
                }
            }
        }
    }

    result
}

/// Owned load request, handy when the path is decided away from where it is loaded.
#[derive(Clone, Debug)]
pub struct LoadRequest {
    /// Path to the input file.
    pub path: PathBuf,
    /// Options controlling the load.
    pub options: LoadOptions,
}

impl LoadRequest {
    /// Bundle `path` with the options it should be loaded with.
    pub fn new(path: impl Into<PathBuf>, options: LoadOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    /// Execute the request by calling [`load_from_path`].
    pub fn run(&self) -> Result<DataSet> {
        load_from_path(&self.path, &self.options)
    }
}
