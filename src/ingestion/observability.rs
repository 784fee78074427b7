//! Load outcome reporting: severities, the [`LoadObserver`] hook, and the stock observers.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{DataLabError, Result};

use super::unified::DataFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (the load failed on bad content).
    Error,
    /// Critical error (missing file or other I/O failure).
    Critical,
}

impl LoadSeverity {
    /// Severity assigned to a load failure.
    pub fn for_error(e: &DataLabError) -> Self {
        match e {
            DataLabError::FileNotFound { .. } | DataLabError::Io(_) => Self::Critical,
            DataLabError::Csv(err) => match err.kind() {
                csv::ErrorKind::Io(_) => Self::Critical,
                _ => Self::Error,
            },
            _ => Self::Error,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }

    fn log_level(self) -> log::Level {
        match self {
            Self::Info => log::Level::Info,
            Self::Warning => log::Level::Warn,
            Self::Error | Self::Critical => log::Level::Error,
        }
    }
}

impl fmt::Display for LoadSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Context about a load attempt.
#[derive(Debug, Clone)]
pub struct LoadContext {
    /// The input path.
    pub path: PathBuf,
    /// Format used for loading.
    pub format: DataFormat,
}

/// Minimal stats reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Number of loaded rows.
    pub rows: usize,
    /// Number of fields in the schema.
    pub fields: usize,
}

/// Observer interface for load outcomes.
pub trait LoadObserver: Send + Sync {
    /// Called when loading succeeds.
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    /// Called when loading fails.
    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &DataLabError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &DataLabError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Routes load events to the `log` facade under the `datalab::load` target.
#[derive(Debug, Default)]
pub struct LogObserver;

impl LoadObserver for LogObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        log::info!(
            target: "datalab::load",
            "loaded {} {}: {} records, {} fields",
            ctx.format,
            ctx.path.display(),
            stats.rows,
            stats.fields
        );
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &DataLabError) {
        log::log!(
            target: "datalab::load",
            severity.log_level(),
            "failed {} {} [{severity}]: {error}",
            ctx.format,
            ctx.path.display()
        );
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &DataLabError) {
        log::error!(
            target: "datalab::load",
            "alert: {} {} could not be loaded [{severity}]: {error}",
            ctx.format,
            ctx.path.display()
        );
    }
}

/// Append-only journal of load outcomes, one line per file load.
///
/// ```text
/// 2024-03-09 14:05:07 loaded json data/data.json: 5 records, 4 fields
/// 2024-03-09 14:05:09 failed csv data/people.csv [critical]: file not found: data/people.csv
/// ```
///
/// A failure line already carries its severity, so alerts add nothing to the journal.
#[derive(Debug)]
pub struct LoadJournal {
    path: PathBuf,
    file: Mutex<File>,
}

impl LoadJournal {
    /// Open (or create) the journal at `path` for appending.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| DataLabError::from_io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    /// Location of the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, entry: fmt::Arguments<'_>) {
        let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let written = match self.file.lock() {
            Ok(mut file) => writeln!(file, "{stamp} {entry}"),
            Err(poisoned) => writeln!(poisoned.into_inner(), "{stamp} {entry}"),
        };
        if let Err(e) = written {
            log::warn!("cannot write load journal {}: {e}", self.path.display());
        }
    }
}

impl LoadObserver for LoadJournal {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        self.append(format_args!(
            "loaded {} {}: {} records, {} fields",
            ctx.format,
            ctx.path.display(),
            stats.rows,
            stats.fields
        ));
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &DataLabError) {
        self.append(format_args!(
            "failed {} {} [{severity}]: {error}",
            ctx.format,
            ctx.path.display()
        ));
    }

    fn on_alert(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &DataLabError) {}
}
