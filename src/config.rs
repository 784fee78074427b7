//! Configuration: data directory, default file names, and report settings.
//!
//! Configuration is an explicit [`Config`] value passed to the functions that need it. There is
//! no process-wide state, so tests can point a `Config` at a temporary directory.

use std::env;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory in [`Config::from_env`].
pub const DATA_DIR_ENV: &str = "DATALAB_DATA_DIR";
/// Environment variable naming the load journal file in [`Config::from_env`].
pub const LOAD_LOG_ENV: &str = "DATALAB_LOAD_LOG";

/// CSV file analyzed when none is named.
pub const DEFAULT_CSV_FILE: &str = "people.csv";
/// JSON file analyzed when none is named.
pub const DEFAULT_JSON_FILE: &str = "data.json";
/// Prefix of report lines.
pub const LOG_PREFIX: &str = "[DataLab]";
/// Decimal places used by reports.
pub const DECIMAL_PLACES: usize = 2;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the bundled data files.
    pub data_dir: PathBuf,
    /// CSV file analyzed by default (relative to `data_dir`).
    pub csv_file: String,
    /// JSON file analyzed by default (relative to `data_dir`).
    pub json_file: String,
    /// Prefix for every line written by [`crate::report::Reporter`].
    pub log_prefix: String,
    /// Default decimal places for formatted numbers.
    pub decimal_places: usize,
    /// File that receives one line per load outcome, if any.
    pub load_log: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: bundled_data_dir(),
            csv_file: DEFAULT_CSV_FILE.to_string(),
            json_file: DEFAULT_JSON_FILE.to_string(),
            log_prefix: LOG_PREFIX.to_string(),
            decimal_places: DECIMAL_PLACES,
            load_log: None,
        }
    }
}

impl Config {
    /// Defaults, with `data_dir` taken from `DATALAB_DATA_DIR` and `load_log` from
    /// `DATALAB_LOAD_LOG` when they are set and non-empty.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            cfg = cfg.with_data_dir(dir);
        }
        if let Some(log) = env::var_os(LOAD_LOG_ENV).filter(|v| !v.is_empty()) {
            cfg = cfg.with_load_log(log);
        }
        cfg
    }

    /// Point the configuration at another data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Journal every load to `path`.
    pub fn with_load_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.load_log = Some(path.into());
        self
    }

    /// Full path of `filename` inside the data directory.
    pub fn data_path(&self, filename: impl AsRef<Path>) -> PathBuf {
        self.data_dir.join(filename)
    }

    /// Full path of the CSV file.
    pub fn csv_path(&self) -> PathBuf {
        self.data_path(&self.csv_file)
    }

    /// Full path of the JSON file.
    pub fn json_path(&self) -> PathBuf {
        self.data_path(&self.json_file)
    }

    /// Human-readable dump of the configuration.
    pub fn describe(&self) -> String {
        let rule = "=".repeat(60);
        let mut out = String::new();
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "DataLab Configuration");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "Data directory:     {}", self.data_dir.display());
        let _ = writeln!(out);
        let _ = writeln!(out, "Default files:");
        let _ = writeln!(out, "  JSON: {}", self.json_path().display());
        let _ = writeln!(out, "  CSV:  {}", self.csv_path().display());
        let _ = writeln!(out);
        let _ = writeln!(out, "Settings:");
        let _ = writeln!(out, "  Log prefix:       {}", self.log_prefix);
        let _ = writeln!(out, "  Decimal places:   {}", self.decimal_places);
        match &self.load_log {
            Some(path) => {
                let _ = writeln!(out, "  Load journal:     {}", path.display());
            }
            None => {
                let _ = writeln!(out, "  Load journal:     (none)");
            }
        }
        let _ = write!(out, "{rule}");
        out
    }
}

/// The `data/` directory shipped next to this crate's manifest.
pub fn bundled_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}
