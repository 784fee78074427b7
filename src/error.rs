use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type used across the crate.
pub type Result<T> = std::result::Result<T, DataLabError>;

/// Error type returned by loading, normalization, statistics, and file helpers.
///
/// Loader and statistics failures propagate to the caller immediately. The processor recovers
/// bad rows internally and only surfaces [`DataLabError::EmptyDataset`].
#[derive(Debug, Error)]
pub enum DataLabError {
    /// The input path does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Any other I/O failure (permission denied, read error, ...).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Low-level CSV reader/writer error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error (used when exporting).
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input could not be parsed into the expected shape.
    #[error("format error: {message}")]
    FormatError { message: String },

    /// No rows survived normalization, or there is nothing to write.
    #[error("dataset is empty: {message}")]
    EmptyDataset { message: String },

    /// A statistic references a field that is not part of the dataset schema.
    #[error("field '{field}' not found in dataset schema")]
    MissingField { field: String },

    /// A statistic was requested over zero eligible values.
    #[error("insufficient data: no numeric values for field '{field}'")]
    InsufficientData { field: String },

    /// Invalid glob pattern passed to the file helpers.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl DataLabError {
    /// Map an I/O error on `path` to [`DataLabError::FileNotFound`] when appropriate.
    pub(crate) fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path: path.into() }
        } else {
            Self::Io(err)
        }
    }

    pub(crate) fn format(message: impl Into<String>) -> Self {
        Self::FormatError {
            message: message.into(),
        }
    }
}
