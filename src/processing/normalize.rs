//! Type coercion and row filtering for [`crate::types::DataSet`].

use std::fmt;

use log::{debug, warn};

use crate::error::{DataLabError, Result};
use crate::types::{DataSet, Value};

/// Options for [`normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Fields whose values must be numeric. String values are coerced; rows that fail are
    /// rejected.
    pub numeric_fields: Vec<String>,
}

impl NormalizeOptions {
    /// Declare the numeric fields.
    pub fn numeric<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            numeric_fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// Why a row was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    /// A string value did not parse as a number.
    NotNumeric { raw: String },
    /// The value parsed to NaN or an infinity.
    NonFinite { raw: String },
    /// The value has a type that cannot be coerced to a number (e.g. bool).
    UnsupportedType { found: &'static str },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NotNumeric { raw } => write!(f, "'{raw}' is not a number"),
            RejectReason::NonFinite { raw } => write!(f, "'{raw}' is not a finite number"),
            RejectReason::UnsupportedType { found } => {
                write!(f, "{found} value cannot be used as a number")
            }
        }
    }
}

/// A rejected row together with the first field that failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// 0-based index of the row in the input dataset.
    pub row: usize,
    /// Field that failed coercion.
    pub field: String,
    /// Why the value could not be used.
    pub reason: RejectReason,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {} field '{}': {}", self.row, self.field, self.reason)
    }
}

/// Outcome of normalizing one row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// The normalized row, in schema order.
    Accepted(Vec<Value>),
    /// The row is skipped.
    Rejected(Rejection),
}

/// Result of [`normalize`]: the retained rows plus every rejection, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Accepted rows with numeric fields coerced, same schema as the input.
    pub dataset: DataSet,
    /// One entry per skipped row.
    pub rejections: Vec<Rejection>,
}

/// Normalize a single row.
///
/// `numeric_idxs` are `(column index, field name)` pairs of the declared numeric fields.
pub fn normalize_row(row_idx: usize, row: &[Value], numeric_idxs: &[(usize, &str)]) -> RowOutcome {
    let mut out = row.to_vec();
    for &(idx, field) in numeric_idxs {
        let Some(value) = out.get_mut(idx) else {
            continue;
        };
        match coerce_numeric(value) {
            Ok(coerced) => *value = coerced,
            Err(reason) => {
                return RowOutcome::Rejected(Rejection {
                    row: row_idx,
                    field: field.to_owned(),
                    reason,
                });
            }
        }
    }
    RowOutcome::Accepted(out)
}

/// Coerce `dataset` into a new dataset where every declared numeric field holds
/// [`Value::Int64`], [`Value::Float64`], or [`Value::Null`].
///
/// Rows that fail coercion are skipped and reported in [`Normalized::rejections`]; order of the
/// retained rows is preserved. Returns [`DataLabError::EmptyDataset`] when no row survives.
pub fn normalize(dataset: &DataSet, options: &NormalizeOptions) -> Result<Normalized> {
    let mut numeric_idxs: Vec<(usize, &str)> = Vec::with_capacity(options.numeric_fields.len());
    for field in &options.numeric_fields {
        match dataset.schema.index_of(field) {
            Some(idx) => numeric_idxs.push((idx, field.as_str())),
            None => warn!("numeric field '{field}' is not in the dataset schema; ignoring"),
        }
    }

    let mut rows = Vec::with_capacity(dataset.row_count());
    let mut rejections = Vec::new();
    for (row_idx, row) in dataset.rows.iter().enumerate() {
        match normalize_row(row_idx, row, &numeric_idxs) {
            RowOutcome::Accepted(values) => rows.push(values),
            RowOutcome::Rejected(rejection) => {
                debug!("skipping {rejection}");
                rejections.push(rejection);
            }
        }
    }

    if rows.is_empty() {
        return Err(DataLabError::EmptyDataset {
            message: format!(
                "no valid rows after normalization ({} input rows, {} rejected)",
                dataset.row_count(),
                rejections.len()
            ),
        });
    }

    if !rejections.is_empty() {
        warn!(
            "normalization rejected {} of {} rows",
            rejections.len(),
            dataset.row_count()
        );
    }

    Ok(Normalized {
        dataset: DataSet::new(dataset.schema.clone(), rows),
        rejections,
    })
}

fn coerce_numeric(value: &Value) -> std::result::Result<Value, RejectReason> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::Int64(v) => Ok(Value::Int64(*v)),
        Value::Float64(v) if v.is_finite() => Ok(Value::Float64(*v)),
        Value::Float64(v) => Err(RejectReason::NonFinite { raw: v.to_string() }),
        Value::Bool(_) => Err(RejectReason::UnsupportedType {
            found: value.type_name(),
        }),
        Value::Utf8(raw) => parse_number(raw),
    }
}

fn parse_number(raw: &str) -> std::result::Result<Value, RejectReason> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        return Ok(Value::Int64(v));
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Value::Float64(v)),
        Ok(_) => Err(RejectReason::NonFinite {
            raw: raw.to_owned(),
        }),
        Err(_) => Err(RejectReason::NotNumeric {
            raw: raw.to_owned(),
        }),
    }
}
