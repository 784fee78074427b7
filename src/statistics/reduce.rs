//! Numeric reductions and group counts over a single field.

use crate::error::{DataLabError, Result};
use crate::types::{DataSet, Value};

/// Built-in numeric reductions over a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Sum of numeric values. An empty subset sums to `0.0`.
    Sum,
    /// Arithmetic mean (sum / count).
    Mean,
    /// Minimum numeric value.
    Min,
    /// Maximum numeric value.
    Max,
}

/// Reduce `field` using a [`ReduceOp`].
///
/// Only rows where the field holds an `Int64` or `Float64` are considered; nulls and non-numeric
/// values are skipped.
///
/// - Returns [`DataLabError::MissingField`] if `field` is not in the schema.
/// - For `Mean`/`Min`/`Max`, returns [`DataLabError::InsufficientData`] when no numeric value is
///   present.
pub fn reduce(dataset: &DataSet, field: &str, op: ReduceOp) -> Result<f64> {
    let idx = field_index(dataset, field)?;

    let mut n = 0usize;
    let mut acc: Option<f64> = None;
    for v in dataset.column(idx).filter_map(Value::as_f64) {
        n += 1;
        acc = Some(match (op, acc) {
            (ReduceOp::Sum | ReduceOp::Mean, Some(a)) => a + v,
            (ReduceOp::Min, Some(a)) => a.min(v),
            (ReduceOp::Max, Some(a)) => a.max(v),
            (_, None) => v,
        });
    }

    match (op, acc) {
        (ReduceOp::Sum, acc) => Ok(acc.unwrap_or(0.0)),
        (ReduceOp::Mean, Some(total)) => Ok(total / n as f64),
        (ReduceOp::Min | ReduceOp::Max, Some(v)) => Ok(v),
        (_, None) => Err(DataLabError::InsufficientData {
            field: field.to_owned(),
        }),
    }
}

/// Number of records.
pub fn count(dataset: &DataSet) -> usize {
    dataset.row_count()
}

/// Sum of the numeric values of `field`.
pub fn sum(dataset: &DataSet, field: &str) -> Result<f64> {
    reduce(dataset, field, ReduceOp::Sum)
}

/// Arithmetic mean of the numeric values of `field`.
pub fn mean(dataset: &DataSet, field: &str) -> Result<f64> {
    reduce(dataset, field, ReduceOp::Mean)
}

/// Smallest numeric value of `field`.
pub fn min(dataset: &DataSet, field: &str) -> Result<f64> {
    reduce(dataset, field, ReduceOp::Min)
}

/// Largest numeric value of `field`.
pub fn max(dataset: &DataSet, field: &str) -> Result<f64> {
    reduce(dataset, field, ReduceOp::Max)
}

/// `(min, max)` of `field` in one call.
pub fn min_max(dataset: &DataSet, field: &str) -> Result<(f64, f64)> {
    Ok((min(dataset, field)?, max(dataset, field)?))
}

/// Count records per distinct value of `field`.
///
/// Values are compared by type and content, so `1`, `"1"` and `1.0` are separate groups. Keys
/// are the display form of the value in order of first occurrence; when two groups would display
/// the same, each such key gets its type appended, e.g. `1 (int64)` and `1 (utf8)`. Null values
/// are not counted.
pub fn group_count(dataset: &DataSet, field: &str) -> Result<Vec<(String, usize)>> {
    let idx = field_index(dataset, field)?;

    let mut groups: Vec<(&Value, usize)> = Vec::new();
    for v in dataset.column(idx).filter(|v| !v.is_null()) {
        match groups.iter_mut().find(|(k, _)| *k == v) {
            Some((_, n)) => *n += 1,
            None => groups.push((v, 1)),
        }
    }

    let shown: Vec<String> = groups.iter().map(|(v, _)| v.to_string()).collect();
    Ok(groups
        .iter()
        .zip(&shown)
        .map(|((v, n), key)| {
            let clashes = shown.iter().filter(|k| *k == key).count() > 1;
            let key = if clashes {
                format!("{key} ({})", v.type_name())
            } else {
                key.clone()
            };
            (key, *n)
        })
        .collect())
}

fn field_index(dataset: &DataSet, field: &str) -> Result<usize> {
    dataset
        .schema
        .index_of(field)
        .ok_or_else(|| DataLabError::MissingField {
            field: field.to_owned(),
        })
}
