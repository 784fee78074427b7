//! CSV loading.

use std::fs::File;
use std::path::Path;

use log::debug;

use crate::error::{DataLabError, Result};
use crate::types::{DataSet, Schema, Value};

/// Load a CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - The first row is the header and defines the field names.
/// - Every other row becomes one record whose values are kept verbatim as [`Value::Utf8`].
///   Empty or whitespace-only cells become [`Value::Null`].
/// - A row whose column count differs from the header is a [`DataLabError::FormatError`].
pub fn load_csv_from_path(path: impl AsRef<Path>) -> Result<DataSet> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DataLabError::from_io(path, e))?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);
    let ds = load_csv_from_reader(&mut rdr)?;
    debug!("loaded {} csv rows from {}", ds.row_count(), path.display());
    Ok(ds)
}

/// Load CSV data from an existing CSV reader.
///
/// The reader should be built with `has_headers(true)`. Readers that are not `flexible` report
/// ragged rows through the same [`DataLabError::FormatError`] path.
pub fn load_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> Result<DataSet> {
    let headers = rdr.headers().map_err(csv_error)?.clone();
    if headers.is_empty() {
        return Err(DataLabError::format("csv input has no header row"));
    }

    let mut fields: Vec<String> = Vec::with_capacity(headers.len());
    for h in headers.iter() {
        let name = h.trim();
        if name.is_empty() {
            return Err(DataLabError::format(format!(
                "csv header contains an empty column name. headers={:?}",
                headers.iter().collect::<Vec<_>>()
            )));
        }
        if fields.iter().any(|f| f == name) {
            return Err(DataLabError::format(format!(
                "csv header contains duplicate column '{name}'"
            )));
        }
        fields.push(name.to_owned());
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // 1-based for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result.map_err(csv_error)?;

        if record.len() != fields.len() {
            return Err(DataLabError::format(format!(
                "row {user_row} has {} columns but header has {}",
                record.len(),
                fields.len()
            )));
        }

        rows.push(record.iter().map(cell_value).collect());
    }

    Ok(DataSet::new(Schema::new(fields), rows))
}

fn cell_value(raw: &str) -> Value {
    if raw.trim().is_empty() {
        Value::Null
    } else {
        Value::Utf8(raw.to_owned())
    }
}

fn csv_error(err: csv::Error) -> DataLabError {
    let message = match err.kind() {
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => Some(format!(
            "row {} has {len} columns but header has {expected_len}",
            pos.as_ref().map(|p| p.line()).unwrap_or_default()
        )),
        csv::ErrorKind::Utf8 { pos, err } => Some(format!(
            "invalid utf-8 at line {}: {err}",
            pos.as_ref().map(|p| p.line()).unwrap_or_default()
        )),
        _ => None,
    };
    match message {
        Some(message) => DataLabError::FormatError { message },
        None => DataLabError::Csv(err),
    }
}
