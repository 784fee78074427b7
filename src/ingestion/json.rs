//! JSON loading.
//!
//! Supported input: a top-level JSON array of flat objects, e.g. `[{"name":"Ada","age":36}]`.
//!
//! Native JSON types are preserved: integers become [`Value::Int64`], other numbers
//! [`Value::Float64`], `null` becomes [`Value::Null`]. The schema is the union of keys in the order
//! they are first seen; a key missing from one object is `Null` in that record.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{DataLabError, Result};
use crate::types::{DataSet, Schema, Value};

/// Load a JSON file into an in-memory [`DataSet`].
pub fn load_json_from_path(path: impl AsRef<Path>) -> Result<DataSet> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| DataLabError::from_io(path, e))?;
    let ds = load_json_from_str(&text)?;
    debug!("loaded {} json rows from {}", ds.row_count(), path.display());
    Ok(ds)
}

/// Load JSON from an in-memory string into a [`DataSet`].
pub fn load_json_from_str(input: &str) -> Result<DataSet> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DataLabError::format("json input is empty"));
    }

    let v = serde_json::from_str::<serde_json::Value>(trimmed)
        .map_err(|e| DataLabError::format(format!("invalid json: {e}")))?;

    match v {
        serde_json::Value::Array(items) => load_json_values(&items),
        other => Err(DataLabError::format(format!(
            "json must be an array of objects, found {}",
            json_type_name(&other)
        ))),
    }
}

fn load_json_values(values: &[serde_json::Value]) -> Result<DataSet> {
    let mut objects = Vec::with_capacity(values.len());
    let mut fields: Vec<String> = Vec::new();

    for (idx0, v) in values.iter().enumerate() {
        let row_num = idx0 + 1;
        let obj = v.as_object().ok_or_else(|| {
            DataLabError::format(format!(
                "row {row_num} is not a json object (found {})",
                json_type_name(v)
            ))
        })?;
        for key in obj.keys() {
            if !fields.iter().any(|f| f == key) {
                fields.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(objects.len());
    for (idx0, obj) in objects.into_iter().enumerate() {
        let row_num = idx0 + 1;
        let mut row = Vec::with_capacity(fields.len());
        for field in &fields {
            let value = match obj.get(field) {
                Some(jv) => convert_json_value(row_num, field, jv)?,
                None => Value::Null,
            };
            row.push(value);
        }
        rows.push(row);
    }

    Ok(DataSet::new(Schema::new(fields), rows))
}

fn convert_json_value(row: usize, field: &str, v: &serde_json::Value) -> Result<Value> {
    match v {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_json::Value::String(s) => Ok(Value::Utf8(s.clone())),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int64(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float64(f))
            } else {
                Err(DataLabError::format(format!(
                    "row {row} field '{field}': number {n} is out of range"
                )))
            }
        }
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            Err(DataLabError::format(format!(
                "row {row} field '{field}': expected a scalar, found {}",
                json_type_name(v)
            )))
        }
    }
}

fn json_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
