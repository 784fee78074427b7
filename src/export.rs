//! Writing a [`DataSet`] back to CSV or JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::error::{DataLabError, Result};
use crate::types::DataSet;

/// Save `dataset` as a pretty-printed JSON array of objects.
///
/// Keys follow schema order; [`crate::types::Value::Null`] is written as `null`.
pub fn save_json(dataset: &DataSet, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| DataLabError::from_io(path, e))?;
    let mut out = BufWriter::new(file);
    let records: Vec<_> = dataset.records().collect();
    serde_json::to_writer_pretty(&mut out, &records)?;
    writeln!(out)?;
    out.flush()?;
    debug!("wrote {} json rows to {}", dataset.row_count(), path.display());
    Ok(())
}

/// Save `dataset` as CSV with a header row.
///
/// Returns [`DataLabError::EmptyDataset`] when there are no rows to write.
pub fn save_csv(dataset: &DataSet, path: impl AsRef<Path>) -> Result<()> {
    if dataset.is_empty() {
        return Err(DataLabError::EmptyDataset {
            message: "cannot save empty data to csv".to_string(),
        });
    }

    let path = path.as_ref();
    let file = File::create(path).map_err(|e| DataLabError::from_io(path, e))?;
    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record(dataset.schema.field_names())?;
    for row in &dataset.rows {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    debug!("wrote {} csv rows to {}", dataset.row_count(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{save_csv, save_json};
    use crate::error::DataLabError;
    use crate::types::{DataSet, Schema, Value};

    #[test]
    fn save_csv_refuses_empty_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let ds = DataSet::new(Schema::new(["a"]), Vec::new());
        let err = save_csv(&ds, dir.path().join("out.csv")).unwrap_err();
        assert!(matches!(err, DataLabError::EmptyDataset { .. }));
        assert!(!dir.path().join("out.csv").exists());
    }

    #[test]
    fn save_json_writes_objects_in_schema_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let ds = DataSet::new(
            Schema::new(["name", "age"]),
            vec![vec![Value::Utf8("Ada".to_string()), Value::Int64(36)]],
        );
        save_json(&ds, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let name_at = text.find("\"name\"").unwrap();
        let age_at = text.find("\"age\"").unwrap();
        assert!(name_at < age_at);
        assert!(text.contains("36"));
    }
}
