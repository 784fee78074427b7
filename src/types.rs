//! Core data model types.
//!
//! The loader produces an in-memory [`DataSet`]: a [`Schema`] (ordered field names) plus rows of
//! [`Value`]s stored in schema order. Because rows are positional against one schema, every record
//! in a dataset has exactly the same keys.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value. Treated as "field not present" by statistics.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Returns the numeric value as `f64` for `Int64`/`Float64`, `None` otherwise.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int64(_) => "int64",
            Value::Float64(_) => "float64",
            Value::Bool(_) => "bool",
            Value::Utf8(_) => "utf8",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Utf8(s) => f.write_str(s),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Int64(v) => serializer.serialize_i64(*v),
            Value::Float64(v) => serializer.serialize_f64(*v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Utf8(s) => serializer.serialize_str(s),
        }
    }
}

/// Ordered list of field names describing every row of a [`DataSet`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    /// Field names in column order.
    pub fields: Vec<String>,
}

impl Schema {
    /// Create a schema from field names.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// `true` if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Borrowed view of one row, giving field-name lookup.
#[derive(Debug, Clone, Copy)]
pub struct RecordRef<'a> {
    schema: &'a Schema,
    values: &'a [Value],
}

impl<'a> RecordRef<'a> {
    /// Value of `field`, or `None` if the field is not in the schema.
    pub fn get(self, field: &str) -> Option<&'a Value> {
        self.schema.index_of(field).and_then(|i| self.values.get(i))
    }

    /// Values in schema order.
    pub fn values(self) -> &'a [Value] {
        self.values
    }

    /// `(field, value)` pairs in schema order.
    pub fn iter(self) -> impl Iterator<Item = (&'a str, &'a Value)> {
        self.schema.field_names().zip(self.values.iter())
    }
}

impl Serialize for RecordRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    ///
    /// # Panics
    ///
    /// Panics if any row length differs from the schema field count.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        let expected = schema.len();
        for (i, row) in rows.iter().enumerate() {
            assert!(
                row.len() == expected,
                "row {i} length {} does not match schema length {expected}",
                row.len()
            );
        }
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// `true` if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrow row `idx` as a [`RecordRef`].
    pub fn record(&self, idx: usize) -> Option<RecordRef<'_>> {
        self.rows.get(idx).map(|values| RecordRef {
            schema: &self.schema,
            values,
        })
    }

    /// Iterate rows as [`RecordRef`]s in order.
    pub fn records(&self) -> impl Iterator<Item = RecordRef<'_>> {
        self.rows.iter().map(move |values| RecordRef {
            schema: &self.schema,
            values,
        })
    }

    /// Iterate the values of column `idx` in row order.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().filter_map(move |row| row.get(idx))
    }
}

/// One computed statistic.
#[derive(Debug, Clone, PartialEq)]
pub enum StatValue {
    /// A row count.
    Count(usize),
    /// A numeric aggregate (mean/min/max/sum).
    Number(f64),
    /// Distinct value → count, in first-occurrence order.
    Groups(Vec<(String, usize)>),
}

impl Serialize for StatValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StatValue::Count(n) => serializer.serialize_u64(*n as u64),
            StatValue::Number(v) => serializer.serialize_f64(*v),
            StatValue::Groups(groups) => {
                let mut map = serializer.serialize_map(Some(groups.len()))?;
                for (k, n) in groups {
                    map.serialize_entry(k, n)?;
                }
                map.end()
            }
        }
    }
}

/// Ordered mapping from statistic name (e.g. `records`, `mean_age`) to [`StatValue`].
///
/// Entries keep insertion order, so output is reproducible for the same requests.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatsResult {
    entries: Vec<(String, StatValue)>,
}

impl StatsResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a statistic. Replacing keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, value: StatValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Look up a statistic by name.
    pub fn get(&self, name: &str) -> Option<&StatValue> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Convenience accessor for [`StatValue::Number`] entries.
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            StatValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Convenience accessor for [`StatValue::Count`] entries.
    pub fn count(&self, name: &str) -> Option<usize> {
        match self.get(name)? {
            StatValue::Count(n) => Some(*n),
            _ => None,
        }
    }

    /// Convenience accessor for [`StatValue::Groups`] entries.
    pub fn groups(&self, name: &str) -> Option<&[(String, usize)]> {
        match self.get(name)? {
            StatValue::Groups(g) => Some(g.as_slice()),
            _ => None,
        }
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StatValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if no statistics were recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for StatsResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::{DataSet, Schema, StatValue, StatsResult, Value};

    fn sample_dataset() -> DataSet {
        DataSet::new(
            Schema::new(["name", "age"]),
            vec![
                vec![Value::Utf8("Alice".to_string()), Value::Int64(30)],
                vec![Value::Utf8("Bob".to_string()), Value::Null],
            ],
        )
    }

    #[test]
    fn schema_index_of_works() {
        let ds = sample_dataset();
        assert_eq!(ds.schema.index_of("name"), Some(0));
        assert_eq!(ds.schema.index_of("age"), Some(1));
        assert_eq!(ds.schema.index_of("missing"), None);
    }

    #[test]
    fn record_lookup_by_field_name() {
        let ds = sample_dataset();
        let rec = ds.record(0).unwrap();
        assert_eq!(rec.get("age"), Some(&Value::Int64(30)));
        assert_eq!(rec.get("missing"), None);
        assert!(ds.record(2).is_none());
    }

    #[test]
    #[should_panic(expected = "does not match schema length")]
    fn dataset_rejects_ragged_rows() {
        let _ = DataSet::new(Schema::new(["a", "b"]), vec![vec![Value::Null]]);
    }

    #[test]
    fn stats_result_keeps_insertion_order_and_replaces_in_place() {
        let mut r = StatsResult::new();
        r.insert("records", StatValue::Count(2));
        r.insert("mean_age", StatValue::Number(1.0));
        r.insert("records", StatValue::Count(3));

        let keys: Vec<&str> = r.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["records", "mean_age"]);
        assert_eq!(r.count("records"), Some(3));
        assert_eq!(r.number("records"), None);
    }

    #[test]
    fn stats_result_serializes_as_ordered_json_object() {
        let mut r = StatsResult::new();
        r.insert("records", StatValue::Count(3));
        r.insert(
            "group_count_city",
            StatValue::Groups(vec![("NYC".to_string(), 2), ("LA".to_string(), 1)]),
        );
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"records":3,"group_count_city":{"NYC":2,"LA":1}}"#);
    }

    #[test]
    fn record_serializes_as_object() {
        let ds = sample_dataset();
        let json = serde_json::to_string(&ds.record(1).unwrap()).unwrap();
        assert_eq!(json, r#"{"name":"Bob","age":null}"#);
    }
}
