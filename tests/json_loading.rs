use datalab::ingestion::json::{load_json_from_path, load_json_from_str};
use datalab::types::Value;
use datalab::DataLabError;

#[test]
fn load_json_array_from_path_happy_path() {
    let ds = load_json_from_path("tests/fixtures/people.json").unwrap();

    assert_eq!(ds.row_count(), 3);
    // union of keys in first-seen order
    assert_eq!(
        ds.schema.field_names().collect::<Vec<_>>(),
        vec!["name", "age", "city", "score"]
    );
    assert_eq!(ds.rows[0][1], Value::Int64(36));
    assert_eq!(ds.rows[0][3], Value::Float64(98.5));
    // key missing from the second object
    assert_eq!(ds.record(1).unwrap().get("score"), Some(&Value::Null));
    // explicit null
    assert_eq!(ds.record(2).unwrap().get("age"), Some(&Value::Null));
}

#[test]
fn load_json_preserves_native_types() {
    let ds = load_json_from_str(r#"[{"n":1,"f":1.5,"b":true,"s":"x","z":null}]"#).unwrap();
    assert_eq!(
        ds.rows[0],
        vec![
            Value::Int64(1),
            Value::Float64(1.5),
            Value::Bool(true),
            Value::Utf8("x".to_string()),
            Value::Null,
        ]
    );
}

#[test]
fn load_json_n_objects_yield_n_records() {
    let input = (0..25)
        .map(|i| format!(r#"{{"id":{i},"name":"p{i}"}}"#))
        .collect::<Vec<_>>()
        .join(",");
    let ds = load_json_from_str(&format!("[{input}]")).unwrap();
    assert_eq!(ds.row_count(), 25);
    assert_eq!(ds.schema.field_names().collect::<Vec<_>>(), vec!["id", "name"]);
}

#[test]
fn load_json_empty_array_is_empty_dataset() {
    let ds = load_json_from_str("[]").unwrap();
    assert!(ds.is_empty());
    assert!(ds.schema.is_empty());
}

#[test]
fn load_json_errors_on_non_object_element() {
    let err = load_json_from_path("tests/fixtures/not_objects.json").unwrap_err();
    let msg = err.to_string();
    assert!(matches!(err, DataLabError::FormatError { .. }));
    assert!(msg.contains("row 2 is not a json object"));
}

#[test]
fn load_json_errors_on_top_level_object() {
    let err = load_json_from_str(r#"{"name":"Ada"}"#).unwrap_err();
    assert!(err.to_string().contains("array of objects"));
}

#[test]
fn load_json_errors_on_nested_values() {
    let err = load_json_from_str(r#"[{"user":{"name":"Ada"}}]"#).unwrap_err();
    assert!(err.to_string().contains("field 'user'"));
}

#[test]
fn load_json_errors_on_invalid_json() {
    let err = load_json_from_str("[{").unwrap_err();
    assert!(matches!(err, DataLabError::FormatError { .. }));
}

#[test]
fn load_json_missing_file_is_file_not_found() {
    let err = load_json_from_path("tests/fixtures/does_not_exist.json").unwrap_err();
    assert!(matches!(err, DataLabError::FileNotFound { .. }));
}
