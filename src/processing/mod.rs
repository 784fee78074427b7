//! Processor: validates and normalizes a loaded [`crate::types::DataSet`].
//!
//! Normalization is skip-and-continue: a row whose declared numeric field cannot be coerced is
//! dropped and recorded as a [`Rejection`], so one bad row never aborts the analysis. Only a
//! dataset with zero surviving rows is an error.
//!
//! ```rust
//! use datalab::processing::{normalize, NormalizeOptions};
//! use datalab::types::{DataSet, Schema, Value};
//!
//! let ds = DataSet::new(
//!     Schema::new(["name", "age"]),
//!     vec![
//!         vec![Value::Utf8("Alice".into()), Value::Utf8("30".into())],
//!         vec![Value::Utf8("Bob".into()), Value::Utf8("abc".into())],
//!         vec![Value::Utf8("Carol".into()), Value::Utf8("25".into())],
//!     ],
//! );
//!
//! let out = normalize(&ds, &NormalizeOptions::numeric(["age"])).unwrap();
//! assert_eq!(out.dataset.row_count(), 2);
//! assert_eq!(out.rejections[0].row, 1);
//! ```

pub mod normalize;

pub use normalize::{
    normalize, normalize_row, NormalizeOptions, Normalized, RejectReason, Rejection, RowOutcome,
};
