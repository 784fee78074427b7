//! Statistics engine: descriptive statistics over a normalized [`crate::types::DataSet`].
//!
//! Individual statistics are available as free functions ([`count`], [`mean`], [`min`], [`max`],
//! [`sum`], [`group_count`]); [`compute`] evaluates a list of [`StatRequest`]s into one ordered
//! [`StatsResult`].
//!
//! ```rust
//! use datalab::statistics::{compute, StatRequest};
//! use datalab::types::{DataSet, Schema, Value};
//!
//! let ds = DataSet::new(
//!     Schema::new(["name", "age"]),
//!     vec![
//!         vec![Value::Utf8("Alice".into()), Value::Int64(30)],
//!         vec![Value::Utf8("Carol".into()), Value::Int64(25)],
//!     ],
//! );
//! let stats = compute(&ds, &[StatRequest::Count, StatRequest::mean("age")]).unwrap();
//! assert_eq!(stats.count("records"), Some(2));
//! assert_eq!(stats.number("mean_age"), Some(27.5));
//! ```

pub mod reduce;

use crate::error::Result;
use crate::types::{DataSet, StatValue, StatsResult};

pub use reduce::{count, group_count, max, mean, min, min_max, reduce, sum, ReduceOp};

/// One statistic to compute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatRequest {
    /// Number of records (`records`).
    Count,
    /// Mean of a numeric field (`mean_<field>`).
    Mean(String),
    /// Minimum of a numeric field (`min_<field>`).
    Min(String),
    /// Maximum of a numeric field (`max_<field>`).
    Max(String),
    /// Sum of a numeric field (`sum_<field>`).
    Sum(String),
    /// Records per distinct value of a field (`group_count_<field>`).
    GroupCount(String),
}

impl StatRequest {
    /// [`StatRequest::Mean`] of `field`.
    pub fn mean(field: impl Into<String>) -> Self {
        Self::Mean(field.into())
    }

    /// [`StatRequest::Min`] of `field`.
    pub fn min(field: impl Into<String>) -> Self {
        Self::Min(field.into())
    }

    /// [`StatRequest::Max`] of `field`.
    pub fn max(field: impl Into<String>) -> Self {
        Self::Max(field.into())
    }

    /// [`StatRequest::Sum`] of `field`.
    pub fn sum(field: impl Into<String>) -> Self {
        Self::Sum(field.into())
    }

    /// [`StatRequest::GroupCount`] of `field`.
    pub fn group_count(field: impl Into<String>) -> Self {
        Self::GroupCount(field.into())
    }

    /// Key under which this statistic is stored in a [`StatsResult`].
    pub fn key(&self) -> String {
        match self {
            Self::Count => "records".to_string(),
            Self::Mean(f) => format!("mean_{f}"),
            Self::Min(f) => format!("min_{f}"),
            Self::Max(f) => format!("max_{f}"),
            Self::Sum(f) => format!("sum_{f}"),
            Self::GroupCount(f) => format!("group_count_{f}"),
        }
    }

    /// Evaluate this request against `dataset`.
    pub fn evaluate(&self, dataset: &DataSet) -> Result<StatValue> {
        Ok(match self {
            Self::Count => StatValue::Count(count(dataset)),
            Self::Mean(f) => StatValue::Number(mean(dataset, f)?),
            Self::Min(f) => StatValue::Number(min(dataset, f)?),
            Self::Max(f) => StatValue::Number(max(dataset, f)?),
            Self::Sum(f) => StatValue::Number(sum(dataset, f)?),
            Self::GroupCount(f) => StatValue::Groups(group_count(dataset, f)?),
        })
    }
}

/// Compute every request in order. The first failing request aborts the computation.
pub fn compute(dataset: &DataSet, requests: &[StatRequest]) -> Result<StatsResult> {
    let mut result = StatsResult::new();
    for req in requests {
        result.insert(req.key(), req.evaluate(dataset)?);
    }
    Ok(result)
}
