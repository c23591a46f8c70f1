//! Conversion of untyped (JSON) input into numeric dimensions.
//!
//! The typed API cannot receive non-numeric values, so this is the only
//! place where `InvalidInputType` originates. Integers and floats are both
//! accepted; strings, booleans, nulls, objects and misplaced nesting are not.
use serde_json::Value;

use crate::config::CovMatConfig;
use crate::error::StatsError;
use crate::math::Array2;
use crate::stats;

/// `true` when `value` is an array whose elements are all JSON numbers.
pub fn is_numeric_dimension(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().all(Value::is_number),
        _ => false,
    }
}

/// `true` when `value` is an array of numeric dimensions.
pub fn is_numeric_dataset(value: &Value) -> bool {
    match value {
        Value::Array(dims) => dims.iter().all(is_numeric_dimension),
        _ => false,
    }
}

pub fn parse_dimension(value: &Value) -> Result<Vec<f64>, StatsError> {
    let items = value.as_array().ok_or(StatsError::InvalidInputType)?;
    items
        .iter()
        .map(|item| item.as_f64().ok_or(StatsError::InvalidInputType))
        .collect()
}

pub fn parse_dataset(value: &Value) -> Result<Vec<Vec<f64>>, StatsError> {
    let dims = value.as_array().ok_or(StatsError::InvalidInputType)?;
    dims.iter().map(parse_dimension).collect()
}

fn parse_json(text: &str) -> Result<Value, StatsError> {
    serde_json::from_str(text).map_err(|e| StatsError::Parse(e.to_string()))
}

pub fn dimension_from_json(text: &str) -> Result<Vec<f64>, StatsError> {
    parse_dimension(&parse_json(text)?)
}

pub fn dataset_from_json(text: &str) -> Result<Vec<Vec<f64>>, StatsError> {
    parse_dataset(&parse_json(text)?)
}

pub fn center_from_json(text: &str) -> Result<Vec<Vec<f64>>, StatsError> {
    stats::center(&dataset_from_json(text)?)
}

pub fn variance_from_json(text: &str) -> Result<f64, StatsError> {
    stats::variance(&dimension_from_json(text)?)
}

/// Both sequences are validated before their lengths are compared.
pub fn covariance_from_json(x: &str, y: &str) -> Result<f64, StatsError> {
    let x = dimension_from_json(x)?;
    let y = dimension_from_json(y)?;
    stats::covariance(&x, &y)
}

pub fn cov_mat_from_json(text: &str, config: &CovMatConfig) -> Result<Array2<f64>, StatsError> {
    stats::cov_mat_with(&dataset_from_json(text)?, config)
}
