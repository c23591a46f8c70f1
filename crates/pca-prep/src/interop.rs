//! Conversions between this crate's types and `ndarray`.
//!
//! Downstream PCA steps (eigen-decomposition, projection) usually work on
//! `ndarray` matrices. Rows of an `ndarray::Array2` are read as dimensions.
use ndarray::{ArrayBase, Data, Ix2};

use crate::math::Array2;
use crate::stats::Numeric;

/// Read each row of `data` as one dimension.
pub fn dataset_from_ndarray<S, T>(data: &ArrayBase<S, Ix2>) -> Vec<Vec<f64>>
where
    S: Data<Elem = T>,
    T: Numeric,
{
    data.outer_iter()
        .map(|row| row.iter().map(|v| v.as_()).collect())
        .collect()
}

impl Array2<f64> {
    pub fn to_ndarray(&self) -> ndarray::Array2<f64> {
        ndarray::Array2::from_shape_fn(self.shape(), |(i, j)| self[(i, j)])
    }
}

impl<S> From<&ArrayBase<S, Ix2>> for Array2<f64>
where
    S: Data<Elem = f64>,
{
    fn from(value: &ArrayBase<S, Ix2>) -> Self {
        Array2::from_fn(value.dim(), |i, j| value[[i, j]])
    }
}
