//! Small matrix type used for covariance results.
//!
//! `Array2` is a dense row-major container with just the accessors the
//! statistics need. Conversion to `ndarray` lives in [`crate::interop`].
pub mod matrix;

pub use matrix::{Array2, ShapeError};
