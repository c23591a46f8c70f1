//! pca-prep: the statistics that precede a Principal Component Analysis.
//!
//! This crate provides per-dimension mean-centering, population variance,
//! pairwise covariance and the full covariance matrix over a dataset made of
//! dimensions (one numeric sequence per variable). Eigen-decomposition and
//! projection are left to the caller; `Array2::to_ndarray` hands the
//! covariance matrix to whatever solver the pipeline uses.
//!
//! All operations are free functions over borrowed input. Typed callers get
//! the numeric guarantee from the [`Numeric`](stats::Numeric) bound; values
//! arriving from an untyped boundary (JSON) go through [`validation`] first.
pub mod config;
pub mod error;
pub mod interop;
pub mod math;
pub mod stats;
pub mod validation;

pub use config::{CovMatConfig, Correction};
pub use error::StatsError;
pub use math::Array2;
pub use stats::{
    center, cov_mat, cov_mat_with, covariance, covariance_with, geom_mean, mean, round_to,
    standardize, std_dev, variance, variance_with, Numeric,
};
