//! Library half of the `pca-prep` command-line tool.
//!
//! `commands` renders each statistic as text for stdout and `config`
//! resolves covariance-matrix options from a JSON file and flags.
pub mod commands;
pub mod config;
