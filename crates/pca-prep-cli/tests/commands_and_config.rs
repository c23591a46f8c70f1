//! Integration tests for CLI commands and covariance matrix config resolution.

use std::io::Write;

use clap::{Arg, Command};

use pca_prep::{Correction, CovMatConfig};
use pca_prep_cli::commands;
use pca_prep_cli::config::{
    correction_from_matches, load_cov_mat_config, resolve_cov_mat_config, CliOverrides,
};

// ---------------------------------------------------------------------------
// commands
// ---------------------------------------------------------------------------

#[test]
fn demo_prints_all_examples() {
    let out = commands::demo().unwrap();
    assert!(out.contains("variance([1, 2, 3]) = 0.6666666666666666"));
    assert!(out.contains("center([[1, 2, 3], [1, 2, 3]]) = [[-1.0,0.0,1.0],[-1.0,0.0,1.0]]"));
    assert!(out.contains("covariance([1, 2, 3], [4, 5, 10]) = 2"));
    assert!(out.contains("cov_mat("));
}

#[test]
fn center_command_outputs_json() {
    let out = commands::center("[[1, 2, 3], [4, 6]]").unwrap();
    assert_eq!(out, "[[-1.0,0.0,1.0],[-1.0,1.0]]");
}

#[test]
fn variance_command_with_correction() {
    let pop = commands::variance("[2, 4, 4, 4, 5, 5, 7, 9]", Correction::Population).unwrap();
    assert_eq!(pop, "4");
    let sample: f64 = commands::variance("[2, 4, 4, 4, 5, 5, 7, 9]", Correction::Sample)
        .unwrap()
        .parse()
        .unwrap();
    assert!((sample - 32.0 / 7.0).abs() < 1e-12);
}

#[test]
fn variance_command_rejects_strings() {
    let err = commands::variance(r#"["a", 2, 3]"#, Correction::Population).unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("Invalid --data"));
    assert!(msg.contains("Lists must contain only numbers"));
}

#[test]
fn covariance_command_length_mismatch() {
    let err = commands::covariance("[1, 2]", "[1, 2, 3]", Correction::Population).unwrap_err();
    assert!(err.to_string().contains("equal length"));
}

#[test]
fn cov_mat_command_rounded() {
    let config = CovMatConfig::new(true, 1);
    let out = commands::cov_mat("[[1, 2, 3], [4, 5, 10]]", &config).unwrap();
    assert_eq!(out, "[[0.7, 2],\n [2, 6.9]]");
}

// ---------------------------------------------------------------------------
// config resolution
// ---------------------------------------------------------------------------

#[test]
fn load_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"rounded": true, "digits": 4, "correction": "sample"}}"#).unwrap();
    let cfg = load_cov_mat_config(file.path()).unwrap();
    assert!(cfg.rounded);
    assert_eq!(cfg.digits, 4);
    assert_eq!(cfg.correction, Correction::Sample);
    assert!(!cfg.parallel);
}

#[test]
fn load_config_missing_file_errors() {
    let err = load_cov_mat_config("/nonexistent/path/cov.json").unwrap_err();
    assert!(err.to_string().contains("Failed to read config"));
}

#[test]
fn load_config_invalid_json_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cov.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = load_cov_mat_config(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}

#[test]
fn overrides_take_precedence_over_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cov.json");
    std::fs::write(&path, r#"{"rounded": true, "digits": 4}"#).unwrap();

    let overrides = CliOverrides {
        digits: Some(1),
        parallel: true,
        ..CliOverrides::default()
    };
    let cfg = resolve_cov_mat_config(Some(&path), &overrides).unwrap();
    assert!(cfg.rounded);
    assert_eq!(cfg.digits, 1);
    assert!(cfg.parallel);
    assert_eq!(cfg.correction, Correction::Population);
}

#[test]
fn resolve_without_file_uses_defaults() {
    let cfg = resolve_cov_mat_config(None::<&str>, &CliOverrides::default()).unwrap();
    assert_eq!(cfg, CovMatConfig::default());
}

// ---------------------------------------------------------------------------
// --correction parsing
// ---------------------------------------------------------------------------

fn correction_command() -> Command {
    Command::new("pca-prep").arg(Arg::new("correction").long("correction"))
}

#[test]
fn correction_absent_is_none() {
    let matches = correction_command().get_matches_from(["pca-prep"]);
    assert_eq!(correction_from_matches(&matches).unwrap(), None);
}

#[test]
fn correction_parsed_from_flag() {
    let matches = correction_command().get_matches_from(["pca-prep", "--correction", "sample"]);
    assert_eq!(
        correction_from_matches(&matches).unwrap(),
        Some(Correction::Sample)
    );
}

#[test]
fn unknown_correction_is_an_error_value() {
    let matches = correction_command().get_matches_from(["pca-prep", "--correction", "median"]);
    let err = correction_from_matches(&matches).unwrap_err();
    assert!(err.to_string().contains("Unknown correction: median"));
}
