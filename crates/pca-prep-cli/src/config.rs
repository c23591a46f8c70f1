use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use pca_prep::{Correction, CovMatConfig};

/// Load covariance-matrix options from a JSON file. Missing keys take defaults.
pub fn load_cov_mat_config<P: AsRef<Path>>(path: P) -> Result<CovMatConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: CovMatConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub rounded: bool,
    pub digits: Option<i32>,
    pub correction: Option<Correction>,
    pub parallel: bool,
}

impl CliOverrides {
    /// Read the `cov-mat` subcommand flags.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        Ok(Self {
            rounded: matches.get_flag("rounded"),
            digits: matches.get_one::<i32>("digits").copied(),
            correction: correction_from_matches(matches)?,
            parallel: matches.get_flag("parallel"),
        })
    }

    /// Flags only switch options on; they never turn off a config file setting.
    pub fn apply(&self, mut config: CovMatConfig) -> CovMatConfig {
        if self.rounded {
            config.rounded = true;
        }
        if let Some(digits) = self.digits {
            config.digits = digits;
        }
        if let Some(correction) = self.correction {
            config.correction = correction;
        }
        if self.parallel {
            config.parallel = true;
        }
        config
    }
}

/// Parse the optional `--correction` argument shared by several subcommands.
pub fn correction_from_matches(matches: &ArgMatches) -> Result<Option<Correction>> {
    matches
        .get_one::<String>("correction")
        .map(|s| s.parse::<Correction>().map_err(anyhow::Error::msg))
        .transpose()
}

/// Resolve the final config: file (if any) first, then flags.
pub fn resolve_cov_mat_config<P: AsRef<Path>>(
    config_path: Option<P>,
    overrides: &CliOverrides,
) -> Result<CovMatConfig> {
    let base = match config_path {
        Some(path) => load_cov_mat_config(path)?,
        None => CovMatConfig::default(),
    };
    let config = overrides.apply(base);
    log::debug!("Resolved covariance matrix config: {:?}", config);
    Ok(config)
}
