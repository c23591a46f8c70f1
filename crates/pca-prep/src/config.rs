use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Divisor used when averaging squared deviations.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Correction {
    /// Divide by `n` (biased, the PCA default).
    #[default]
    Population,
    /// Divide by `n - 1` (Bessel's correction).
    Sample,
}

impl Correction {
    /// Divisor for a sequence of `n` values, or `None` when it would be zero.
    pub fn divisor(self, n: usize) -> Option<f64> {
        let d = match self {
            Correction::Population => n,
            Correction::Sample => n.saturating_sub(1),
        };
        if d == 0 {
            None
        } else {
            Some(d as f64)
        }
    }
}

impl FromStr for Correction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "population" | "biased" => Ok(Correction::Population),
            "sample" | "unbiased" | "bessel" => Ok(Correction::Sample),
            _ => Err(format!(
                "Unknown correction: {}. Expected `population` or `sample`",
                s
            )),
        }
    }
}

/// Options for building a covariance matrix.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CovMatConfig {
    /// Round every cell after the full-precision computation.
    pub rounded: bool,
    /// Decimal places kept when `rounded` is set.
    pub digits: i32,
    pub correction: Correction,
    /// Evaluate matrix rows on the rayon thread pool.
    pub parallel: bool,
}

impl CovMatConfig {
    pub fn new(rounded: bool, digits: i32) -> Self {
        Self {
            rounded,
            digits,
            ..Self::default()
        }
    }

    pub fn with_correction(mut self, correction: Correction) -> Self {
        self.correction = correction;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for CovMatConfig {
    fn default() -> Self {
        Self {
            rounded: false,
            digits: 2,
            correction: Correction::Population,
            parallel: false,
        }
    }
}
