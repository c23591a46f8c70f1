use std::error::Error;
use std::fmt;

/// Message carried by [`StatsError::InvalidInputType`].
pub const INVALID_INPUT_MESSAGE: &str = "Lists must contain only numbers (integers or floats)";

/// Failure kinds of the statistics engine.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsError {
    /// A leaf of an untyped input was not an integer or float.
    InvalidInputType,
    /// Two dimensions that must be paired have different lengths.
    LengthMismatch { len_x: usize, len_y: usize },
    /// A mean or (co)variance was requested with a zero divisor.
    DivisionUndefined,
    /// Standardization of a dimension whose standard deviation is zero.
    ZeroVariance { dimension: usize },
    /// Untyped input text could not be parsed at all.
    Parse(String),
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StatsError::InvalidInputType => write!(f, "{}", INVALID_INPUT_MESSAGE),
            StatsError::LengthMismatch { len_x, len_y } => write!(
                f,
                "Dimensions must have equal length (got {} and {})",
                len_x, len_y
            ),
            StatsError::DivisionUndefined => {
                write!(f, "Division by zero: input dimension has too few values")
            }
            StatsError::ZeroVariance { dimension } => write!(
                f,
                "Dimension {} has zero standard deviation and cannot be standardized",
                dimension
            ),
            StatsError::Parse(msg) => write!(f, "Failed to parse input: {}", msg),
        }
    }
}

impl Error for StatsError {}
