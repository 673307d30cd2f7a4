//! Error types for probability values
//!
//! Every failure is raised synchronously at the violating call and leaves
//! existing values untouched.

use thiserror::Error;

/// Result type alias using ProbabilityError
pub type Result<T> = std::result::Result<T, ProbabilityError>;

/// Unified error type for probability operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProbabilityError {
    // Construction errors
    #[error("Probability value must be between 0 and 1, got {value}")]
    OutOfRange { value: String },

    #[error("Probability value is absent")]
    NullInput,

    #[error("Malformed probability value: {0}")]
    Parse(String),

    #[error("Value {value} has no decimal representation")]
    Unrepresentable { value: String },

    // Arithmetic errors
    #[error("Division by 0 not allowed")]
    DivisionByZero,

    // Precision errors
    #[error("Maximum precision possible is {max} digits, requested {requested}")]
    PrecisionExceeded { requested: u32, max: u32 },

    #[error("Precision must be at least one significant digit")]
    InvalidPrecision,

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProbabilityError {
    /// Out-of-range error for any displayable offending value
    pub fn out_of_range(value: impl std::fmt::Display) -> Self {
        ProbabilityError::OutOfRange {
            value: value.to_string(),
        }
    }
}

impl From<rust_decimal::Error> for ProbabilityError {
    fn from(err: rust_decimal::Error) -> Self {
        ProbabilityError::Parse(err.to_string())
    }
}
