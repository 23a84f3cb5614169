//! Series transformation error types
//!
//! Defines all errors that can occur while deriving series.

use thiserror::Error;

/// Errors that can occur in the series transformations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Two series expected to align index-for-index differ in length
    #[error("Length mismatch: {left} vs {right} points")]
    LengthMismatch { left: usize, right: usize },

    /// The averaging routine returned an inconsistent result
    #[error("Computation error: {0}")]
    ComputationError(String),

    /// Parameter outside its valid range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Percentage requested against a zero total
    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    /// A summary figure was requested from an empty series
    #[error("Empty series: {0}")]
    EmptySeries(String),
}

/// Result type alias for series transformations
pub type TransformResult<T> = Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TransformError::LengthMismatch { left: 3, right: 2 };
        assert_eq!(err.to_string(), "Length mismatch: 3 vs 2 points");

        let err = TransformError::InvalidArgument("interval_days must be >= 1".to_string());
        assert_eq!(err.to_string(), "Invalid argument: interval_days must be >= 1");
    }
}
