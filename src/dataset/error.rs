//! Dataset error types

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while building a dataset from the data file
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The data file is not a JSON array of daily rows
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two rows share the same calendar date
    #[error("Duplicate date in dataset: {0}")]
    DuplicateDate(NaiveDate),
}

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;
