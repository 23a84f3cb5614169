//! Loader error types

use thiserror::Error;

use crate::dataset::DatasetError;
use crate::series::TransformError;

/// Errors that can occur while fetching and preparing the data file
#[derive(Error, Debug)]
pub enum LoadError {
    /// Reading a local data file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP request could not be completed
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// The server answered with a non-success status
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// The request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// The payload is not a valid dataset
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// A derivation over the loaded dataset failed
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LoadError::Timeout
        } else {
            LoadError::Http(err)
        }
    }
}

/// Result type alias for loader operations
pub type LoadResult<T> = Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(LoadError::Status(404).to_string(), "Unexpected HTTP status: 404");
        assert_eq!(LoadError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LoadError = io_err.into();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
