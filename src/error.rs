//! Error types for training operations.

use std::fmt;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TrainError>;

/// Error type for training operations.
#[derive(Debug)]
pub enum TrainError {
    /// An enumerated option or hyperparameter is not valid.
    ///
    /// Raised before the first epoch runs.
    Configuration(String),
    /// Feature/label lengths disagree, or rows have different lengths.
    Dimension {
        what: &'static str,
        expected: usize,
        got: usize,
    },
    /// Empty data provided where non-empty was required.
    EmptyData(String),
    /// I/O error while reading a configuration or dataset file.
    Io(String),
    /// Malformed CSV input.
    Csv(String),
    /// Malformed JSON configuration.
    Json(String),
}

impl fmt::Display for TrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainError::Configuration(msg) => {
                write!(f, "Configuration error: {}", msg)
            }
            TrainError::Dimension { what, expected, got } => {
                write!(
                    f,
                    "Dimension error: {} expected {}, got {}",
                    what, expected, got
                )
            }
            TrainError::EmptyData(msg) => {
                write!(f, "Empty data: {}", msg)
            }
            TrainError::Io(msg) => {
                write!(f, "I/O error: {}", msg)
            }
            TrainError::Csv(msg) => {
                write!(f, "CSV error: {}", msg)
            }
            TrainError::Json(msg) => {
                write!(f, "JSON error: {}", msg)
            }
        }
    }
}

impl std::error::Error for TrainError {}

impl From<std::io::Error> for TrainError {
    fn from(err: std::io::Error) -> Self {
        TrainError::Io(err.to_string())
    }
}

impl From<csv::Error> for TrainError {
    fn from(err: csv::Error) -> Self {
        TrainError::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for TrainError {
    fn from(err: serde_json::Error) -> Self {
        TrainError::Json(err.to_string())
    }
}
