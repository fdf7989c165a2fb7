//! Error types shared across the QuantOps workspace.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The common error type for QuantOps operations.
#[derive(Error, Debug, Clone)]
pub enum CoreError {
    /// An input value is outside its valid domain.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// A required field was not supplied.
    #[error("Missing field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: String,
    },

    /// A data file could not be parsed.
    #[error("Parse error in {source_name}: {reason}")]
    ParseError {
        /// Name of the data source (file path or label).
        source_name: String,
        /// Description of the failure.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}
