//! Error types for portfolio analytics.

use quantops_math::MathError;
use thiserror::Error;

/// A specialized Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio calculations.
#[derive(Error, Debug, Clone)]
pub enum PortfolioError {
    /// The price history holds no usable observations.
    #[error("Price history is empty or too short: {reason}")]
    EmptyHistory {
        /// Description of what is missing.
        reason: String,
    },

    /// Mismatched asset counts between inputs.
    #[error("Dimension mismatch: {left} assets vs {right}")]
    DimensionMismatch {
        /// Asset count of the first operand.
        left: usize,
        /// Asset count of the second operand.
        right: usize,
    },

    /// An input value is outside its valid domain.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// A price file could not be read or parsed.
    #[error("Dataset error in {path}: {reason}")]
    Dataset {
        /// Path of the offending file.
        path: String,
        /// Description of the failure.
        reason: String,
    },

    /// Underlying numerical error.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl PortfolioError {
    /// Creates an empty history error.
    #[must_use]
    pub fn empty_history(reason: impl Into<String>) -> Self {
        Self::EmptyHistory {
            reason: reason.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates a dataset error.
    #[must_use]
    pub fn dataset(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Dataset {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
