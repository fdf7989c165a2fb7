//! Error types for inventory analytics.

use quantops_math::MathError;
use thiserror::Error;

/// A specialized Result type for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Errors that can occur during inventory calculations.
#[derive(Error, Debug, Clone)]
pub enum InventoryError {
    /// A policy produced an unusable parameter combination.
    #[error("Invalid policy: {reason}")]
    InvalidPolicy {
        /// Description of the problem.
        reason: String,
    },

    /// An input value is outside its valid domain.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// A SKU data file could not be read or parsed.
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

impl InventoryError {
    /// Creates an invalid policy error.
    #[must_use]
    pub fn invalid_policy(reason: impl Into<String>) -> Self {
        Self::InvalidPolicy {
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
