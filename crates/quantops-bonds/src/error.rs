//! Error types for bond analytics.

use quantops_math::MathError;
use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur during bond calculations.
#[derive(Error, Debug, Clone)]
pub enum BondError {
    /// The bond description is incomplete or inconsistent.
    #[error("Invalid bond spec: {reason}")]
    InvalidSpec {
        /// Description of the problem.
        reason: String,
    },

    /// A quote required for the requested conversion is invalid.
    #[error("Invalid quote: {value} - {reason}")]
    InvalidQuote {
        /// The offending value.
        value: f64,
        /// Reason for invalidity.
        reason: String,
    },

    /// The yield solver failed to converge.
    #[error("Yield solver failed to converge after {iterations} iterations")]
    YieldConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
    },

    /// Underlying numerical error.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl BondError {
    /// Creates an invalid spec error.
    #[must_use]
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }

    /// Creates an invalid quote error.
    #[must_use]
    pub fn invalid_quote(value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidQuote {
            value,
            reason: reason.into(),
        }
    }
}
