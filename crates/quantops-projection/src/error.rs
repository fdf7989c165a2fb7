//! Error types for the projection engine.

use rust_decimal::Decimal;
use thiserror::Error;

/// A specialized Result type for projection operations.
pub type ProjectionResult<T> = Result<T, ProjectionError>;

/// Errors that can occur while projecting financial statements.
#[derive(Error, Debug, Clone)]
pub enum ProjectionError {
    /// An assumption value is outside its valid domain.
    #[error("Invalid assumptions: {reason}")]
    InvalidAssumptions {
        /// Description of the problem.
        reason: String,
    },

    /// The monthly plan is incomplete or inconsistent.
    #[error("Invalid plan: {reason}")]
    InvalidPlan {
        /// Description of the problem.
        reason: String,
    },

    /// The opening balance sheet does not balance.
    #[error("Opening balance sheet out of balance by {difference}")]
    OpeningOutOfBalance {
        /// Assets minus liabilities and equity.
        difference: Decimal,
    },

    /// A projected month broke the accounting identity.
    #[error("Month {month} out of balance by {difference}")]
    OutOfBalance {
        /// 1-based projected month index.
        month: usize,
        /// Assets minus liabilities and equity.
        difference: Decimal,
    },

    /// A scenario file could not be read or parsed.
    #[error("Scenario error in {path}: {reason}")]
    Scenario {
        /// Path of the offending file.
        path: String,
        /// Description of the failure.
        reason: String,
    },
}

impl ProjectionError {
    /// Creates an invalid assumptions error.
    #[must_use]
    pub fn invalid_assumptions(reason: impl Into<String>) -> Self {
        Self::InvalidAssumptions {
            reason: reason.into(),
        }
    }

    /// Creates an invalid plan error.
    #[must_use]
    pub fn invalid_plan(reason: impl Into<String>) -> Self {
        Self::InvalidPlan {
            reason: reason.into(),
        }
    }

    /// Creates a scenario error.
    #[must_use]
    pub fn scenario(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Scenario {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
