//! Error types for simulation.

use thiserror::Error;

/// A specialized Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

/// Errors that can occur while setting up or running a simulation.
#[derive(Error, Debug, Clone)]
pub enum SimError {
    /// The experiment definition is unusable.
    #[error("Invalid experiment: {reason}")]
    InvalidExperiment {
        /// Description of the problem.
        reason: String,
    },

    /// The estimator configuration is unusable.
    #[error("Invalid estimator config: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

impl SimError {
    /// Creates an invalid experiment error.
    #[must_use]
    pub fn invalid_experiment(reason: impl Into<String>) -> Self {
        Self::InvalidExperiment {
            reason: reason.into(),
        }
    }

    /// Creates an invalid config error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
