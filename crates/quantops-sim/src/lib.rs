//! # QuantOps Sim
//!
//! Monte Carlo estimation of joint-event probabilities.
//!
//! An experiment runs a fixed number of rounds; in each round a set of
//! independent events either fires or not, each with its own probability.
//! The experiment succeeds when every event fired in at least one round.
//! The estimator replays the experiment many times, tracks a convergence
//! history, and the closed-form probability is available as a
//! cross-check.
//!
//! ## Example
//!
//! ```rust
//! use quantops_sim::{estimate, EstimatorConfig, EventSpec, JointEventExperiment};
//!
//! let experiment = JointEventExperiment::new(
//!     2,
//!     vec![
//!         EventSpec::new("tweet", 0.8),
//!         EventSpec::new("post", 0.6),
//!     ],
//! )
//! .unwrap();
//!
//! let config = EstimatorConfig {
//!     trials: 100_000,
//!     sample_every: 10_000,
//!     seed: Some(42),
//! };
//! let outcome = estimate(&experiment, &config).unwrap();
//!
//! // Exact probability is (1 - 0.2^2) * (1 - 0.4^2) = 0.8064
//! assert!((outcome.probability - experiment.exact_probability()).abs() < 0.01);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod experiment;

pub use error::{SimError, SimResult};
pub use experiment::{
    estimate, estimate_batch, BatchOutcome, ConvergencePoint, EstimatorConfig, EventSpec,
    JointEventExperiment, SimulationOutcome,
};
