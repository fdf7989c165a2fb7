//! Joint-event experiments and their Monte Carlo estimator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// One independent event with its per-round firing probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSpec {
    /// Event label, used in reports.
    pub name: String,
    /// Probability the event fires in a single round.
    pub probability: f64,
}

impl EventSpec {
    /// Creates an event spec.
    #[must_use]
    pub fn new(name: impl Into<String>, probability: f64) -> Self {
        Self {
            name: name.into(),
            probability,
        }
    }
}

/// A fixed number of rounds over a set of independent events; success
/// means every event fired at least once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointEventExperiment {
    rounds: u32,
    events: Vec<EventSpec>,
}

impl JointEventExperiment {
    /// Creates an experiment.
    ///
    /// Requires at least one round, at least one event, and every
    /// probability in `[0, 1]`.
    pub fn new(rounds: u32, events: Vec<EventSpec>) -> SimResult<Self> {
        if rounds == 0 {
            return Err(SimError::invalid_experiment("at least one round required"));
        }
        if events.is_empty() {
            return Err(SimError::invalid_experiment("at least one event required"));
        }
        for event in &events {
            if !(0.0..=1.0).contains(&event.probability) || !event.probability.is_finite() {
                return Err(SimError::invalid_experiment(format!(
                    "probability {} for '{}' outside [0, 1]",
                    event.probability, event.name
                )));
            }
        }
        Ok(Self { rounds, events })
    }

    /// Number of rounds per trial.
    #[must_use]
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// The events under observation.
    #[must_use]
    pub fn events(&self) -> &[EventSpec] {
        &self.events
    }

    /// Runs a single trial: true when every event fired at least once.
    pub fn run_trial<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        let mut fired = vec![false; self.events.len()];
        for _round in 0..self.rounds {
            for (slot, event) in fired.iter_mut().zip(self.events.iter()) {
                if rng.gen::<f64>() < event.probability {
                    *slot = true;
                }
            }
        }
        fired.into_iter().all(|f| f)
    }

    /// Closed-form success probability.
    ///
    /// Events are independent across rounds, so each misses every round
    /// with probability `(1 - p)^rounds`.
    #[must_use]
    pub fn exact_probability(&self) -> f64 {
        self.events
            .iter()
            .map(|event| 1.0 - (1.0 - event.probability).powi(self.rounds as i32))
            .product()
    }
}

/// Configuration for the Monte Carlo estimator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Number of trials.
    pub trials: u64,
    /// Record a convergence point every this many trials (0 disables the
    /// history).
    pub sample_every: u64,
    /// RNG seed; a random seed is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            trials: 1_000_000,
            sample_every: 1000,
            seed: None,
        }
    }
}

/// One point of the running-estimate history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConvergencePoint {
    /// Trials completed at this point.
    pub trial: u64,
    /// Running success-frequency estimate.
    pub estimate: f64,
}

/// Result of one estimation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// Final success-frequency estimate.
    pub probability: f64,
    /// Number of successful trials.
    pub successes: u64,
    /// Number of trials run.
    pub trials: u64,
    /// Running-estimate history, if sampling was enabled.
    pub history: Vec<ConvergencePoint>,
}

/// Result of a batch of estimation runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Mean of the per-run estimates.
    pub mean_probability: f64,
    /// The individual runs.
    pub runs: Vec<SimulationOutcome>,
}

/// Estimates the experiment's success probability by simulation.
pub fn estimate(
    experiment: &JointEventExperiment,
    config: &EstimatorConfig,
) -> SimResult<SimulationOutcome> {
    if config.trials == 0 {
        return Err(SimError::invalid_config("trial count must be positive"));
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    log::debug!(
        "estimating over {} trials ({} events, {} rounds), seed {seed}",
        config.trials,
        experiment.events().len(),
        experiment.rounds()
    );

    let mut successes = 0u64;
    let mut history = Vec::new();

    for trial in 1..=config.trials {
        if experiment.run_trial(&mut rng) {
            successes += 1;
        }
        if config.sample_every > 0 && trial % config.sample_every == 0 {
            history.push(ConvergencePoint {
                trial,
                estimate: successes as f64 / trial as f64,
            });
        }
    }

    Ok(SimulationOutcome {
        probability: successes as f64 / config.trials as f64,
        successes,
        trials: config.trials,
        history,
    })
}

/// Runs several estimations and averages their results.
///
/// Each run derives its own seed from the configured one, so a batch is
/// reproducible end to end.
pub fn estimate_batch(
    experiment: &JointEventExperiment,
    simulations: u32,
    config: &EstimatorConfig,
) -> SimResult<BatchOutcome> {
    if simulations == 0 {
        return Err(SimError::invalid_config("simulation count must be positive"));
    }

    let base_seed = config.seed.unwrap_or_else(rand::random);
    let mut runs = Vec::with_capacity(simulations as usize);
    for index in 0..simulations {
        let run_config = EstimatorConfig {
            seed: Some(base_seed.wrapping_add(u64::from(index))),
            ..*config
        };
        runs.push(estimate(experiment, &run_config)?);
    }

    let mean_probability =
        runs.iter().map(|run| run.probability).sum::<f64>() / f64::from(simulations);

    Ok(BatchOutcome {
        mean_probability,
        runs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn media_experiment() -> JointEventExperiment {
        JointEventExperiment::new(
            2,
            vec![EventSpec::new("tweet", 0.8), EventSpec::new("post", 0.6)],
        )
        .unwrap()
    }

    #[test]
    fn test_validation() {
        assert!(JointEventExperiment::new(0, vec![EventSpec::new("a", 0.5)]).is_err());
        assert!(JointEventExperiment::new(2, vec![]).is_err());
        assert!(JointEventExperiment::new(2, vec![EventSpec::new("a", 1.5)]).is_err());
        assert!(JointEventExperiment::new(2, vec![EventSpec::new("a", -0.1)]).is_err());
    }

    #[test]
    fn test_exact_probability() {
        // (1 - 0.2^2) * (1 - 0.4^2) = 0.96 * 0.84
        assert_relative_eq!(
            media_experiment().exact_probability(),
            0.8064,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_certain_and_impossible_events() {
        let certain =
            JointEventExperiment::new(3, vec![EventSpec::new("always", 1.0)]).unwrap();
        assert_relative_eq!(certain.exact_probability(), 1.0);

        let impossible =
            JointEventExperiment::new(3, vec![EventSpec::new("never", 0.0)]).unwrap();
        assert_relative_eq!(impossible.exact_probability(), 0.0);

        let mut rng = StdRng::seed_from_u64(1);
        assert!(certain.run_trial(&mut rng));
        assert!(!impossible.run_trial(&mut rng));
    }

    #[test]
    fn test_estimate_converges_to_exact() {
        let experiment = media_experiment();
        let config = EstimatorConfig {
            trials: 200_000,
            sample_every: 0,
            seed: Some(1234),
        };

        let outcome = estimate(&experiment, &config).unwrap();

        assert_relative_eq!(
            outcome.probability,
            experiment.exact_probability(),
            epsilon = 0.005
        );
    }

    #[test]
    fn test_history_sampling() {
        let config = EstimatorConfig {
            trials: 10_000,
            sample_every: 1000,
            seed: Some(5),
        };
        let outcome = estimate(&media_experiment(), &config).unwrap();

        assert_eq!(outcome.history.len(), 10);
        assert_eq!(outcome.history[0].trial, 1000);
        assert_eq!(outcome.history[9].trial, 10_000);
        // Final history point matches the overall estimate
        assert_relative_eq!(outcome.history[9].estimate, outcome.probability);
    }

    #[test]
    fn test_deterministic_with_seed() {
        let config = EstimatorConfig {
            trials: 5000,
            sample_every: 0,
            seed: Some(99),
        };
        let a = estimate(&media_experiment(), &config).unwrap();
        let b = estimate(&media_experiment(), &config).unwrap();
        assert_eq!(a.successes, b.successes);
    }

    #[test]
    fn test_batch_averages_runs() {
        let config = EstimatorConfig {
            trials: 20_000,
            sample_every: 0,
            seed: Some(7),
        };
        let batch = estimate_batch(&media_experiment(), 5, &config).unwrap();

        assert_eq!(batch.runs.len(), 5);
        let manual_mean =
            batch.runs.iter().map(|r| r.probability).sum::<f64>() / 5.0;
        assert_relative_eq!(batch.mean_probability, manual_mean, epsilon = 1e-15);
        assert_relative_eq!(
            batch.mean_probability,
            media_experiment().exact_probability(),
            epsilon = 0.01
        );
    }

    #[test]
    fn test_zero_trials_rejected() {
        let config = EstimatorConfig {
            trials: 0,
            sample_every: 0,
            seed: None,
        };
        assert!(estimate(&media_experiment(), &config).is_err());
        assert!(estimate_batch(&media_experiment(), 0, &EstimatorConfig::default()).is_err());
    }
}
