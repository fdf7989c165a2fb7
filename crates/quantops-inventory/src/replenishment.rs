//! Monte Carlo simulation of a sell-one-order-one replenishment pipeline.
//!
//! The model mirrors a weekly-review supply chain: orders placed each
//! week arrive after a fixed lead time, so the pipeline always holds
//! lead-time weeks of orders. Demand draws from a normal distribution;
//! safety stock absorbs the difference between what arrives (ordered
//! lead-time weeks ago) and what sells. Each week the center reorders
//! exactly the demand it just observed.
//!
//! Trials are independent: pipeline and safety stock re-initialize at the
//! start of every trial.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal as GaussianCdf};
use std::collections::VecDeque;

use crate::error::{InventoryError, InventoryResult};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Parameters of the replenishment simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReplenishmentConfig {
    /// Mean weekly demand in units.
    pub mean_weekly_demand: f64,
    /// Standard deviation of weekly demand.
    pub weekly_std_dev: f64,
    /// Replenishment lead time in weeks.
    pub lead_time_weeks: usize,
    /// Target probability of a stockout in any week (sets initial safety
    /// stock through the normal quantile).
    pub stockout_tolerance: f64,
    /// Weeks simulated per trial.
    pub horizon_weeks: usize,
    /// Number of independent trials.
    pub trials: usize,
    /// RNG seed; a random seed is drawn when absent.
    pub seed: Option<u64>,
}

/// Aggregate and per-trial results of the simulation.
#[derive(Debug, Clone)]
pub struct ReplenishmentReport {
    /// Safety stock the trials started from.
    pub initial_safety_stock: f64,
    /// Mean over trials of the per-trial average pipeline volume.
    pub average_pipeline_volume: f64,
    /// Fraction of trial-weeks that ended in a stockout.
    pub stockout_probability: f64,
    /// Pipeline volume per trial and week (trials x horizon).
    pub pipeline_paths: Array2<f64>,
    /// Safety stock per trial and week (trials x horizon).
    pub safety_stock_paths: Array2<f64>,
}

struct TrialOutcome {
    pipeline: Vec<f64>,
    safety_stock: Vec<f64>,
    stockouts: usize,
    mean_pipeline_volume: f64,
}

impl ReplenishmentConfig {
    fn validate(&self) -> InventoryResult<()> {
        if self.mean_weekly_demand < 0.0 || !self.mean_weekly_demand.is_finite() {
            return Err(InventoryError::invalid_input(
                "mean weekly demand must be finite and non-negative",
            ));
        }
        if self.weekly_std_dev < 0.0 || !self.weekly_std_dev.is_finite() {
            return Err(InventoryError::invalid_input(
                "weekly standard deviation must be finite and non-negative",
            ));
        }
        if !(self.stockout_tolerance > 0.0 && self.stockout_tolerance < 1.0) {
            return Err(InventoryError::invalid_input(
                "stockout tolerance must lie strictly between 0 and 1",
            ));
        }
        if self.lead_time_weeks == 0 {
            return Err(InventoryError::invalid_input(
                "lead time must be at least one week",
            ));
        }
        if self.horizon_weeks == 0 || self.trials == 0 {
            return Err(InventoryError::invalid_input(
                "horizon and trial count must be positive",
            ));
        }
        Ok(())
    }

    /// Initial safety stock implied by the stockout tolerance:
    /// `z(1 - tolerance) * sqrt(lead time) * sigma`.
    pub fn initial_safety_stock(&self) -> InventoryResult<f64> {
        let standard = GaussianCdf::new(0.0, 1.0)
            .map_err(|err| InventoryError::invalid_input(err.to_string()))?;
        let z = standard.inverse_cdf(1.0 - self.stockout_tolerance);
        Ok(z * (self.lead_time_weeks as f64).sqrt() * self.weekly_std_dev)
    }
}

fn run_trial(
    config: &ReplenishmentConfig,
    demand: Normal<f64>,
    initial_safety_stock: f64,
    trial_seed: u64,
) -> TrialOutcome {
    let mut rng = StdRng::seed_from_u64(trial_seed);

    // Oldest order sits at the back of the queue
    let mut pipeline: VecDeque<f64> =
        std::iter::repeat(config.mean_weekly_demand)
            .take(config.lead_time_weeks)
            .collect();
    let mut safety_stock = initial_safety_stock;

    let mut pipeline_path = Vec::with_capacity(config.horizon_weeks);
    let mut safety_path = Vec::with_capacity(config.horizon_weeks);
    let mut stockouts = 0;
    let mut volume_total = 0.0;

    for _week in 0..config.horizon_weeks {
        let current_demand = demand.sample(&mut rng);

        safety_stock -= current_demand;
        if let Some(arrival) = pipeline.pop_back() {
            safety_stock += arrival;
        }

        if safety_stock <= 0.0 {
            stockouts += 1;
        }
        safety_path.push(safety_stock);

        // Reorder exactly what just sold
        pipeline.push_front(current_demand);

        let volume: f64 = pipeline.iter().sum();
        pipeline_path.push(volume);
        volume_total += volume;
    }

    TrialOutcome {
        pipeline: pipeline_path,
        safety_stock: safety_path,
        stockouts,
        mean_pipeline_volume: volume_total / config.horizon_weeks as f64,
    }
}

/// Runs the replenishment simulation.
pub fn run_replenishment(config: &ReplenishmentConfig) -> InventoryResult<ReplenishmentReport> {
    config.validate()?;

    let demand = Normal::new(config.mean_weekly_demand, config.weekly_std_dev)
        .map_err(|err| InventoryError::invalid_input(err.to_string()))?;
    let initial_safety_stock = config.initial_safety_stock()?;

    let base_seed = config.seed.unwrap_or_else(rand::random);
    log::debug!(
        "replenishment simulation: {} trials x {} weeks, seed {base_seed}",
        config.trials,
        config.horizon_weeks
    );

    let trial_seed = |trial: usize| base_seed.wrapping_add((trial as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));

    #[cfg(feature = "parallel")]
    let outcomes: Vec<TrialOutcome> = (0..config.trials)
        .into_par_iter()
        .map(|trial| run_trial(config, demand, initial_safety_stock, trial_seed(trial)))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<TrialOutcome> = (0..config.trials)
        .map(|trial| run_trial(config, demand, initial_safety_stock, trial_seed(trial)))
        .collect();

    let mut pipeline_paths = Array2::zeros((config.trials, config.horizon_weeks));
    let mut safety_stock_paths = Array2::zeros((config.trials, config.horizon_weeks));
    let mut stockouts = 0usize;
    let mut volume_total = 0.0;

    for (trial, outcome) in outcomes.iter().enumerate() {
        for (week, &volume) in outcome.pipeline.iter().enumerate() {
            pipeline_paths[(trial, week)] = volume;
        }
        for (week, &stock) in outcome.safety_stock.iter().enumerate() {
            safety_stock_paths[(trial, week)] = stock;
        }
        stockouts += outcome.stockouts;
        volume_total += outcome.mean_pipeline_volume;
    }

    Ok(ReplenishmentReport {
        initial_safety_stock,
        average_pipeline_volume: volume_total / config.trials as f64,
        stockout_probability: stockouts as f64 / (config.trials * config.horizon_weeks) as f64,
        pipeline_paths,
        safety_stock_paths,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn base_config() -> ReplenishmentConfig {
        ReplenishmentConfig {
            mean_weekly_demand: 5777.15,
            weekly_std_dev: 3122.0,
            lead_time_weeks: 6,
            stockout_tolerance: 0.02,
            horizon_weeks: 52,
            trials: 50,
            seed: Some(7),
        }
    }

    #[test]
    fn test_validation() {
        let mut config = base_config();
        config.stockout_tolerance = 0.0;
        assert!(run_replenishment(&config).is_err());

        let mut config = base_config();
        config.lead_time_weeks = 0;
        assert!(run_replenishment(&config).is_err());

        let mut config = base_config();
        config.weekly_std_dev = -1.0;
        assert!(run_replenishment(&config).is_err());
    }

    #[test]
    fn test_initial_safety_stock_quantile() {
        let config = base_config();
        // z(0.98) is about 2.054
        let expected = 2.0537 * 6.0_f64.sqrt() * 3122.0;
        let actual = config.initial_safety_stock().unwrap();
        assert_relative_eq!(actual, expected, epsilon = expected * 1e-3);
    }

    #[test]
    fn test_report_dimensions() {
        let config = base_config();
        let report = run_replenishment(&config).unwrap();

        assert_eq!(report.pipeline_paths.dim(), (50, 52));
        assert_eq!(report.safety_stock_paths.dim(), (50, 52));
        assert!(report.stockout_probability >= 0.0 && report.stockout_probability <= 1.0);
    }

    #[test]
    fn test_pipeline_volume_tracks_mean_demand() {
        let config = base_config();
        let report = run_replenishment(&config).unwrap();

        // The pipeline holds about lead-time weeks of average demand
        let expected = config.mean_weekly_demand * config.lead_time_weeks as f64;
        let ratio = report.average_pipeline_volume / expected;
        assert!(ratio > 0.9 && ratio < 1.1, "ratio was {ratio}");
    }

    #[test]
    fn test_deterministic_with_seed() {
        let config = base_config();
        let a = run_replenishment(&config).unwrap();
        let b = run_replenishment(&config).unwrap();

        assert_relative_eq!(a.stockout_probability, b.stockout_probability);
        assert_relative_eq!(a.average_pipeline_volume, b.average_pipeline_volume);
        assert_eq!(a.pipeline_paths, b.pipeline_paths);
    }

    #[test]
    fn test_zero_variance_sits_at_stockout_boundary() {
        let config = ReplenishmentConfig {
            mean_weekly_demand: 100.0,
            weekly_std_dev: 0.0,
            lead_time_weeks: 4,
            stockout_tolerance: 0.02,
            horizon_weeks: 20,
            trials: 5,
            seed: Some(11),
        };
        let report = run_replenishment(&config).unwrap();

        // Deliveries exactly offset demand and safety stock starts at zero,
        // so every week sits exactly at the stockout boundary
        assert_relative_eq!(report.stockout_probability, 1.0);
        assert_relative_eq!(report.average_pipeline_volume, 400.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tighter_tolerance_means_fewer_stockouts() {
        let mut loose = base_config();
        loose.stockout_tolerance = 0.30;
        loose.trials = 40;

        let mut tight = base_config();
        tight.stockout_tolerance = 0.001;
        tight.trials = 40;

        let loose_report = run_replenishment(&loose).unwrap();
        let tight_report = run_replenishment(&tight).unwrap();

        assert!(tight_report.stockout_probability < loose_report.stockout_probability);
    }
}
