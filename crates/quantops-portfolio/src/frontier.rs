//! Markowitz portfolios and the efficient frontier.
//!
//! Every optimization here is long-only and fully invested, so the
//! feasible set is the unit simplex and the solver is the projected
//! gradient minimizer from the math crate. The target-return constraint
//! of a frontier point enters as a quadratic penalty on the objective.

use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use quantops_core::types::Periodicity;
use quantops_math::optimization::{minimize_on_simplex, OptimizerConfig};

use crate::error::{PortfolioError, PortfolioResult};

/// Configuration for the frontier optimizations.
#[derive(Debug, Clone, Copy)]
pub struct FrontierConfig {
    /// Risk-free rate per observation period (used by Sharpe ratios).
    pub risk_free_rate: f64,
    /// Weight of the squared target-return penalty.
    pub target_penalty: f64,
    /// Underlying optimizer settings.
    pub optimizer: OptimizerConfig,
}

impl Default for FrontierConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.0,
            target_penalty: 1e6,
            optimizer: OptimizerConfig::default().with_max_iterations(2000),
        }
    }
}

/// A candidate portfolio with its per-period performance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioCandidate {
    /// Asset weights (non-negative, summing to one).
    pub weights: Vec<f64>,
    /// Expected return per observation period.
    pub expected_return: f64,
    /// Volatility per observation period.
    pub volatility: f64,
    /// Sharpe ratio at the configured risk-free rate.
    pub sharpe_ratio: f64,
}

/// Performance of a portfolio scaled to annual terms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnnualizedPerformance {
    /// Annualized expected return.
    pub expected_return: f64,
    /// Annualized volatility.
    pub volatility: f64,
    /// Sharpe ratio against an annual risk-free rate.
    pub sharpe_ratio: f64,
}

impl PortfolioCandidate {
    /// Scales the per-period figures to annual terms.
    #[must_use]
    pub fn annualized(
        &self,
        periodicity: Periodicity,
        annual_risk_free: f64,
    ) -> AnnualizedPerformance {
        let expected_return = periodicity.annualize_return(self.expected_return);
        let volatility = periodicity.annualize_volatility(self.volatility);
        let sharpe_ratio = if volatility > 0.0 {
            (expected_return - annual_risk_free) / volatility
        } else {
            0.0
        };
        AnnualizedPerformance {
            expected_return,
            volatility,
            sharpe_ratio,
        }
    }
}

/// A point on the efficient frontier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontierPoint {
    /// The return the optimization targeted.
    pub target_return: f64,
    /// The portfolio realizing (approximately) that return at minimum
    /// volatility.
    pub portfolio: PortfolioCandidate,
}

fn check_dimensions(means: &DVector<f64>, cov: &DMatrix<f64>) -> PortfolioResult<()> {
    let n = means.len();
    if n == 0 {
        return Err(PortfolioError::invalid_input("no assets"));
    }
    if cov.nrows() != n || cov.ncols() != n {
        return Err(PortfolioError::DimensionMismatch {
            left: n,
            right: cov.nrows(),
        });
    }
    Ok(())
}

fn portfolio_moments(weights: &[f64], means: &DVector<f64>, cov: &DMatrix<f64>) -> (f64, f64) {
    let w = DVector::from_column_slice(weights);
    let expected = means.dot(&w);
    let variance = (cov * &w).dot(&w);
    (expected, variance.max(0.0))
}

/// Expected return and volatility of a weight vector.
pub fn performance(
    weights: &[f64],
    means: &DVector<f64>,
    cov: &DMatrix<f64>,
    risk_free_rate: f64,
) -> PortfolioResult<PortfolioCandidate> {
    check_dimensions(means, cov)?;
    if weights.len() != means.len() {
        return Err(PortfolioError::DimensionMismatch {
            left: weights.len(),
            right: means.len(),
        });
    }

    let (expected_return, variance) = portfolio_moments(weights, means, cov);
    let volatility = variance.sqrt();
    let sharpe_ratio = if volatility > 0.0 {
        (expected_return - risk_free_rate) / volatility
    } else {
        0.0
    };

    Ok(PortfolioCandidate {
        weights: weights.to_vec(),
        expected_return,
        volatility,
        sharpe_ratio,
    })
}

/// The long-only portfolio with minimum variance.
pub fn min_variance_portfolio(
    means: &DVector<f64>,
    cov: &DMatrix<f64>,
    config: &FrontierConfig,
) -> PortfolioResult<PortfolioCandidate> {
    check_dimensions(means, cov)?;

    let objective = |w: &[f64]| portfolio_moments(w, means, cov).1;
    let outcome = minimize_on_simplex(objective, means.len(), &config.optimizer)?;

    performance(&outcome.parameters, means, cov, config.risk_free_rate)
}

/// The long-only portfolio maximizing the Sharpe ratio.
pub fn max_sharpe_portfolio(
    means: &DVector<f64>,
    cov: &DMatrix<f64>,
    config: &FrontierConfig,
) -> PortfolioResult<PortfolioCandidate> {
    check_dimensions(means, cov)?;

    let risk_free = config.risk_free_rate;
    let objective = |w: &[f64]| {
        let (expected, variance) = portfolio_moments(w, means, cov);
        let volatility = variance.sqrt();
        if volatility <= 0.0 {
            return 0.0;
        }
        -(expected - risk_free) / volatility
    };
    let outcome = minimize_on_simplex(objective, means.len(), &config.optimizer)?;

    performance(&outcome.parameters, means, cov, config.risk_free_rate)
}

/// The minimum-volatility portfolio achieving a target per-period return.
///
/// The target enters as a quadratic penalty; the achieved return can
/// deviate from the target when the target lies outside the span of the
/// asset returns.
pub fn efficient_return_portfolio(
    means: &DVector<f64>,
    cov: &DMatrix<f64>,
    target_return: f64,
    config: &FrontierConfig,
) -> PortfolioResult<PortfolioCandidate> {
    check_dimensions(means, cov)?;

    let penalty = config.target_penalty;
    let objective = |w: &[f64]| {
        let (expected, variance) = portfolio_moments(w, means, cov);
        let miss = expected - target_return;
        variance + penalty * miss * miss
    };
    let outcome = minimize_on_simplex(objective, means.len(), &config.optimizer)?;

    performance(&outcome.parameters, means, cov, config.risk_free_rate)
}

/// The efficient frontier over a grid of target returns.
pub fn efficient_frontier(
    means: &DVector<f64>,
    cov: &DMatrix<f64>,
    targets: &[f64],
    config: &FrontierConfig,
) -> PortfolioResult<Vec<FrontierPoint>> {
    let mut points = Vec::with_capacity(targets.len());
    for &target in targets {
        let portfolio = efficient_return_portfolio(means, cov, target, config)?;
        points.push(FrontierPoint {
            target_return: target,
            portfolio,
        });
    }
    log::debug!("efficient frontier computed over {} targets", targets.len());
    Ok(points)
}

/// Random long-only, fully invested portfolios.
///
/// Draws uniform weights and normalizes them to sum to one, the standard
/// Monte Carlo scatter behind frontier plots.
pub fn random_portfolios(
    means: &DVector<f64>,
    cov: &DMatrix<f64>,
    count: usize,
    config: &FrontierConfig,
    seed: Option<u64>,
) -> PortfolioResult<Vec<PortfolioCandidate>> {
    check_dimensions(means, cov)?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let n = means.len();
    let mut portfolios = Vec::with_capacity(count);
    for _ in 0..count {
        let mut weights: Vec<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            // All-zero draw is vanishingly unlikely; fall back to uniform
            weights = vec![1.0 / n as f64; n];
        } else {
            for w in &mut weights {
                *w /= total;
            }
        }
        portfolios.push(performance(&weights, means, cov, config.risk_free_rate)?);
    }
    Ok(portfolios)
}
