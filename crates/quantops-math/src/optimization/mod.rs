//! Optimization algorithms.
//!
//! Two minimizers cover the workspace's needs: an unconstrained steepest
//! descent with backtracking line search, and a projected variant that
//! keeps the iterate on the unit simplex (non-negative entries summing to
//! one), which is exactly the feasible set of a fully-invested long-only
//! portfolio. Equality constraints beyond the budget (for example a target
//! portfolio return) are handled by the caller through a quadratic penalty
//! in the objective.

use crate::error::{MathError, MathResult};

/// Configuration for optimization algorithms.
#[derive(Debug, Clone, Copy)]
pub struct OptimizerConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Step size for numerical gradients.
    pub gradient_step: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 500,
            gradient_step: 1e-7,
        }
    }
}

impl OptimizerConfig {
    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationOutcome {
    /// Optimal parameters found.
    pub parameters: Vec<f64>,
    /// Final objective function value.
    pub objective_value: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Whether the optimization converged.
    pub converged: bool,
}

fn numerical_gradient<F>(f: &F, params: &[f64], h: f64) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let n = params.len();
    let mut gradient = vec![0.0; n];
    let mut probe = params.to_vec();
    for i in 0..n {
        let original = probe[i];
        probe[i] = original + h;
        let plus = f(&probe);
        probe[i] = original - h;
        let minus = f(&probe);
        probe[i] = original;
        gradient[i] = (plus - minus) / (2.0 * h);
    }
    gradient
}

/// Steepest descent with backtracking line search.
///
/// Minimizes `f` from `initial` using numerical central-difference
/// gradients. Suitable for smooth low-dimensional objectives.
pub fn steepest_descent<F>(
    f: F,
    initial: &[f64],
    config: &OptimizerConfig,
) -> MathResult<OptimizationOutcome>
where
    F: Fn(&[f64]) -> f64,
{
    if initial.is_empty() {
        return Err(MathError::invalid_input("empty parameter vector"));
    }

    let mut params = initial.to_vec();
    let mut best_value = f(&params);
    let n = params.len();

    for iteration in 0..config.max_iterations {
        let gradient = numerical_gradient(&f, &params, config.gradient_step);
        let grad_mag: f64 = gradient.iter().map(|g| g * g).sum::<f64>().sqrt();

        if grad_mag < config.tolerance {
            return Ok(OptimizationOutcome {
                parameters: params,
                objective_value: best_value,
                iterations: iteration,
                converged: true,
            });
        }

        // Backtracking line search (Armijo condition)
        let mut step = 1.0;
        let c = 0.5;
        loop {
            let mut candidate = params.clone();
            for i in 0..n {
                candidate[i] -= step * gradient[i];
            }

            let value = f(&candidate);
            if value < best_value - c * step * grad_mag * grad_mag {
                params = candidate;
                best_value = value;
                break;
            }

            step *= 0.5;
            if step < 1e-15 {
                return Ok(OptimizationOutcome {
                    parameters: params,
                    objective_value: best_value,
                    iterations: iteration,
                    converged: false,
                });
            }
        }
    }

    Ok(OptimizationOutcome {
        parameters: params,
        objective_value: best_value,
        iterations: config.max_iterations,
        converged: false,
    })
}

/// Projects a vector onto the unit simplex in place.
///
/// After the call every entry is non-negative and the entries sum to one.
/// Uses the sort-based algorithm of Held, Wolfe and Crowder.
pub fn project_to_simplex(w: &mut [f64]) {
    if w.is_empty() {
        return;
    }

    let mut sorted = w.to_vec();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    let mut cumulative = 0.0;
    let mut threshold = 0.0;
    for (i, &u) in sorted.iter().enumerate() {
        cumulative += u;
        let t = (cumulative - 1.0) / (i as f64 + 1.0);
        if u - t > 0.0 {
            threshold = t;
        }
    }

    for x in w.iter_mut() {
        *x = (*x - threshold).max(0.0);
    }
}

/// Minimizes `f` over the unit simplex by projected gradient descent.
///
/// Starts from the uniform vector `1/n`. Each iteration takes a descent
/// step along the numerical gradient, projects back onto the simplex, and
/// backtracks until the objective improves. Converges when the iterate
/// stops moving.
pub fn minimize_on_simplex<F>(
    f: F,
    n: usize,
    config: &OptimizerConfig,
) -> MathResult<OptimizationOutcome>
where
    F: Fn(&[f64]) -> f64,
{
    if n == 0 {
        return Err(MathError::invalid_input("empty parameter vector"));
    }

    let mut params = vec![1.0 / n as f64; n];
    let mut best_value = f(&params);

    for iteration in 0..config.max_iterations {
        let gradient = numerical_gradient(&f, &params, config.gradient_step);

        let mut step = 1.0;
        let mut moved = false;
        while step >= 1e-15 {
            let mut candidate: Vec<f64> = params
                .iter()
                .zip(gradient.iter())
                .map(|(p, g)| p - step * g)
                .collect();
            project_to_simplex(&mut candidate);

            let value = f(&candidate);
            if value < best_value {
                let displacement: f64 = candidate
                    .iter()
                    .zip(params.iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum::<f64>()
                    .sqrt();

                params = candidate;
                best_value = value;
                moved = true;

                if displacement < config.tolerance {
                    return Ok(OptimizationOutcome {
                        parameters: params,
                        objective_value: best_value,
                        iterations: iteration + 1,
                        converged: true,
                    });
                }
                break;
            }
            step *= 0.5;
        }

        if !moved {
            // No feasible descent direction left at this scale
            return Ok(OptimizationOutcome {
                parameters: params,
                objective_value: best_value,
                iterations: iteration,
                converged: true,
            });
        }
    }

    Ok(OptimizationOutcome {
        parameters: params,
        objective_value: best_value,
        iterations: config.max_iterations,
        converged: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_steepest_descent_quadratic() {
        // Minimize (x-2)^2 + (y-3)^2
        let f = |params: &[f64]| {
            let x = params[0];
            let y = params[1];
            (x - 2.0).powi(2) + (y - 3.0).powi(2)
        };

        let result = steepest_descent(f, &[0.0, 0.0], &OptimizerConfig::default()).unwrap();

        assert!(result.converged);
        assert_relative_eq!(result.parameters[0], 2.0, epsilon = 1e-5);
        assert_relative_eq!(result.parameters[1], 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_project_already_feasible() {
        let mut w = vec![0.25, 0.25, 0.5];
        project_to_simplex(&mut w);
        assert_relative_eq!(w[0], 0.25, epsilon = 1e-12);
        assert_relative_eq!(w[2], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_project_clips_negative() {
        let mut w = vec![1.4, -0.4, 0.0];
        project_to_simplex(&mut w);
        let total: f64 = w.iter().sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
        assert!(w.iter().all(|&x| x >= 0.0));
        // Mass concentrates on the dominant entry
        assert!(w[0] > 0.9);
    }

    #[test]
    fn test_project_sums_to_one() {
        let mut w = vec![0.9, 0.8, 0.7, 0.1];
        project_to_simplex(&mut w);
        let total: f64 = w.iter().sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_simplex_minimizer_concentrates_on_smallest() {
        // Linear objective: all mass should move to the cheapest coordinate
        let costs = [3.0, 1.0, 2.0];
        let f = move |w: &[f64]| w.iter().zip(costs.iter()).map(|(w, c)| w * c).sum::<f64>();

        let result = minimize_on_simplex(f, 3, &OptimizerConfig::default()).unwrap();

        assert!(result.parameters[1] > 0.99);
        assert_relative_eq!(result.parameters.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_simplex_minimizer_diversifies_quadratic() {
        // Symmetric quadratic: the uniform portfolio is optimal
        let f = |w: &[f64]| w.iter().map(|x| x * x).sum::<f64>();

        let result = minimize_on_simplex(f, 4, &OptimizerConfig::default()).unwrap();

        for &w in &result.parameters {
            assert_relative_eq!(w, 0.25, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_empty_parameters_rejected() {
        let f = |_: &[f64]| 0.0;
        assert!(steepest_descent(f, &[], &OptimizerConfig::default()).is_err());
        assert!(minimize_on_simplex(f, 0, &OptimizerConfig::default()).is_err());
    }
}
