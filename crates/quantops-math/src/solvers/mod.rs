//! Root-finding algorithms.
//!
//! This module provides the numerical solvers used by the rate and yield
//! calculations:
//!
//! - [`newton_raphson`]: fast quadratic convergence when a derivative is
//!   available
//! - [`brent`]: robust bracketing method combining bisection, secant, and
//!   inverse quadratic interpolation
//! - [`bisection`]: simple and reliable bracketing method
//! - [`newton_with_fallback`]: Newton-Raphson that falls back to Brent over
//!   progressively wider brackets when the iteration diverges
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Newton-Raphson | Fastest (quadratic) | May diverge | Derivative |
//! | Brent | Fast (superlinear) | Guaranteed | Bracket |
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//! | Fallback | Fast | Guaranteed* | Initial guess |
//!
//! *When a sign-changing bracket exists among the candidates tried.
//!
//! # Example: solving a periodic rate
//!
//! ```rust
//! use quantops_math::solvers::{newton_with_fallback, SolverConfig};
//!
//! // Annuity of 2.5 for 20 periods plus 100 at the end, priced at 95
//! let f = |r: f64| {
//!     let mut pv = 0.0;
//!     for t in 1..=20 {
//!         pv += 2.5 / (1.0 + r).powi(t);
//!     }
//!     pv += 100.0 / (1.0 + r).powi(20);
//!     pv - 95.0
//! };
//!
//! let result =
//!     newton_with_fallback(f, None::<fn(f64) -> f64>, 0.03, Some((0.0, 0.20)), &SolverConfig::default())
//!         .unwrap();
//! assert!(result.root > 0.025); // discount to par pushes the rate up
//! ```

use crate::error::{MathError, MathResult};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

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

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at the root).
    pub residual: f64,
}

/// Newton-Raphson root-finding.
///
/// Iterates `x_{n+1} = x_n - f(x_n) / f'(x_n)` from `initial_guess`.
/// Quadratic convergence near the root, but may diverge from a poor
/// starting point.
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;

    for iteration in 0..config.max_iterations {
        let fx = f(x);
        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        let dfx = df(x);
        if dfx.abs() < 1e-15 {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        let step = fx / dfx;
        x -= step;

        if step.abs() < config.tolerance {
            let residual = f(x);
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual,
            });
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f(x).abs(),
    ))
}

/// Newton-Raphson with a central-difference derivative estimate.
pub fn newton_raphson_numerical<F>(
    f: F,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let h = 1e-8;
    let df = |x: f64| (f(x + h) - f(x - h)) / (2.0 * h);
    newton_raphson(&f, df, initial_guess, config)
}

/// Bisection root-finding over a sign-changing bracket `[a, b]`.
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let (mut lo, mut hi) = if a <= b { (a, b) } else { (b, a) };
    let mut flo = f(lo);
    let fhi = f(hi);

    if flo.abs() < config.tolerance {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: flo,
        });
    }
    if fhi.abs() < config.tolerance {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: fhi,
        });
    }
    if flo * fhi > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: flo,
            fb: fhi,
        });
    }

    for iteration in 0..config.max_iterations {
        let mid = 0.5 * (lo + hi);
        let fmid = f(mid);

        if fmid.abs() < config.tolerance || 0.5 * (hi - lo) < config.tolerance {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration + 1,
                residual: fmid,
            });
        }

        if flo * fmid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            flo = fmid;
        }
    }

    let mid = 0.5 * (lo + hi);
    Err(MathError::convergence_failed(
        config.max_iterations,
        f(mid).abs(),
    ))
}

/// Brent's method over a sign-changing bracket `[a, b]`.
///
/// Combines bisection, secant steps, and inverse quadratic interpolation.
/// Convergence is guaranteed once a valid bracket is supplied.
pub fn brent<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut a = a;
    let mut b = b;
    let mut fa = f(a);
    let mut fb = f(b);

    if fa.abs() < config.tolerance {
        return Ok(SolverResult {
            root: a,
            iterations: 0,
            residual: fa,
        });
    }
    if fb.abs() < config.tolerance {
        return Ok(SolverResult {
            root: b,
            iterations: 0,
            residual: fb,
        });
    }
    if fa * fb > 0.0 {
        return Err(MathError::InvalidBracket { a, b, fa, fb });
    }

    let mut c = a;
    let mut fc = fa;
    let mut d = b - a;
    let mut e = d;

    for iteration in 0..config.max_iterations {
        if fb * fc > 0.0 {
            // Root no longer bracketed by [b, c]; reset c to a
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol1 = 2.0 * f64::EPSILON * b.abs() + 0.5 * config.tolerance;
        let xm = 0.5 * (c - b);

        if xm.abs() <= tol1 || fb == 0.0 {
            return Ok(SolverResult {
                root: b,
                iterations: iteration,
                residual: fb,
            });
        }

        if e.abs() >= tol1 && fa.abs() > fb.abs() {
            // Attempt inverse quadratic interpolation (secant when a == c)
            let s = fb / fa;
            let (mut p, mut q);
            if (a - c).abs() < f64::EPSILON {
                p = 2.0 * xm * s;
                q = 1.0 - s;
            } else {
                let r1 = fa / fc;
                let r2 = fb / fc;
                p = s * (2.0 * xm * r1 * (r1 - r2) - (b - a) * (r2 - 1.0));
                q = (r1 - 1.0) * (r2 - 1.0) * (s - 1.0);
            }
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let min1 = 3.0 * xm * q - (tol1 * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                // Interpolation acceptable
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }

        a = b;
        fa = fb;
        if d.abs() > tol1 {
            b += d;
        } else {
            b += tol1.copysign(xm);
        }
        fb = f(b);
    }

    Err(MathError::convergence_failed(config.max_iterations, fb.abs()))
}

/// Newton-Raphson with a Brent fallback.
///
/// Tries Newton-Raphson first (numerical derivative when `df` is `None`).
/// If the iteration diverges, retries Brent over `bounds` when supplied,
/// then over a sequence of progressively wider brackets around the
/// initial guess.
pub fn newton_with_fallback<F, DF>(
    f: F,
    df: Option<DF>,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let newton_result = match df {
        Some(df) => newton_raphson(&f, df, initial_guess, config),
        None => newton_raphson_numerical(&f, initial_guess, config),
    };

    match newton_result {
        Ok(result) => Ok(result),
        Err(newton_err) => {
            log::debug!(
                "Newton-Raphson failed ({newton_err}); falling back to Brent from guess {initial_guess}"
            );

            let mut candidates: Vec<(f64, f64)> = Vec::with_capacity(5);
            if let Some(bracket) = bounds {
                candidates.push(bracket);
            }
            candidates.push((initial_guess - 0.1, initial_guess + 0.1));
            candidates.push((initial_guess - 0.5, initial_guess + 0.5));
            candidates.push((-0.5, 2.0));

            for (a, b) in candidates {
                if let Ok(result) = brent(&f, a, b, config) {
                    return Ok(result);
                }
            }

            Err(MathError::convergence_failed(
                config.max_iterations,
                f(initial_guess).abs(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_newton_sqrt_2() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;

        let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert!(result.iterations < 10);
    }

    #[test]
    fn test_newton_numerical_derivative() {
        let f = |x: f64| x * x * x - 27.0;

        let result = newton_raphson_numerical(f, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 3.0, epsilon = 1e-8);
    }

    #[test]
    fn test_newton_zero_derivative_error() {
        let f = |x: f64| x * x * x - 1.0;
        let df = |x: f64| 3.0 * x * x;

        let result = newton_raphson(f, df, 0.0, &SolverConfig::default());

        assert!(result.is_err());
    }

    #[test]
    fn test_bisection_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = bisection(f, 0.0, 2.0, &SolverConfig::new(1e-9, 100)).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-8);
    }

    #[test]
    fn test_bisection_invalid_bracket() {
        let f = |x: f64| x * x + 1.0;

        assert!(bisection(f, -1.0, 1.0, &SolverConfig::default()).is_err());
    }

    #[test]
    fn test_brent_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_brent_invalid_bracket() {
        let f = |x: f64| x * x + 1.0;

        assert!(brent(f, -1.0, 1.0, &SolverConfig::default()).is_err());
    }

    #[test]
    fn test_brent_beats_bisection() {
        let f = |x: f64| x.exp() - 5.0;
        let config = SolverConfig::default();

        let brent_result = brent(f, 0.0, 3.0, &config).unwrap();
        let bisect_result = bisection(f, 0.0, 3.0, &SolverConfig::new(1e-10, 200)).unwrap();

        assert_relative_eq!(brent_result.root, 5.0_f64.ln(), epsilon = 1e-9);
        assert_relative_eq!(bisect_result.root, 5.0_f64.ln(), epsilon = 1e-8);
        assert!(brent_result.iterations <= bisect_result.iterations);
    }

    #[test]
    fn test_fallback_recovers_from_bad_guess() {
        // tanh-like flat tails make Newton overshoot from far away
        let f = |x: f64| (x - 0.07).tanh();
        let df = |x: f64| 1.0 - (x - 0.07).tanh().powi(2);

        let result =
            newton_with_fallback(f, Some(df), 25.0, Some((-1.0, 1.0)), &SolverConfig::default())
                .unwrap();

        assert_relative_eq!(result.root, 0.07, epsilon = 1e-8);
    }

    #[test]
    fn test_fallback_without_derivative() {
        let f = |x: f64| x * x - 2.0;

        let result = newton_with_fallback(
            f,
            None::<fn(f64) -> f64>,
            1.5,
            None,
            &SolverConfig::default(),
        )
        .unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-8);
    }

    // ============ Rate-solving tests ============

    fn annuity_pv(rate: f64, payment: f64, periods: i32, lump: f64) -> f64 {
        let mut pv = 0.0;
        for t in 1..=periods {
            pv += payment / (1.0 + rate).powi(t);
        }
        pv + lump / (1.0 + rate).powi(periods)
    }

    #[test]
    fn test_periodic_rate_at_par() {
        // Priced at par, the periodic rate equals the payment rate
        let f = |r: f64| annuity_pv(r, 2.5, 20, 100.0) - 100.0;

        let result = newton_raphson_numerical(f, 0.03, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 0.025, epsilon = 1e-8);
    }

    #[test]
    fn test_periodic_rate_all_solvers_agree() {
        let f = |r: f64| annuity_pv(r, 3.0, 14, 100.0) - 98.0;
        let config = SolverConfig::default();

        let newton = newton_raphson_numerical(&f, 0.03, &config).unwrap();
        let brent_r = brent(&f, 0.0, 0.20, &config).unwrap();
        let bisect = bisection(&f, 0.0, 0.20, &SolverConfig::new(1e-10, 200)).unwrap();

        assert_relative_eq!(newton.root, brent_r.root, epsilon = 1e-8);
        assert_relative_eq!(newton.root, bisect.root, epsilon = 1e-7);
    }
}
