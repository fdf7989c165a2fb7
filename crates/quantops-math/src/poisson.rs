//! Poisson loss functions.
//!
//! The continuous-review inventory model needs tail probabilities and the
//! first- and second-order loss functions of a Poisson demand variable.
//! All of them reduce to evaluations of the regularized incomplete gamma
//! function, for which this module delegates to statrs. Arguments are
//! real-valued: reorder points arrive as integers in practice, but the
//! identities hold for any non-negative `r` and the callers pass whatever
//! their policies produced.
//!
//! Conventions, for demand `N ~ Poisson(theta)`:
//!
//! - [`poisson_sf`]: `P(N > r)`
//! - [`poisson_cdf`]: `P(N <= r)`
//! - [`poisson_pmf`]: `P(N = r)`, evaluated in the log domain
//! - [`first_order_loss`]: `E[(N - r)+]`, the expected shortfall per cycle
//! - [`second_order_loss`]: `E[(N - r)(N - r - 1)] / 2` over the shortfall
//!   region, the backorder integrand
//!
//! Exponent magnitudes above [`MAX_EXP_ARG`] saturate to 0 or 1 instead of
//! overflowing.

use statrs::function::gamma::{gamma_lr, gamma_ur, ln_gamma};

use crate::error::{MathError, MathResult};

/// Largest exponent magnitude fed to `exp`; beyond this the result
/// saturates.
pub const MAX_EXP_ARG: f64 = 700.0;

fn check_theta(function: &'static str, theta: f64) -> MathResult<()> {
    if !theta.is_finite() || theta < 0.0 {
        return Err(MathError::out_of_domain(
            function,
            format!("theta must be finite and non-negative, got {theta}"),
        ));
    }
    Ok(())
}

/// Survival function `P(N > r)` of a Poisson(`theta`) variable.
///
/// For `r < 0` every outcome exceeds `r`, so the probability is 1.
pub fn poisson_sf(r: f64, theta: f64) -> MathResult<f64> {
    check_theta("poisson_sf", theta)?;
    if r < 0.0 {
        return Ok(1.0);
    }
    if theta == 0.0 {
        return Ok(0.0);
    }
    if r == 0.0 {
        if theta > MAX_EXP_ARG {
            return Ok(1.0);
        }
        return Ok(1.0 - (-theta).exp());
    }
    Ok(gamma_lr(r + 1.0, theta))
}

/// Cumulative distribution `P(N <= r)` of a Poisson(`theta`) variable.
pub fn poisson_cdf(r: f64, theta: f64) -> MathResult<f64> {
    check_theta("poisson_cdf", theta)?;
    if r < 0.0 {
        return Ok(0.0);
    }
    if theta == 0.0 {
        return Ok(1.0);
    }
    Ok(gamma_ur(r + 1.0, theta))
}

/// Probability mass `P(N = r)` of a Poisson(`theta`) variable.
///
/// Evaluated as `exp(r ln theta - theta - ln r!)` so large `theta` and
/// large `r` do not overflow the intermediate factorial.
pub fn poisson_pmf(r: f64, theta: f64) -> MathResult<f64> {
    check_theta("poisson_pmf", theta)?;
    if r < 0.0 {
        return Ok(0.0);
    }
    if theta == 0.0 {
        return Ok(if r == 0.0 { 1.0 } else { 0.0 });
    }
    let arg = r * theta.ln() - theta - ln_gamma(r + 1.0);
    if arg < -MAX_EXP_ARG {
        return Ok(0.0);
    }
    Ok(arg.exp())
}

/// First-order loss function `E[(N - r)+]`.
///
/// For `r <= 0` the shortfall is certain and the expectation collapses to
/// `theta - r`.
pub fn first_order_loss(r: f64, theta: f64) -> MathResult<f64> {
    check_theta("first_order_loss", theta)?;
    if r <= 0.0 {
        return Ok(theta - r);
    }
    let sf = poisson_sf(r, theta)?;
    let pmf = poisson_pmf(r, theta)?;
    Ok(-(r - theta) * sf + theta * pmf)
}

/// Second-order loss function.
///
/// For `r <= 0` the closed form is `((theta - r)^2 + r) / 2`, obtained by
/// expanding `E[(N - r)(N - r - 1)] / 2` with the Poisson moments.
pub fn second_order_loss(r: f64, theta: f64) -> MathResult<f64> {
    check_theta("second_order_loss", theta)?;
    if r <= 0.0 {
        return Ok(((theta - r).powi(2) + r) / 2.0);
    }
    let sf = poisson_sf(r, theta)?;
    let pmf = poisson_pmf(r, theta)?;
    Ok((((r - theta).powi(2) + r) * sf - theta * (r - theta) * pmf) / 2.0)
}
