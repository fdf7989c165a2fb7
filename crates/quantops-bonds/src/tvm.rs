//! Time-value-of-money primitives.
//!
//! The level-annuity present value and its inverse, the periodic rate
//! solver. Cash flows are a constant payment each period plus a redemption
//! amount alongside the final payment.

use quantops_math::solvers::{newton_with_fallback, SolverConfig, SolverResult};

use crate::error::{BondError, BondResult};

/// Present value of `periods` level payments plus a final redemption.
///
/// `rate` is the rate per period. A zero rate degenerates to the plain
/// sum of the cash flows.
#[must_use]
pub fn present_value(rate: f64, periods: u32, payment: f64, redemption: f64) -> f64 {
    if periods == 0 {
        return redemption;
    }
    if rate.abs() < 1e-15 {
        return payment * f64::from(periods) + redemption;
    }

    let n = f64::from(periods);
    let discount = (1.0 + rate).powf(-n);
    let annuity = payment * (1.0 - discount) / rate;
    annuity + redemption * discount
}

/// Sensitivity of [`present_value`] to the rate per period.
#[must_use]
pub fn present_value_derivative(rate: f64, periods: u32, payment: f64, redemption: f64) -> f64 {
    let n = f64::from(periods);
    if rate.abs() < 1e-15 {
        // Limit of the analytical derivative as rate approaches zero
        return -payment * n * (n + 1.0) / 2.0 - redemption * n;
    }

    let g = 1.0 + rate;
    let discount = g.powf(-n);
    let annuity_term = payment * (n * discount / g * rate - (1.0 - discount)) / (rate * rate);
    let redemption_term = -redemption * n * discount / g;
    annuity_term + redemption_term
}

/// Solves for the rate per period that prices the annuity at `price`.
///
/// Newton-Raphson from a coupon-yield style guess, with a Brent fallback
/// over a wide bracket when the iteration diverges.
pub fn periodic_rate(
    periods: u32,
    payment: f64,
    price: f64,
    redemption: f64,
    config: &SolverConfig,
) -> BondResult<SolverResult> {
    if periods == 0 {
        return Err(BondError::invalid_spec("periods must be positive"));
    }
    if price <= 0.0 {
        return Err(BondError::invalid_quote(price, "price must be positive"));
    }

    let objective = |r: f64| present_value(r, periods, payment, redemption) - price;
    let derivative = |r: f64| present_value_derivative(r, periods, payment, redemption);

    let guess = if price > 0.0 {
        (payment * f64::from(periods) + redemption - price)
            / (price * f64::from(periods)).max(1e-12)
            + payment / price
    } else {
        0.05
    };
    let guess = guess.clamp(-0.5, 1.0);

    newton_with_fallback(
        objective,
        Some(derivative),
        guess,
        Some((-0.99, 2.0)),
        config,
    )
    .map_err(|err| {
        log::debug!("periodic rate solve failed: {err}");
        BondError::YieldConvergenceFailed {
            iterations: config.max_iterations,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_present_value_zero_rate() {
        assert_relative_eq!(present_value(0.0, 10, 5.0, 100.0), 150.0);
    }

    #[test]
    fn test_present_value_discounts_below_sum() {
        let pv = present_value(0.03, 10, 5.0, 100.0);
        assert!(pv < 150.0);
        assert!(pv > 0.0);
    }

    #[test]
    fn test_present_value_par_annuity() {
        // Payment rate equal to the discount rate prices at the redemption
        let pv = present_value(0.025, 20, 2.5, 100.0);
        assert_relative_eq!(pv, 100.0, epsilon = 1e-10);
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let h = 1e-7;
        for rate in [0.01, 0.05, 0.12] {
            let analytic = present_value_derivative(rate, 20, 3.0, 100.0);
            let numeric = (present_value(rate + h, 20, 3.0, 100.0)
                - present_value(rate - h, 20, 3.0, 100.0))
                / (2.0 * h);
            assert_relative_eq!(analytic, numeric, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_periodic_rate_recovers_pricing_rate() {
        let config = SolverConfig::default();
        let price = present_value(0.0375, 60, 3.5, 1000.0);

        let rate = periodic_rate(60, 3.5, price, 1000.0, &config).unwrap();

        assert_relative_eq!(rate.root, 0.0375, epsilon = 1e-9);
    }

    #[test]
    fn test_periodic_rate_zero_periods_rejected() {
        let config = SolverConfig::default();
        assert!(periodic_rate(0, 5.0, 100.0, 100.0, &config).is_err());
    }

    #[test]
    fn test_periodic_rate_negative_price_rejected() {
        let config = SolverConfig::default();
        assert!(periodic_rate(10, 5.0, -3.0, 100.0, &config).is_err());
    }
}
