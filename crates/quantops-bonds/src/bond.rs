//! The level-coupon bond and its quote conversions.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use quantops_core::types::Frequency;
use quantops_math::solvers::SolverConfig;

use crate::error::{BondError, BondResult};
use crate::tvm;

/// Result of a yield calculation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct YieldSolution {
    /// The annualized yield (as a decimal, e.g. 0.05 for 5%).
    pub yield_value: f64,
    /// Number of solver iterations.
    pub iterations: u32,
    /// Final residual of the pricing equation.
    pub residual: f64,
}

/// A level-coupon bond.
///
/// Par amount, annual coupon rate, years to maturity, and payment
/// frequency fully determine the cash flows. Maturities that are not a
/// whole number of periods are rounded to the nearest period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    par: Decimal,
    coupon_rate: f64,
    maturity_years: f64,
    frequency: Frequency,
}

impl Bond {
    /// Starts building a bond.
    #[must_use]
    pub fn builder() -> BondBuilder {
        BondBuilder::default()
    }

    /// Par (face) amount.
    #[must_use]
    pub fn par(&self) -> Decimal {
        self.par
    }

    /// Annual coupon rate as a decimal.
    #[must_use]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Years to maturity.
    #[must_use]
    pub fn maturity_years(&self) -> f64 {
        self.maturity_years
    }

    /// Payment frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Annual coupon amount in par units.
    #[must_use]
    pub fn annual_coupon(&self) -> f64 {
        self.par_f64() * self.coupon_rate
    }

    fn par_f64(&self) -> f64 {
        self.par.to_f64().unwrap_or(0.0)
    }

    fn periods(&self) -> u32 {
        let n = self.maturity_years * f64::from(self.frequency.periods_per_year());
        n.round().max(1.0) as u32
    }

    fn payment(&self) -> f64 {
        self.annual_coupon() / f64::from(self.frequency.periods_per_year())
    }

    /// Price at a given yield to maturity.
    ///
    /// Discounts the coupon annuity and redemption at the periodic rate
    /// implied by the bond's payment frequency.
    #[must_use]
    pub fn price_from_yield(&self, ytm: f64) -> f64 {
        let rate = self.frequency.periodic_rate(ytm);
        tvm::present_value(rate, self.periods(), self.payment(), self.par_f64())
    }

    /// Yield to maturity at a given price.
    ///
    /// Solves the pricing equation for the periodic rate and annualizes
    /// it by the payment frequency.
    pub fn yield_to_maturity(&self, price: f64) -> BondResult<YieldSolution> {
        if price <= 0.0 {
            return Err(BondError::invalid_quote(price, "price must be positive"));
        }

        let config = SolverConfig::default();
        let solved =
            tvm::periodic_rate(self.periods(), self.payment(), price, self.par_f64(), &config)?;
        let annual = self.frequency.annual_rate(solved.root);
        let residual = self.price_from_yield(annual) - price;

        Ok(YieldSolution {
            yield_value: annual,
            iterations: solved.iterations,
            residual,
        })
    }

    /// Price implied by a current-yield quote.
    ///
    /// Current yield relates annual coupon income to price, so the quote
    /// inverts directly: price = coupon / current yield.
    pub fn price_from_current_yield(&self, current_yield: f64) -> BondResult<f64> {
        if current_yield <= 0.0 {
            return Err(BondError::invalid_quote(
                current_yield,
                "current yield must be positive",
            ));
        }
        Ok(self.annual_coupon() / current_yield)
    }

    /// Current yield at a given price.
    pub fn current_yield(&self, price: f64) -> BondResult<f64> {
        if price <= 0.0 {
            return Err(BondError::invalid_quote(price, "price must be positive"));
        }
        Ok(self.annual_coupon() / price)
    }

    /// Coupon rate implied by a current yield and price.
    pub fn coupon_from_current_yield(
        par: Decimal,
        current_yield: f64,
        price: f64,
    ) -> BondResult<f64> {
        let par = par.to_f64().unwrap_or(0.0);
        if par <= 0.0 {
            return Err(BondError::invalid_spec("par must be positive"));
        }
        if price <= 0.0 {
            return Err(BondError::invalid_quote(price, "price must be positive"));
        }
        Ok(current_yield * price / par)
    }
}

/// Builder for [`Bond`].
#[derive(Debug, Clone, Default)]
pub struct BondBuilder {
    par: Option<Decimal>,
    coupon_rate: Option<f64>,
    maturity_years: Option<f64>,
    frequency: Frequency,
}

impl BondBuilder {
    /// Sets the par amount.
    #[must_use]
    pub fn par(mut self, par: Decimal) -> Self {
        self.par = Some(par);
        self
    }

    /// Sets the annual coupon rate (decimal, e.g. 0.05 for 5%).
    #[must_use]
    pub fn coupon_rate(mut self, rate: f64) -> Self {
        self.coupon_rate = Some(rate);
        self
    }

    /// Sets the years to maturity.
    #[must_use]
    pub fn maturity_years(mut self, years: f64) -> Self {
        self.maturity_years = Some(years);
        self
    }

    /// Sets the payment frequency. Defaults to semi-annual.
    #[must_use]
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Validates the inputs and builds the bond.
    pub fn build(self) -> BondResult<Bond> {
        let par = self
            .par
            .ok_or_else(|| BondError::invalid_spec("par is required"))?;
        let coupon_rate = self
            .coupon_rate
            .ok_or_else(|| BondError::invalid_spec("coupon rate is required"))?;
        let maturity_years = self
            .maturity_years
            .ok_or_else(|| BondError::invalid_spec("maturity is required"))?;

        if par <= Decimal::ZERO {
            return Err(BondError::invalid_spec("par must be positive"));
        }
        if coupon_rate < 0.0 {
            return Err(BondError::invalid_spec("coupon rate cannot be negative"));
        }
        if maturity_years <= 0.0 {
            return Err(BondError::invalid_spec("maturity must be positive"));
        }

        Ok(Bond {
            par,
            coupon_rate,
            maturity_years,
            frequency: self.frequency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn sample_bond() -> Bond {
        Bond::builder()
            .par(dec!(1000))
            .coupon_rate(0.07)
            .maturity_years(30.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_par_bond_prices_at_par() {
        let bond = sample_bond();
        assert_relative_eq!(bond.price_from_yield(0.07), 1000.0, epsilon = 1e-7);
    }

    #[test]
    fn test_discount_bond_yield_above_coupon() {
        let bond = sample_bond();
        let ytm = bond.yield_to_maturity(950.0).unwrap();
        assert!(ytm.yield_value > 0.07);
        assert!(ytm.residual.abs() < 1e-6);
    }

    #[test]
    fn test_premium_bond_yield_below_coupon() {
        let bond = sample_bond();
        let ytm = bond.yield_to_maturity(1050.0).unwrap();
        assert!(ytm.yield_value < 0.07);
    }

    #[test]
    fn test_price_yield_roundtrip() {
        let bond = Bond::builder()
            .par(dec!(100))
            .coupon_rate(0.055)
            .maturity_years(8.0)
            .build()
            .unwrap();

        let price = bond.price_from_yield(0.0625);
        let ytm = bond.yield_to_maturity(price).unwrap();

        assert_relative_eq!(ytm.yield_value, 0.0625, epsilon = 1e-8);
    }

    #[test]
    fn test_current_yield_conversions() {
        let bond = sample_bond();

        // Annual coupon is 70; at a 6% current yield the price is 1166.67
        let price = bond.price_from_current_yield(0.06).unwrap();
        assert_relative_eq!(price, 70.0 / 0.06, epsilon = 1e-9);

        // And converting back recovers the quote
        let cy = bond.current_yield(price).unwrap();
        assert_relative_eq!(cy, 0.06, epsilon = 1e-12);
    }

    #[test]
    fn test_coupon_from_current_yield() {
        // A 6% current yield on a price of 950 against 1000 par
        let coupon = Bond::coupon_from_current_yield(dec!(1000), 0.06, 950.0).unwrap();
        assert_relative_eq!(coupon, 0.057, epsilon = 1e-12);
    }

    #[test]
    fn test_annual_frequency_pricing() {
        let bond = Bond::builder()
            .par(dec!(100))
            .coupon_rate(0.04)
            .maturity_years(5.0)
            .frequency(Frequency::Annual)
            .build()
            .unwrap();

        assert_relative_eq!(bond.price_from_yield(0.04), 100.0, epsilon = 1e-9);
        // Five annual periods
        let price = bond.price_from_yield(0.06);
        let mut expected = 0.0;
        for t in 1..=5 {
            expected += 4.0 / 1.06_f64.powi(t);
        }
        expected += 100.0 / 1.06_f64.powi(5);
        assert_relative_eq!(price, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_builder_validation() {
        assert!(Bond::builder().build().is_err());
        assert!(Bond::builder()
            .par(dec!(-5))
            .coupon_rate(0.05)
            .maturity_years(10.0)
            .build()
            .is_err());
        assert!(Bond::builder()
            .par(dec!(100))
            .coupon_rate(0.05)
            .maturity_years(0.0)
            .build()
            .is_err());
    }

    #[test]
    fn test_invalid_quotes_rejected() {
        let bond = sample_bond();
        assert!(bond.yield_to_maturity(0.0).is_err());
        assert!(bond.current_yield(-10.0).is_err());
        assert!(bond.price_from_current_yield(0.0).is_err());
    }
}
