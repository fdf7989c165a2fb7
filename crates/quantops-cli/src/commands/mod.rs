//! Command implementations.

pub mod bond;
pub mod frontier;
pub mod inventory;
pub mod project;
pub mod replenish;
pub mod simulate;

pub use bond::BondArgs;
pub use frontier::FrontierArgs;
pub use inventory::InventoryArgs;
pub use project::ProjectArgs;
pub use replenish::ReplenishArgs;
pub use simulate::SimulateArgs;

use anyhow::{bail, Result};
use quantops_core::types::Frequency;

/// Parses a periods-per-year count into a frequency.
pub fn parse_frequency(periods: u32) -> Result<Frequency> {
    Ok(Frequency::from_periods_per_year(periods)?)
}

/// Validates a percentage-style argument and converts it to a decimal.
pub fn percent_to_decimal(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 || value > 100.0 {
        bail!("{name} must lie between 0 and 100, got {value}");
    }
    Ok(value / 100.0)
}

/// Validates a probability argument.
pub fn validate_probability(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        bail!("{name} must lie between 0 and 1, got {value}");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frequency() {
        assert_eq!(parse_frequency(2).unwrap(), Frequency::SemiAnnual);
        assert!(parse_frequency(3).is_err());
    }

    #[test]
    fn test_percent_to_decimal() {
        assert!((percent_to_decimal("coupon", 7.5).unwrap() - 0.075).abs() < 1e-12);
        assert!(percent_to_decimal("coupon", -1.0).is_err());
        assert!(percent_to_decimal("coupon", 150.0).is_err());
    }

    #[test]
    fn test_validate_probability() {
        assert!(validate_probability("tolerance", 0.02).is_ok());
        assert!(validate_probability("tolerance", 1.5).is_err());
    }
}
