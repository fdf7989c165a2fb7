//! Payment and compounding frequency.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Payment frequency for coupon-bearing instruments.
///
/// Also used as the compounding convention when converting between
/// periodic and annual rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year) - most common for US bonds
    #[default]
    SemiAnnual,
    /// Quarterly payments (4 per year)
    Quarterly,
    /// Monthly payments (12 per year)
    Monthly,
}

impl Frequency {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// Converts an annual rate to the rate per period.
    #[must_use]
    pub fn periodic_rate(&self, annual_rate: f64) -> f64 {
        annual_rate / f64::from(self.periods_per_year())
    }

    /// Converts a rate per period back to an annual rate.
    ///
    /// This is the nominal (simple multiplication) convention used when
    /// quoting bond yields, not an effective-rate conversion.
    #[must_use]
    pub fn annual_rate(&self, periodic_rate: f64) -> f64 {
        periodic_rate * f64::from(self.periods_per_year())
    }

    /// Parses a periods-per-year count into a frequency.
    pub fn from_periods_per_year(periods: u32) -> CoreResult<Self> {
        match periods {
            1 => Ok(Frequency::Annual),
            2 => Ok(Frequency::SemiAnnual),
            4 => Ok(Frequency::Quarterly),
            12 => Ok(Frequency::Monthly),
            other => Err(CoreError::invalid_input(format!(
                "unsupported periods per year: {other}; use 1, 2, 4, or 12"
            ))),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
        };
        write!(f, "{name}")
    }
}
