//! Observation periodicity for return series.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of trading days in a calendar year.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Sampling periodicity of a return series.
///
/// Return observations are taken every `window` trading days. The
/// periodicity supplies the annualization factors used when scaling
/// per-period means and volatilities to annual figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Periodicity {
    /// Trading days between consecutive observations.
    window: u32,
}

impl Periodicity {
    /// Daily observations.
    pub const DAILY: Periodicity = Periodicity { window: 1 };

    /// Weekly observations (5 trading days).
    pub const WEEKLY: Periodicity = Periodicity { window: 5 };

    /// Monthly observations (21 trading days).
    pub const MONTHLY: Periodicity = Periodicity { window: 21 };

    /// Creates a periodicity with the given observation window in
    /// trading days. A window of zero is clamped to one.
    #[must_use]
    pub fn trading_days(window: u32) -> Self {
        Self {
            window: window.max(1),
        }
    }

    /// Returns the observation window in trading days.
    #[must_use]
    pub fn window(&self) -> u32 {
        self.window
    }

    /// Observations per year at this periodicity.
    #[must_use]
    pub fn periods_per_year(&self) -> f64 {
        TRADING_DAYS_PER_YEAR / f64::from(self.window)
    }

    /// Scales a per-period mean return to an annual return.
    #[must_use]
    pub fn annualize_return(&self, per_period: f64) -> f64 {
        per_period * self.periods_per_year()
    }

    /// Scales a per-period volatility to an annual volatility.
    #[must_use]
    pub fn annualize_volatility(&self, per_period: f64) -> f64 {
        per_period * self.periods_per_year().sqrt()
    }

    /// Scales an annual return down to this periodicity.
    #[must_use]
    pub fn deannualize_return(&self, annual: f64) -> f64 {
        annual / self.periods_per_year()
    }
}

impl Default for Periodicity {
    fn default() -> Self {
        Self::DAILY
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.window {
            1 => write!(f, "daily"),
            5 => write!(f, "weekly"),
            21 => write!(f, "monthly"),
            n => write!(f, "every {n} trading days"),
        }
    }
}
