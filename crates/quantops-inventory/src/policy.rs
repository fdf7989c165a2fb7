//! Reorder-point and order-up-to policies.
//!
//! A distribution center runs two rules per SKU: when to reorder (the
//! reorder point r) and how high to stock (the order-up-to level, from
//! which the order quantity Q = level - r follows). Both are usually
//! simple tiered functions of annual usage, so they are modeled as traits
//! with the observed rules as implementations.

use serde::{Deserialize, Serialize};

/// Decides the reorder point for a SKU.
pub trait ReorderPolicy {
    /// Reorder point given annual usage and replenishment lead time.
    ///
    /// A negative reorder point means the SKU is ordered only after a
    /// demand arrives (make-to-order behavior).
    fn reorder_point(&self, annual_usage: f64, lead_time_days: f64) -> i64;

    /// Human-readable policy name.
    fn name(&self) -> &'static str;
}

/// Decides the order-up-to level for a SKU.
pub trait OrderUpToPolicy {
    /// Target inventory position after an order arrives.
    fn order_up_to(&self, annual_usage: f64) -> i64;

    /// Human-readable policy name.
    fn name(&self) -> &'static str;
}

/// Usage-tiered reorder rule.
///
/// Slow movers reorder at a fixed fraction of annual usage; fast movers
/// at annual usage divided by a larger factor. Zero-usage SKUs get a
/// reorder point of -1, which disables stocking entirely.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UsageTieredReorder {
    /// Annual usage below which the slow-mover fraction applies.
    pub fast_mover_cutoff: f64,
    /// Fraction of annual usage held as the slow-mover reorder point.
    pub slow_fraction: f64,
    /// Divisor of annual usage for fast movers.
    pub fast_divisor: f64,
}

impl Default for UsageTieredReorder {
    fn default() -> Self {
        // Five months of cover below 50 units a year, four months above
        Self {
            fast_mover_cutoff: 50.0,
            slow_fraction: 5.0 / 12.0,
            fast_divisor: 3.0,
        }
    }
}

impl ReorderPolicy for UsageTieredReorder {
    fn reorder_point(&self, annual_usage: f64, _lead_time_days: f64) -> i64 {
        if annual_usage <= 0.0 {
            return -1;
        }
        let r = if annual_usage < self.fast_mover_cutoff {
            self.slow_fraction * annual_usage
        } else {
            annual_usage / self.fast_divisor
        };
        r.floor() as i64
    }

    fn name(&self) -> &'static str {
        "usage-tiered reorder"
    }
}

/// Lead-time-cover reorder rule.
///
/// Sets the reorder point to cover expected demand over the lead time
/// plus a review pad, scaled by a safety factor:
/// `floor(factor * usage * (lead + pad) / 365)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LeadTimeCoverReorder {
    /// Multiplier on expected lead-time demand.
    pub safety_factor: f64,
    /// Days added to the quoted lead time for order processing.
    pub review_pad_days: f64,
}

impl Default for LeadTimeCoverReorder {
    fn default() -> Self {
        Self {
            safety_factor: 1.4,
            review_pad_days: 10.0,
        }
    }
}

impl ReorderPolicy for LeadTimeCoverReorder {
    fn reorder_point(&self, annual_usage: f64, lead_time_days: f64) -> i64 {
        if annual_usage <= 0.0 {
            return -1;
        }
        let cover = self.safety_factor * annual_usage * (lead_time_days + self.review_pad_days)
            / 365.0;
        cover.floor() as i64
    }

    fn name(&self) -> &'static str {
        "lead-time cover reorder"
    }
}

/// Usage-tiered order-up-to rule.
///
/// Stocks a full year of usage for the slowest movers, two thirds for
/// mid-velocity SKUs, half for fast movers. Levels round up.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UsageTieredOrderUpTo {
    /// Annual usage at or below which a full year is stocked.
    pub slow_cutoff: f64,
    /// Annual usage below which the mid-tier fraction applies.
    pub fast_cutoff: f64,
    /// Fraction of annual usage stocked in the middle tier.
    pub mid_fraction: f64,
    /// Fraction of annual usage stocked in the fast tier.
    pub fast_fraction: f64,
}

impl Default for UsageTieredOrderUpTo {
    fn default() -> Self {
        Self {
            slow_cutoff: 5.0,
            fast_cutoff: 50.0,
            mid_fraction: 2.0 / 3.0,
            fast_fraction: 0.5,
        }
    }
}

impl OrderUpToPolicy for UsageTieredOrderUpTo {
    fn order_up_to(&self, annual_usage: f64) -> i64 {
        if annual_usage <= 0.0 {
            return 0;
        }
        let level = if annual_usage <= self.slow_cutoff {
            annual_usage
        } else if annual_usage < self.fast_cutoff {
            self.mid_fraction * annual_usage
        } else {
            self.fast_fraction * annual_usage
        };
        level.ceil() as i64
    }

    fn name(&self) -> &'static str {
        "usage-tiered order-up-to"
    }
}
