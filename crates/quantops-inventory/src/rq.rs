//! Steady-state performance of an (r, Q) policy under Poisson demand.
//!
//! The policy orders Q units whenever the inventory position falls to the
//! reorder point r. With Poisson lead-time demand of mean theta, the
//! standard loss-function identities give closed forms for every service
//! measure. Negative reorder points (stock nothing, order on demand) fall
//! back to finite sums over the order cycle, where the closed forms do
//! not apply.

use serde::{Deserialize, Serialize};

use quantops_math::poisson::{first_order_loss, poisson_cdf, poisson_sf, second_order_loss};

use crate::error::{InventoryError, InventoryResult};

/// A continuous-review (r, Q) policy facing Poisson lead-time demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RqPolicy {
    reorder_point: i64,
    order_quantity: i64,
    lead_time_demand: f64,
}

impl RqPolicy {
    /// Creates a policy.
    ///
    /// `order_quantity` must be at least 1 and `lead_time_demand` (theta)
    /// finite and non-negative. The reorder point may be negative.
    pub fn new(
        reorder_point: i64,
        order_quantity: i64,
        lead_time_demand: f64,
    ) -> InventoryResult<Self> {
        if order_quantity < 1 {
            return Err(InventoryError::invalid_policy(format!(
                "order quantity must be at least 1, got {order_quantity}"
            )));
        }
        if !lead_time_demand.is_finite() || lead_time_demand < 0.0 {
            return Err(InventoryError::invalid_input(format!(
                "lead-time demand must be finite and non-negative, got {lead_time_demand}"
            )));
        }
        Ok(Self {
            reorder_point,
            order_quantity,
            lead_time_demand,
        })
    }

    /// Reorder point r.
    #[must_use]
    pub fn reorder_point(&self) -> i64 {
        self.reorder_point
    }

    /// Order quantity Q.
    #[must_use]
    pub fn order_quantity(&self) -> i64 {
        self.order_quantity
    }

    /// Expected demand over the replenishment lead time (theta).
    #[must_use]
    pub fn lead_time_demand(&self) -> f64 {
        self.lead_time_demand
    }

    /// Probability that lead-time demand stays below the reorder point,
    /// i.e. an order cycle passes without a stockout.
    pub fn service_level(&self) -> InventoryResult<f64> {
        let r = self.reorder_point;
        if r < 0 {
            return Ok(0.0);
        }
        let at_most = (r - 1).max(0);
        Ok(poisson_cdf(at_most as f64, self.lead_time_demand)?)
    }

    /// Fraction of demand served directly from stock.
    ///
    /// For non-negative r this is `1 - (G1(r) - G1(r+Q)) / Q` with G1 the
    /// first-order loss function; for negative r the unmet fraction is
    /// averaged position by position over the order cycle.
    pub fn fill_rate(&self) -> InventoryResult<f64> {
        let r = self.reorder_point;
        let q = self.order_quantity;
        let theta = self.lead_time_demand;

        let unmet = if r < 0 {
            let mut total = 0.0;
            for position in (r + 1)..=(r + q) {
                total += poisson_sf((position - 1) as f64, theta)?;
            }
            total / q as f64
        } else {
            (first_order_loss(r as f64, theta)? - first_order_loss((r + q) as f64, theta)?)
                / q as f64
        };

        Ok(1.0 - unmet)
    }

    /// Expected number of backordered units outstanding in steady state.
    pub fn backorder_level(&self) -> InventoryResult<f64> {
        let r = self.reorder_point;
        let q = self.order_quantity;
        let theta = self.lead_time_demand;

        let backorders = if r < 0 {
            let mut total = 0.0;
            for position in (r + 1)..=(r + q) {
                total += first_order_loss(position as f64, theta)?;
            }
            total / q as f64
        } else {
            (second_order_loss(r as f64, theta)? - second_order_loss((r + q) as f64, theta)?)
                / q as f64
        };

        Ok(backorders)
    }

    /// Expected on-hand inventory in steady state.
    ///
    /// `(Q + 1) / 2 + r - theta + B`, the average inventory position
    /// minus expected lead-time demand plus backorders.
    pub fn on_hand_inventory(&self) -> InventoryResult<f64> {
        let backorders = self.backorder_level()?;
        Ok((self.order_quantity + 1) as f64 / 2.0 + self.reorder_point as f64
            - self.lead_time_demand
            + backorders)
    }
}

/// Orders placed per year at the given annual usage and order quantity.
pub fn order_frequency(annual_usage: f64, order_quantity: i64) -> InventoryResult<f64> {
    if order_quantity < 1 {
        return Err(InventoryError::invalid_policy(format!(
            "order quantity must be at least 1, got {order_quantity}"
        )));
    }
    Ok(annual_usage / order_quantity as f64)
}

/// Days between orders at the given annual usage and order quantity.
pub fn order_interval(annual_usage: f64, order_quantity: i64) -> InventoryResult<f64> {
    let frequency = order_frequency(annual_usage, order_quantity)?;
    if frequency <= 0.0 {
        return Err(InventoryError::invalid_input(
            "order interval undefined for zero usage",
        ));
    }
    Ok(365.0 / frequency)
}

/// Fixed order cost implied by an EOQ-optimal order quantity.
///
/// Inverts the EOQ formula: `A = Q^2 c / (2 D)` with unit cost c and
/// annual demand D. Useful for asking what setup cost would rationalize
/// an observed order size.
pub fn implied_order_cost(
    order_quantity: i64,
    unit_cost: f64,
    annual_usage: f64,
) -> InventoryResult<f64> {
    if annual_usage <= 0.0 {
        return Err(InventoryError::invalid_input(
            "implied order cost undefined for zero usage",
        ));
    }
    let q = order_quantity as f64;
    Ok(q * q * unit_cost / (2.0 * annual_usage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_policy_validation() {
        assert!(RqPolicy::new(5, 0, 3.0).is_err());
        assert!(RqPolicy::new(5, 10, -1.0).is_err());
        assert!(RqPolicy::new(-3, 10, 3.0).is_ok());
    }

    #[test]
    fn test_service_level_negative_r_is_zero() {
        let policy = RqPolicy::new(-1, 5, 2.0).unwrap();
        assert_relative_eq!(policy.service_level().unwrap(), 0.0);
    }

    #[test]
    fn test_service_level_zero_r() {
        let theta = 2.0;
        let policy = RqPolicy::new(0, 5, theta).unwrap();
        assert_relative_eq!(
            policy.service_level().unwrap(),
            (-theta).exp(),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_service_level_increases_with_r() {
        let theta = 8.0;
        let mut prev = 0.0;
        for r in 1..25 {
            let policy = RqPolicy::new(r, 10, theta).unwrap();
            let level = policy.service_level().unwrap();
            assert!(level >= prev);
            prev = level;
        }
        assert!(prev > 0.99);
    }

    #[test]
    fn test_fill_rate_bounds() {
        for (r, q, theta) in [(5, 10, 3.0), (0, 4, 2.0), (-2, 6, 1.5), (40, 25, 30.0)] {
            let policy = RqPolicy::new(r, q, theta).unwrap();
            let fill = policy.fill_rate().unwrap();
            assert!(fill <= 1.0 + 1e-12, "fill {fill} for r={r} q={q}");
            assert!(fill >= 0.0 - 1e-12, "fill {fill} for r={r} q={q}");
        }
    }

    #[test]
    fn test_generous_policy_fills_nearly_everything() {
        // Reorder far above mean demand
        let policy = RqPolicy::new(30, 10, 5.0).unwrap();
        assert!(policy.fill_rate().unwrap() > 0.9999);
        assert!(policy.backorder_level().unwrap() < 1e-6);
    }

    #[test]
    fn test_starved_policy_fills_little() {
        // Never holds stock: every demand backorders until its unit arrives
        let policy = RqPolicy::new(-1, 1, 10.0).unwrap();
        let fill = policy.fill_rate().unwrap();
        assert!(fill < 0.05, "fill was {fill}");
    }

    #[test]
    fn test_backorders_shrink_with_r() {
        let theta = 6.0;
        let mut prev = f64::INFINITY;
        for r in 0..20 {
            let policy = RqPolicy::new(r, 8, theta).unwrap();
            let b = policy.backorder_level().unwrap();
            assert!(b <= prev + 1e-12);
            prev = b;
        }
    }

    #[test]
    fn test_on_hand_identity() {
        let policy = RqPolicy::new(12, 20, 9.5).unwrap();
        let b = policy.backorder_level().unwrap();
        let on_hand = policy.on_hand_inventory().unwrap();
        assert_relative_eq!(on_hand, 10.5 + 12.0 - 9.5 + b, epsilon = 1e-12);
    }

    #[test]
    fn test_on_hand_positive_for_stocking_policy() {
        let policy = RqPolicy::new(10, 15, 6.0).unwrap();
        assert!(policy.on_hand_inventory().unwrap() > 0.0);
    }

    #[test]
    fn test_order_cadence() {
        assert_relative_eq!(order_frequency(365.0, 73).unwrap(), 5.0);
        assert_relative_eq!(order_interval(365.0, 73).unwrap(), 73.0);
        assert!(order_interval(0.0, 73).is_err());
    }

    #[test]
    fn test_implied_order_cost() {
        // Q = 100, c = 2, D = 1000: A = 100^2 * 2 / 2000 = 10
        assert_relative_eq!(implied_order_cost(100, 2.0, 1000.0).unwrap(), 10.0);
        assert!(implied_order_cost(100, 2.0, 0.0).is_err());
    }
}
