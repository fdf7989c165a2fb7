//! SKU datasets and batch policy evaluation.
//!
//! A SKU file is a CSV with one row per stocked item: annual usage, unit
//! cost, and replenishment lead time. [`evaluate_policies`] runs a reorder
//! rule and an order-up-to rule over every row and derives the full
//! steady-state performance picture for each.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{InventoryError, InventoryResult};
use crate::policy::{OrderUpToPolicy, ReorderPolicy};
use crate::rq::{implied_order_cost, order_frequency, order_interval, RqPolicy};

/// One row of a SKU file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkuRecord {
    /// SKU identifier.
    #[serde(rename = "SKU", default)]
    pub sku: String,
    /// Units consumed per year.
    #[serde(rename = "Total Usage")]
    pub total_usage: f64,
    /// Cost per unit.
    #[serde(rename = "Unit Cost")]
    pub unit_cost: f64,
    /// Replenishment lead time in days.
    #[serde(rename = "Lead Time (days)")]
    pub lead_time_days: f64,
}

/// Steady-state performance of one SKU under a policy pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkuPerformance {
    /// SKU identifier.
    pub sku: String,
    /// Units consumed per day.
    pub daily_demand: f64,
    /// Expected demand over the lead time (theta).
    pub lead_time_demand: f64,
    /// Reorder point chosen by the policy.
    pub reorder_point: i64,
    /// Order-up-to level chosen by the policy.
    pub order_up_to: i64,
    /// Order quantity (order-up-to minus reorder point).
    pub order_quantity: i64,
    /// Orders per year; zero for dead stock.
    pub order_frequency: f64,
    /// Days between orders; absent for dead stock.
    pub order_interval_days: Option<f64>,
    /// Probability a cycle passes without stockout.
    pub service_level: f64,
    /// Fraction of demand served from stock.
    pub fill_rate: f64,
    /// Expected backordered units outstanding.
    pub backorder_level: f64,
    /// Expected on-hand units.
    pub on_hand_inventory: f64,
    /// Fixed order cost that would make the order size EOQ-optimal.
    pub implied_order_cost: Option<f64>,
}

/// Loads SKU records from a CSV file.
pub fn load_skus(path: impl AsRef<Path>) -> InventoryResult<Vec<SkuRecord>> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let mut reader = csv::Reader::from_path(path)
        .map_err(|err| InventoryError::dataset(&display, err.to_string()))?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: SkuRecord =
            row.map_err(|err| InventoryError::dataset(&display, err.to_string()))?;
        records.push(record);
    }

    log::debug!("loaded {} SKU records from {display}", records.len());
    Ok(records)
}

/// Evaluates a policy pair over a SKU dataset.
///
/// Rows whose derived order quantity is not positive (order-up-to at or
/// below the reorder point) cannot form an (r, Q) policy and are skipped
/// with a warning.
pub fn evaluate_policies(
    records: &[SkuRecord],
    reorder: &dyn ReorderPolicy,
    order_up_to: &dyn OrderUpToPolicy,
) -> InventoryResult<Vec<SkuPerformance>> {
    let mut results = Vec::with_capacity(records.len());

    for record in records {
        let daily_demand = record.total_usage / 365.0;
        let theta = daily_demand * record.lead_time_days;

        let r = reorder.reorder_point(record.total_usage, record.lead_time_days);
        let level = order_up_to.order_up_to(record.total_usage);
        let q = level - r;

        if q < 1 {
            log::warn!(
                "skipping SKU {}: order-up-to {level} at or below reorder point {r}",
                record.sku
            );
            continue;
        }

        let policy = RqPolicy::new(r, q, theta)?;
        let backorders = policy.backorder_level()?;

        let (frequency, interval, order_cost) = if record.total_usage > 0.0 {
            (
                order_frequency(record.total_usage, q)?,
                Some(order_interval(record.total_usage, q)?),
                Some(implied_order_cost(q, record.unit_cost, record.total_usage)?),
            )
        } else {
            (0.0, None, None)
        };

        results.push(SkuPerformance {
            sku: record.sku.clone(),
            daily_demand,
            lead_time_demand: theta,
            reorder_point: r,
            order_up_to: level,
            order_quantity: q,
            order_frequency: frequency,
            order_interval_days: interval,
            service_level: policy.service_level()?,
            fill_rate: policy.fill_rate()?,
            backorder_level: backorders,
            on_hand_inventory: policy.on_hand_inventory()?,
            implied_order_cost: order_cost,
        });
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{UsageTieredOrderUpTo, UsageTieredReorder};
    use approx::assert_relative_eq;

    fn record(sku: &str, usage: f64, cost: f64, lead: f64) -> SkuRecord {
        SkuRecord {
            sku: sku.to_string(),
            total_usage: usage,
            unit_cost: cost,
            lead_time_days: lead,
        }
    }

    #[test]
    fn test_evaluate_policies_basic() {
        let records = vec![
            record("A-100", 365.0, 12.0, 10.0),
            record("A-200", 24.0, 3.5, 30.0),
        ];

        let results = evaluate_policies(
            &records,
            &UsageTieredReorder::default(),
            &UsageTieredOrderUpTo::default(),
        )
        .unwrap();

        assert_eq!(results.len(), 2);

        let fast = &results[0];
        // 365 a year: r = floor(365/3) = 121, level = ceil(365/2) = 183
        assert_eq!(fast.reorder_point, 121);
        assert_eq!(fast.order_up_to, 183);
        assert_eq!(fast.order_quantity, 62);
        assert_relative_eq!(fast.daily_demand, 1.0, epsilon = 1e-12);
        assert_relative_eq!(fast.lead_time_demand, 10.0, epsilon = 1e-12);
        // Reorder point far above 10 units of lead-time demand
        assert!(fast.fill_rate > 0.9999);
        assert!(fast.service_level > 0.9999);
    }

    #[test]
    fn test_dead_stock_has_no_cadence() {
        let records = vec![record("Z-000", 0.0, 5.0, 15.0)];

        let results = evaluate_policies(
            &records,
            &UsageTieredReorder::default(),
            &UsageTieredOrderUpTo::default(),
        )
        .unwrap();

        assert_eq!(results.len(), 1);
        let dead = &results[0];
        assert_eq!(dead.reorder_point, -1);
        assert_eq!(dead.order_quantity, 1);
        assert_relative_eq!(dead.order_frequency, 0.0);
        assert!(dead.order_interval_days.is_none());
        assert!(dead.implied_order_cost.is_none());
    }

    #[test]
    fn test_order_cadence_columns() {
        let records = vec![record("B-300", 730.0, 2.0, 5.0)];

        let results = evaluate_policies(
            &records,
            &UsageTieredReorder::default(),
            &UsageTieredOrderUpTo::default(),
        )
        .unwrap();

        let row = &results[0];
        // r = floor(730/3) = 243, level = ceil(365) = 365, Q = 122
        assert_eq!(row.order_quantity, 122);
        assert_relative_eq!(row.order_frequency, 730.0 / 122.0, epsilon = 1e-12);
        assert_relative_eq!(
            row.order_interval_days.unwrap(),
            365.0 / (730.0 / 122.0),
            epsilon = 1e-12
        );
        // A = Q^2 c / (2 D)
        assert_relative_eq!(
            row.implied_order_cost.unwrap(),
            122.0 * 122.0 * 2.0 / (2.0 * 730.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_load_skus_missing_file() {
        assert!(load_skus("/nonexistent/skus.csv").is_err());
    }
}
