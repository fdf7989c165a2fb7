//! # QuantOps Inventory
//!
//! Continuous-review inventory analytics.
//!
//! Two complementary views of a replenishment system live here:
//!
//! - **Steady state**: [`rq::RqPolicy`] evaluates an (r, Q) policy under
//!   Poisson lead-time demand through the loss-function identities:
//!   service level, fill rate, expected backorders, expected on-hand
//!   inventory.
//! - **Simulated**: [`replenishment`] replays a sell-one-order-one
//!   pipeline week by week under normally distributed demand and reports
//!   empirical stockout probability and pipeline volume.
//!
//! [`policy`] holds the reorder-point and order-up-to rules a distribution
//! center actually runs, and [`dataset`] evaluates them over a SKU file.
//!
//! ## Example
//!
//! ```rust
//! use quantops_inventory::rq::RqPolicy;
//!
//! // Reorder at 12, order 20 at a time, 9.5 units of lead-time demand
//! let policy = RqPolicy::new(12, 20, 9.5).unwrap();
//!
//! let fill = policy.fill_rate().unwrap();
//! assert!(fill > 0.95 && fill <= 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::uninlined_format_args)]

pub mod dataset;
pub mod error;
pub mod policy;
pub mod replenishment;
pub mod rq;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::dataset::{evaluate_policies, load_skus, SkuPerformance, SkuRecord};
    pub use crate::error::{InventoryError, InventoryResult};
    pub use crate::policy::{
        LeadTimeCoverReorder, OrderUpToPolicy, ReorderPolicy, UsageTieredOrderUpTo,
        UsageTieredReorder,
    };
    pub use crate::replenishment::{
        run_replenishment, ReplenishmentConfig, ReplenishmentReport,
    };
    pub use crate::rq::{implied_order_cost, order_frequency, order_interval, RqPolicy};
}

pub use error::{InventoryError, InventoryResult};
