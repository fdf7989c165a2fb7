//! # QuantOps Projection
//!
//! Monthly financial-statement projection.
//!
//! Given an opening balance sheet, a sales plan, and a handful of
//! operating assumptions, the engine rolls a linked income statement and
//! balance sheet forward month by month. Working capital follows sales
//! (receivables by a collection lag, payables as a fraction of sales,
//! inventory from the production schedule), taxes accrue and settle on a
//! calendar, and a notes-payable revolver plugs the balance sheet while
//! holding cash at the agreed minimum.
//!
//! The accounting identity (assets equal liabilities plus equity) holds
//! for every projected month by construction, and the engine checks it.
//!
//! ## Example
//!
//! ```rust,ignore
//! use quantops_projection::prelude::*;
//!
//! let scenario = load_scenario("seasonal-plan.toml")?;
//! let months = project(&scenario.into_input())?;
//! for month in &months {
//!     println!("{:>2}: cash {}", month.month_index, month.balance.cash);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::uninlined_format_args)]

pub mod assumptions;
pub mod engine;
pub mod error;
pub mod scenario;
pub mod statement;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::assumptions::{Assumptions, ScheduledPayment, TaxSettlement};
    pub use crate::engine::{project, MonthPlan, ProjectionInput};
    pub use crate::error::{ProjectionError, ProjectionResult};
    pub use crate::scenario::{load_scenario, Scenario};
    pub use crate::statement::{BalanceSheet, IncomeStatement, MonthStatement};
}

pub use error::{ProjectionError, ProjectionResult};
