//! # QuantOps Core
//!
//! Core types and abstractions for the QuantOps analytics library.
//!
//! This crate provides the foundational building blocks shared by the
//! analysis crates:
//!
//! - **Types**: `Frequency` for coupon and compounding conventions,
//!   `Periodicity` for return-series windowing and annualization
//! - **Errors**: the common [`CoreError`] enum
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: conventions are enums, not bare integers
//! - **Explicit Over Implicit**: annualization factors are derived from a
//!   named periodicity rather than scattered magic numbers
//!
//! ## Example
//!
//! ```rust
//! use quantops_core::types::{Frequency, Periodicity};
//!
//! let freq = Frequency::SemiAnnual;
//! assert_eq!(freq.periods_per_year(), 2);
//!
//! let monthly = Periodicity::trading_days(20);
//! assert!((monthly.periods_per_year() - 12.6).abs() < 1e-12);
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
#![allow(clippy::cast_lossless)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Frequency, Periodicity};
}

pub use error::{CoreError, CoreResult};
