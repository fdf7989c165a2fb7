//! # QuantOps Bonds
//!
//! Level-coupon bond pricing and yield analytics.
//!
//! The [`Bond`] type describes a plain coupon bond by par amount, annual
//! coupon rate, years to maturity, and payment frequency. Conversions
//! between price, yield to maturity, current yield, and coupon rate cover
//! the quotes a desk actually encounters: any one of them can be derived
//! from the others.
//!
//! ## Example
//!
//! ```rust
//! use quantops_bonds::Bond;
//! use rust_decimal_macros::dec;
//!
//! let bond = Bond::builder()
//!     .par(dec!(1000))
//!     .coupon_rate(0.05)
//!     .maturity_years(10.0)
//!     .build()
//!     .unwrap();
//!
//! // Par bond: price at the coupon rate is par
//! let price = bond.price_from_yield(0.05);
//! assert!((price - 1000.0).abs() < 1e-8);
//!
//! // And solving the yield back recovers the coupon rate
//! let ytm = bond.yield_to_maturity(1000.0).unwrap();
//! assert!((ytm.yield_value - 0.05).abs() < 1e-8);
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
#![allow(clippy::uninlined_format_args)]

pub mod bond;
pub mod error;
pub mod tvm;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bond::{Bond, BondBuilder, YieldSolution};
    pub use crate::error::{BondError, BondResult};
    pub use crate::tvm::{periodic_rate, present_value};
}

pub use bond::{Bond, BondBuilder, YieldSolution};
pub use error::{BondError, BondResult};
