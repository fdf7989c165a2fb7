//! # QuantOps Portfolio
//!
//! Mean-variance portfolio analytics.
//!
//! The crate turns a price history into windowed return series, sample
//! moments, and the classic Markowitz outputs: minimum-variance and
//! maximum-Sharpe portfolios, the efficient frontier, and random
//! long-only portfolios for Monte Carlo scatter studies.
//!
//! All optimizations run long-only and fully invested: weights live on
//! the unit simplex.
//!
//! ## Example
//!
//! ```rust
//! use nalgebra::{DMatrix, DVector};
//! use quantops_portfolio::frontier::{min_variance_portfolio, FrontierConfig};
//!
//! let means = DVector::from_vec(vec![0.001, 0.002]);
//! let cov = DMatrix::from_row_slice(2, 2, &[0.0004, 0.0, 0.0, 0.0004]);
//!
//! let mv = min_variance_portfolio(&means, &cov, &FrontierConfig::default()).unwrap();
//! // Uncorrelated assets with equal variance split evenly
//! assert!((mv.weights[0] - 0.5).abs() < 1e-2);
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
#![allow(clippy::similar_names)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod frontier;
pub mod returns;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::frontier::{
        efficient_frontier, max_sharpe_portfolio, min_variance_portfolio, performance,
        random_portfolios, FrontierConfig, FrontierPoint, PortfolioCandidate,
    };
    pub use crate::returns::{load_price_history, PriceHistory, ReturnSeries};
}

pub use error::{PortfolioError, PortfolioResult};
