//! # Folio Portfolio
//!
//! Portfolio-level statistics for brokerage holdings.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: every stage returns a new structure; inputs are never mutated
//! - **Exact money**: values are [`Decimal`](rust_decimal::Decimal), so totals are exact sums
//! - **All or nothing**: a single bad value aborts normalization; partial statistics are never returned
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use folio_portfolio::prelude::*;
//!
//! let schema = ResolvedSchema::from_records(&records);
//! let holdings = normalize_holdings(&schema.canonicalize(&records), &schema)?;
//! let stats = PortfolioStatistics::calculate(&holdings)?;
//!
//! println!("Total: {}", stats.total_value);
//! for h in &stats.top_holdings {
//!     println!("{} {:.2}%", h.display_symbol(), h.pct_of_total);
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod holding;
pub mod statistics;

pub use holding::{normalize_holdings, NormalizedHolding};
pub use statistics::{OtherHoldings, PortfolioStatistics, RankedHolding, DEFAULT_TOP_HOLDINGS};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::holding::{normalize_holdings, NormalizedHolding};
    pub use crate::statistics::{
        OtherHoldings, PortfolioStatistics, RankedHolding, DEFAULT_TOP_HOLDINGS,
    };

    pub use folio_core::prelude::*;
    pub use rust_decimal::Decimal;
}
