//! # Folio Core
//!
//! Core types and pure transformations for the Folio holdings pipeline.
//!
//! This crate provides the foundational building blocks used throughout Folio:
//!
//! - **Types**: [`FieldValue`], [`HoldingRecord`], [`CanonicalField`], [`CanonicalHolding`]
//! - **Currency Normalization**: `"$1,500.00"` style strings to [`Decimal`](rust_decimal::Decimal)
//! - **Schema Resolution**: variable input column names onto the canonical holding schema
//! - **Traits**: the text extractor and holdings parser collaborators
//!
//! ## Example
//!
//! ```rust
//! use folio_core::prelude::*;
//!
//! let record = HoldingRecord::new()
//!     .with_field("Name", "Apple Inc")
//!     .with_field("Ticker", "AAPL")
//!     .with_field("Value", "$1,500.00");
//!
//! let schema = ResolvedSchema::from_records(std::slice::from_ref(&record));
//! assert_eq!(schema.column(CanonicalField::Symbol), Some("Ticker"));
//!
//! let value = normalize_currency(record.get("Value").unwrap()).unwrap();
//! assert_eq!(value.to_string(), "1500.00");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod currency;
pub mod error;
pub mod schema;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::currency::{normalize_column, normalize_currency, parse_currency};
    pub use crate::error::{ErrorKind, FolioError, FolioResult, StatisticsIssue};
    pub use crate::schema::ResolvedSchema;
    pub use crate::traits::{HoldingsParser, TextExtractor};
    pub use crate::types::{CanonicalField, CanonicalHolding, FieldValue, HoldingRecord};
}

// Re-export commonly used types at crate root
pub use error::{ErrorKind, FolioError, FolioResult, StatisticsIssue};
pub use schema::ResolvedSchema;
pub use types::{CanonicalField, CanonicalHolding, FieldValue, HoldingRecord};
