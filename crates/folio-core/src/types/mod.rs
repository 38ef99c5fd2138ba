//! Domain types for holdings data.
//!
//! - [`FieldValue`]: a raw cell, text or already-typed number
//! - [`HoldingRecord`]: one parsed row keyed by source column
//! - [`CanonicalField`]: the fixed `Name`/`Symbol`/`Shares`/`Value` schema
//! - [`CanonicalHolding`]: a row viewed through the resolved schema

mod canonical;
mod record;
mod value;

pub use canonical::{CanonicalField, CanonicalHolding};
pub use record::HoldingRecord;
pub use value::FieldValue;
