//! Canonical holding schema.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{FieldValue, HoldingRecord};

/// A field of the canonical holding schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CanonicalField {
    /// Security name.
    Name,
    /// Ticker symbol.
    Symbol,
    /// Share count.
    Shares,
    /// Market value.
    Value,
}

impl CanonicalField {
    /// All canonical fields in presentation order.
    pub const ALL: [CanonicalField; 4] = [
        CanonicalField::Name,
        CanonicalField::Symbol,
        CanonicalField::Shares,
        CanonicalField::Value,
    ];

    /// The canonical column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Name => "Name",
            CanonicalField::Symbol => "Symbol",
            CanonicalField::Shares => "Shares",
            CanonicalField::Value => "Value",
        }
    }

    /// Source column names accepted for this field, most preferred first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            CanonicalField::Name => &["Name"],
            CanonicalField::Symbol => &["Ticker", "Symbol"],
            CanonicalField::Shares => &["Shares"],
            CanonicalField::Value => &["Value"],
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A holding viewed through the resolved canonical schema.
///
/// Built by [`ResolvedSchema::canonicalize`](crate::ResolvedSchema::canonicalize);
/// downstream stages read these fields instead of probing column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalHolding {
    /// Zero-based position in the input. Used as the tie-break for stable ranking.
    pub position: usize,
    /// Security name, if present and non-empty.
    pub name: Option<String>,
    /// Ticker symbol, if present and non-empty.
    pub symbol: Option<String>,
    /// Share count as it appeared in the input.
    pub shares: Option<FieldValue>,
    /// Raw market value, `None` when the record has no value cell.
    pub value: Option<FieldValue>,
    /// The source record, for pass-through columns.
    pub record: HoldingRecord,
}

impl CanonicalHolding {
    /// Name for display, `N/A` when missing.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("N/A")
    }

    /// Symbol for display, `N/A` when missing.
    pub fn display_symbol(&self) -> &str {
        self.symbol.as_deref().unwrap_or("N/A")
    }
}
