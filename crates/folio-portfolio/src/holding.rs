//! Normalized holdings.

use folio_core::currency::normalize_currency;
use folio_core::{
    CanonicalField, CanonicalHolding, FieldValue, FolioError, FolioResult, ResolvedSchema,
    StatisticsIssue,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A canonical holding whose value has been coerced to a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedHolding {
    /// The resolved holding.
    pub holding: CanonicalHolding,
    /// Market value as a number.
    pub value_numeric: Decimal,
}

impl NormalizedHolding {
    /// Zero-based input position.
    pub fn position(&self) -> usize {
        self.holding.position
    }

    /// Security name, if present.
    pub fn name(&self) -> Option<&str> {
        self.holding.name.as_deref()
    }

    /// Ticker symbol, if present.
    pub fn symbol(&self) -> Option<&str> {
        self.holding.symbol.as_deref()
    }

    /// Share count as given in the input, if present.
    pub fn shares(&self) -> Option<&FieldValue> {
        self.holding.shares.as_ref()
    }
}

/// Normalizes the value of every holding.
///
/// Produces new [`NormalizedHolding`]s; the input is left untouched. Either
/// every holding normalizes or none is returned.
///
/// # Errors
///
/// - [`FolioError::Statistics`] with [`StatisticsIssue::MissingValueColumn`]
///   when no column resolves to `Value`
/// - [`FolioError::Numeric`] for the first holding whose value is missing or
///   not numeric, tagged with its row
pub fn normalize_holdings(
    holdings: &[CanonicalHolding],
    schema: &ResolvedSchema,
) -> FolioResult<Vec<NormalizedHolding>> {
    if !schema.is_resolved(CanonicalField::Value) {
        return Err(FolioError::statistics(StatisticsIssue::MissingValueColumn));
    }

    holdings
        .iter()
        .map(|h| {
            let raw = h.value.as_ref().unwrap_or(&FieldValue::Empty);
            let value_numeric = normalize_currency(raw).map_err(|e| e.at_row(h.position))?;
            Ok(NormalizedHolding {
                holding: h.clone(),
                value_numeric,
            })
        })
        .collect()
}
