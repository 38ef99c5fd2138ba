//! Currency string normalization.
//!
//! Values arrive either already numeric or as display strings such as
//! `"$1,500.00"`. Normalization strips the known formatting characters and
//! parses what remains. It is deterministic and idempotent: a value that is
//! already numeric passes through unchanged.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{FolioError, FolioResult};
use crate::types::FieldValue;

/// Characters removed before parsing.
pub const FORMATTING_CHARS: [char; 2] = ['$', ','];

/// Parses a currency-formatted string into a decimal.
///
/// Accepts plain decimals (`"1500.00"`, `"-3"`) and scientific notation
/// (`"1.5e3"`) once `$` and `,` are removed.
///
/// # Errors
///
/// Returns [`FolioError::Numeric`] when nothing numeric remains.
pub fn parse_currency(text: &str) -> FolioResult<Decimal> {
    let cleaned: String = text
        .chars()
        .filter(|c| !FORMATTING_CHARS.contains(c))
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return Err(FolioError::numeric(text, "missing value"));
    }

    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .map_err(|_| FolioError::numeric(text, "not a number"))
}

/// Normalizes a single field to a decimal.
pub fn normalize_currency(value: &FieldValue) -> FolioResult<Decimal> {
    match value {
        FieldValue::Number(n) => Ok(*n),
        FieldValue::Text(s) => parse_currency(s),
        FieldValue::Empty => Err(FolioError::numeric("", "missing value")),
    }
}

/// Normalizes a column of values, failing on the first bad row.
///
/// The error carries the zero-based index of the offending row.
pub fn normalize_column(values: &[FieldValue]) -> FolioResult<Vec<Decimal>> {
    values
        .iter()
        .enumerate()
        .map(|(row, v)| normalize_currency(v).map_err(|e| e.at_row(row)))
        .collect()
}
