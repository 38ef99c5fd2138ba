//! Holding records as produced by a holdings parser.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::FieldValue;

/// One row of portfolio data, keyed by source column name.
///
/// Column order is preserved so exports keep the layout of the input. The
/// field set is not guaranteed to be uniform across rows. Records are built
/// once and never modified afterwards; [`HoldingRecord::with_field`] consumes
/// the record and returns a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoldingRecord {
    fields: IndexMap<String, FieldValue>,
}

impl HoldingRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this record with `column` set to `value`.
    #[must_use]
    pub fn with_field(mut self, column: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(column.into(), value.into());
        self
    }

    /// Returns the value stored under `column`.
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }

    /// Returns true if the record has a cell for `column` (possibly empty).
    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// Column names in input order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// `(column, value)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no cells.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for HoldingRecord
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
