//! Schema resolution.
//!
//! Parsed holdings tables come in several shapes: some name the ticker column
//! `Ticker`, others `Symbol`, and not every variant carries `Shares`. The
//! resolver runs once, up front, and maps each [`CanonicalField`] to the source
//! column that supplies it. Everything downstream reads [`CanonicalHolding`]s.

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, FolioResult};
use crate::types::{CanonicalField, CanonicalHolding, FieldValue, HoldingRecord};

/// Mapping from canonical fields to source columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSchema {
    name: Option<String>,
    symbol: Option<String>,
    shares: Option<String>,
    value: Option<String>,
    available: Vec<String>,
}

impl ResolvedSchema {
    /// Resolves canonical fields against a set of column names.
    ///
    /// Column names are matched after trimming surrounding whitespace; the
    /// stored mapping keeps the original spelling so records can be indexed
    /// with it. For `Symbol`, a `Ticker` column wins over a `Symbol` column.
    pub fn resolve<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut available: Vec<String> = Vec::new();
        for col in columns {
            let col = col.as_ref();
            if !available.iter().any(|c| c == col) {
                available.push(col.to_string());
            }
        }

        let find = |field: CanonicalField| -> Option<String> {
            field.aliases().iter().find_map(|alias| {
                available
                    .iter()
                    .find(|c| c.trim() == *alias)
                    .cloned()
            })
        };

        Self {
            name: find(CanonicalField::Name),
            symbol: find(CanonicalField::Symbol),
            shares: find(CanonicalField::Shares),
            value: find(CanonicalField::Value),
            available,
        }
    }

    /// Resolves against the union of columns across `records`, in first-seen order.
    pub fn from_records(records: &[HoldingRecord]) -> Self {
        Self::resolve(records.iter().flat_map(HoldingRecord::columns))
    }

    /// Source column for `field`, if resolved.
    pub fn column(&self, field: CanonicalField) -> Option<&str> {
        match field {
            CanonicalField::Name => self.name.as_deref(),
            CanonicalField::Symbol => self.symbol.as_deref(),
            CanonicalField::Shares => self.shares.as_deref(),
            CanonicalField::Value => self.value.as_deref(),
        }
    }

    /// Returns true if `field` maps to a source column.
    pub fn is_resolved(&self, field: CanonicalField) -> bool {
        self.column(field).is_some()
    }

    /// All columns present in the input, in first-seen order.
    pub fn available(&self) -> &[String] {
        &self.available
    }

    /// Canonical fields without a source column.
    pub fn missing(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .into_iter()
            .filter(|f| !self.is_resolved(*f))
            .collect()
    }

    /// Checks that every field in `required` resolves.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Schema`] naming the unresolved fields and the
    /// available columns.
    pub fn check(&self, required: &[CanonicalField]) -> FolioResult<()> {
        let missing: Vec<CanonicalField> = required
            .iter()
            .copied()
            .filter(|f| !self.is_resolved(*f))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(FolioError::schema(missing, self.available.clone()))
        }
    }

    /// Column order for presentation.
    ///
    /// Input order is kept, except that the `Name` column is moved directly in
    /// front of the symbol column when it would otherwise follow it.
    pub fn presentation_order(&self) -> Vec<String> {
        let mut cols = self.available.clone();
        if let (Some(name), Some(symbol)) = (&self.name, &self.symbol) {
            let name_idx = cols.iter().position(|c| c == name);
            let symbol_idx = cols.iter().position(|c| c == symbol);
            if let (Some(n), Some(s)) = (name_idx, symbol_idx) {
                if s < n {
                    let col = cols.remove(n);
                    cols.insert(s, col);
                }
            }
        }
        cols
    }

    /// Views each record through this schema.
    pub fn canonicalize(&self, records: &[HoldingRecord]) -> Vec<CanonicalHolding> {
        records
            .iter()
            .enumerate()
            .map(|(position, record)| {
                let cell = |field: CanonicalField| -> Option<&FieldValue> {
                    self.column(field).and_then(|col| record.get(col))
                };
                let present = |v: &FieldValue| (!v.is_empty()).then(|| v.clone());

                CanonicalHolding {
                    position,
                    name: cell(CanonicalField::Name).and_then(FieldValue::display_value),
                    symbol: cell(CanonicalField::Symbol).and_then(FieldValue::display_value),
                    shares: cell(CanonicalField::Shares).and_then(present),
                    value: cell(CanonicalField::Value).cloned(),
                    record: record.clone(),
                }
            })
            .collect()
    }
}
