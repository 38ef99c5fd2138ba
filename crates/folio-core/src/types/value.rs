//! Raw field values as produced by a holdings parser.

use std::fmt;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single cell of a holdings table.
///
/// Parsers hand back either text (`"$1,500.00"`, `"AAPL"`) or numbers that
/// were already typed in the source. Missing cells are [`FieldValue::Empty`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    /// Text exactly as it appeared in the source.
    Text(String),
    /// A number that arrived already typed.
    Number(Decimal),
    /// No value.
    #[default]
    Empty,
}

impl FieldValue {
    /// Creates a text value.
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    /// Returns true for [`FieldValue::Empty`] and for whitespace-only text.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(_) => false,
        }
    }

    /// Returns the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number, if this value arrived already typed.
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns a trimmed display string, or `None` when the value is empty.
    pub fn display_value(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.to_string().trim().to_string())
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<Decimal> for FieldValue {
    fn from(n: Decimal) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(Decimal::from(n))
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Empty, Into::into)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Number(n) => Serialize::serialize(n, serializer),
            FieldValue::Empty => serializer.serialize_none(),
        }
    }
}

struct FieldValueVisitor;

impl<'de> Visitor<'de> for FieldValueVisitor {
    type Value = FieldValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, a number or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<FieldValue, E> {
        Ok(FieldValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<FieldValue, E> {
        Ok(FieldValue::Text(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<FieldValue, E> {
        Ok(FieldValue::Number(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<FieldValue, E> {
        Ok(FieldValue::Number(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<FieldValue, E> {
        Decimal::from_f64(v)
            .map(FieldValue::Number)
            .ok_or_else(|| E::custom(format!("number {} is not representable", v)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<FieldValue, E> {
        Ok(FieldValue::Empty)
    }

    fn visit_none<E: de::Error>(self) -> Result<FieldValue, E> {
        Ok(FieldValue::Empty)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<FieldValue, D::Error> {
        deserializer.deserialize_any(FieldValueVisitor)
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FieldValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_is_empty() {
        assert!(FieldValue::Empty.is_empty());
        assert!(FieldValue::text("   ").is_empty());
        assert!(!FieldValue::text("AAPL").is_empty());
        assert!(!FieldValue::Number(dec!(0)).is_empty());
    }

    #[test]
    fn test_display_keeps_raw_text() {
        assert_eq!(FieldValue::text("$1,500.00").to_string(), "$1,500.00");
        assert_eq!(FieldValue::Number(dec!(10)).to_string(), "10");
        assert_eq!(FieldValue::Empty.to_string(), "");
    }

    #[test]
    fn test_deserialize_keeps_numeric_looking_text() {
        let values: Vec<FieldValue> =
            serde_json::from_str(r#"["00123", 10, 2.5, null, "$1,500.00"]"#).unwrap();
        assert_eq!(values[0], FieldValue::text("00123"));
        assert_eq!(values[1], FieldValue::Number(dec!(10)));
        assert_eq!(values[2], FieldValue::Number(dec!(2.5)));
        assert_eq!(values[3], FieldValue::Empty);
        assert_eq!(values[4], FieldValue::text("$1,500.00"));
    }

    #[test]
    fn test_serialize_roundtrip_shape() {
        let json = serde_json::to_string(&vec![
            FieldValue::text("AAPL"),
            FieldValue::Number(dec!(1500.25)),
            FieldValue::Empty,
        ])
        .unwrap();
        assert_eq!(json, r#"["AAPL",1500.25,null]"#);
    }
}
