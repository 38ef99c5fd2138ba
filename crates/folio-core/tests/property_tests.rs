//! Property-based tests for currency normalization and schema resolution.

use folio_core::prelude::*;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Renders cents as a currency string with thousands separators.
fn currency_string(cents: i64) -> String {
    let negative = cents < 0;
    let abs = cents.unsigned_abs();
    let digits = (abs / 100).to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!(
        "{}${}.{:02}",
        if negative { "-" } else { "" },
        grouped,
        abs % 100
    )
}

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(cents in -1_000_000_000_000i64..1_000_000_000_000i64) {
        let raw = FieldValue::text(currency_string(cents));
        let once = normalize_currency(&raw).unwrap();
        let twice = normalize_currency(&FieldValue::Number(once)).unwrap();
        prop_assert_eq!(once, twice);
        prop_assert_eq!(once, Decimal::new(cents, 2));
    }

    #[test]
    fn prop_plain_decimal_text_roundtrips(cents in any::<i32>()) {
        let value = Decimal::new(i64::from(cents), 2);
        let parsed = normalize_currency(&FieldValue::text(value.to_string())).unwrap();
        prop_assert_eq!(parsed, value);
    }

    #[test]
    fn prop_alphabetic_text_is_rejected(s in "[a-zA-Z]{1,12}") {
        // scientific notation such as "e" alone is still not a number
        let result = normalize_currency(&FieldValue::text(s));
        prop_assert!(result.is_err());
    }

    #[test]
    fn prop_column_order_is_preserved(cols in prop::collection::vec("[A-Za-z]{1,8}", 1..10)) {
        let schema = ResolvedSchema::resolve(&cols);
        let mut expected: Vec<String> = Vec::new();
        for c in &cols {
            if !expected.contains(c) {
                expected.push(c.clone());
            }
        }
        prop_assert_eq!(schema.available(), expected.as_slice());
    }
}

#[test]
fn test_currency_string_helper() {
    assert_eq!(currency_string(150_000), "$1,500.00");
    assert_eq!(currency_string(-5), "-$0.05");
    assert_eq!(currency_string(123_456_789), "$1,234,567.89");
}
