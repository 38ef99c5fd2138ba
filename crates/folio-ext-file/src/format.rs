//! Money and percentage formatting for text artifacts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to two decimal places, half away from zero, keeping trailing zeros.
fn cents(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Formats an amount with thousands separators and two decimals.
///
/// ```
/// use folio_ext_file::format::format_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_amount(dec!(1234567.891)), "1,234,567.89");
/// assert_eq!(format_amount(dec!(-0.004)), "0.00");
/// ```
pub fn format_amount(amount: Decimal) -> String {
    let rounded = cents(amount);
    let digits = add_thousands_separator(&rounded.abs().to_string());
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}", digits)
    } else {
        digits
    }
}

/// Formats an amount as dollars: `$1,234.56`, `-$1,234.00`.
pub fn format_money(amount: Decimal) -> String {
    let formatted = format_amount(amount);
    match formatted.strip_prefix('-') {
        Some(digits) => format!("-${}", digits),
        None => format!("${}", formatted),
    }
}

/// Formats a percentage with two decimals: `12.34%`.
pub fn format_pct(pct: Decimal) -> String {
    let rounded = cents(pct);
    if rounded.is_zero() {
        "0.00%".to_string()
    } else {
        format!("{}%", rounded)
    }
}

/// Add thousands separators to an unsigned number string.
pub fn add_thousands_separator(s: &str) -> String {
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (s, None),
    };

    let chars: Vec<char> = integer_part.chars().rev().collect();
    let formatted: String = chars
        .chunks(3)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<String>>()
        .join(",")
        .chars()
        .rev()
        .collect();

    match decimal_part {
        Some(dec) => format!("{}.{}", formatted, dec),
        None => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(dec!(1500)), "$1,500.00");
        assert_eq!(format_money(dec!(999.999)), "$1,000.00");
        assert_eq!(format_money(dec!(0.5)), "$0.50");
        assert_eq!(format_money(dec!(123456789.01)), "$123,456,789.01");
    }

    #[test]
    fn test_negative_money() {
        assert_eq!(format_money(dec!(-1234)), "-$1,234.00");
        assert_eq!(format_money(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn test_half_away_from_zero() {
        assert_eq!(format_amount(dec!(2.345)), "2.35");
        assert_eq!(format_amount(dec!(2.355)), "2.36");
        assert_eq!(format_amount(dec!(-2.345)), "-2.35");
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(dec!(75)), "75.00%");
        assert_eq!(format_pct(dec!(33.333333)), "33.33%");
        assert_eq!(format_pct(dec!(0.004)), "0.00%");
    }

    #[test]
    fn test_add_thousands_separator() {
        assert_eq!(add_thousands_separator("1234567.89"), "1,234,567.89");
        assert_eq!(add_thousands_separator("123"), "123");
        assert_eq!(add_thousands_separator("1000"), "1,000");
        assert_eq!(add_thousands_separator("12.5"), "12.5");
    }
}
