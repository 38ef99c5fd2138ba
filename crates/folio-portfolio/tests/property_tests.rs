//! Property-based tests for statistics invariants.
//!
//! These tests verify properties that should always hold:
//! - Percentages sum to 100% whenever the total is positive
//! - Total value equals the sum of holding values
//! - Rankings are descending and stable

use approx::assert_abs_diff_eq;
use folio_portfolio::prelude::*;
use proptest::prelude::*;
use rust_decimal::prelude::ToPrimitive;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

/// Generates `n` holdings with pseudo-random values, including duplicates.
fn generate_holdings(n: usize, seed: u64) -> Vec<NormalizedHolding> {
    let records: Vec<HoldingRecord> = (0..n)
        .map(|i| {
            let hash = simple_hash(seed, i as u64);
            // Few distinct cents values so ties are common
            let cents = 100 + (hash % 50) as i64 * 2_500;
            HoldingRecord::new()
                .with_field("Name", format!("Holding {}", i))
                .with_field("Ticker", format!("T{}", i))
                .with_field("Value", Decimal::new(cents, 2))
        })
        .collect();

    let schema = ResolvedSchema::from_records(&records);
    normalize_holdings(&schema.canonicalize(&records), &schema).unwrap()
}

/// Simple deterministic hash for test data generation.
fn simple_hash(seed: u64, i: u64) -> u64 {
    let mut x = seed.wrapping_add(i).wrapping_mul(0x517cc1b727220a95);
    x ^= x >> 32;
    x = x.wrapping_mul(0x517cc1b727220a95);
    x ^= x >> 32;
    x
}

// =============================================================================
// PROPERTY: PERCENTAGES SUM TO 100%
// =============================================================================

#[test]
fn property_pct_of_total_sums_to_100() {
    for seed in 0..10 {
        for size in [1, 2, 5, 11, 25, 100] {
            let holdings = generate_holdings(size, seed);
            let stats = PortfolioStatistics::calculate(&holdings).unwrap();

            let total: Decimal = stats.holdings_pct.iter().map(|h| h.pct_of_total).sum();

            assert_abs_diff_eq!(total.to_f64().unwrap(), 100.0, epsilon = 1e-6);
        }
    }
}

// =============================================================================
// PROPERTY: TOTAL = SUM OF VALUES
// =============================================================================

#[test]
fn property_total_equals_sum_of_values() {
    for seed in 0..10 {
        let holdings = generate_holdings(40, seed);
        let stats = PortfolioStatistics::calculate(&holdings).unwrap();

        let expected: Decimal = holdings.iter().map(|h| h.value_numeric).sum();
        assert_eq!(stats.total_value, expected);
        assert_eq!(stats.count, holdings.len());
    }
}

// =============================================================================
// PROPERTY: STABLE DESCENDING RANKING
// =============================================================================

#[test]
fn property_top_holdings_sorted_and_stable() {
    for seed in 0..10 {
        for size in [3, 10, 30] {
            let holdings = generate_holdings(size, seed);
            let stats = PortfolioStatistics::calculate(&holdings).unwrap();

            assert_eq!(stats.top_holdings.len(), size.min(10));
            for pair in stats.top_holdings.windows(2) {
                assert!(pair[0].value >= pair[1].value);
                if pair[0].value == pair[1].value {
                    assert!(
                        pair[0].position < pair[1].position,
                        "tie broken out of input order for seed={}, size={}",
                        seed,
                        size
                    );
                }
            }
            for pair in stats.holdings_pct.windows(2) {
                assert!(pair[0].pct_of_total >= pair[1].pct_of_total);
                if pair[0].pct_of_total == pair[1].pct_of_total {
                    assert!(pair[0].position < pair[1].position);
                }
            }
        }
    }
}

#[test]
fn property_other_plus_top_is_everything() {
    for seed in 0..5 {
        let holdings = generate_holdings(25, seed);
        let stats = PortfolioStatistics::calculate(&holdings).unwrap();
        let other = stats.other_holdings().unwrap();

        let top_pct: Decimal = stats.holdings_pct[..10].iter().map(|h| h.pct_of_total).sum();
        assert_abs_diff_eq!(
            (top_pct + other.pct_of_total).to_f64().unwrap(),
            100.0,
            epsilon = 1e-6
        );
        assert_eq!(other.count, 15);
    }
}

proptest! {
    #[test]
    fn prop_pct_sums_to_100(values in prop::collection::vec(1i64..10_000_000, 1..60)) {
        let records: Vec<HoldingRecord> = values
            .iter()
            .map(|v| HoldingRecord::new().with_field("Value", Decimal::new(*v, 2)))
            .collect();
        let schema = ResolvedSchema::from_records(&records);
        let holdings = normalize_holdings(&schema.canonicalize(&records), &schema).unwrap();
        let stats = PortfolioStatistics::calculate(&holdings).unwrap();

        let total: Decimal = stats.holdings_pct.iter().map(|h| h.pct_of_total).sum();
        prop_assert!((total.to_f64().unwrap() - 100.0).abs() < 1e-6);
        prop_assert_eq!(stats.max_value, stats.top_holdings[0].value);
    }
}
