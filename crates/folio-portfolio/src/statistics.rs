//! Portfolio statistics.
//!
//! Summarizes an ordered sequence of [`NormalizedHolding`]s: totals, extremes,
//! a value-ranked top list and every holding's share of the total. Rankings
//! use a stable descending sort so equal values keep their input order.

use std::cmp::Ordering;

use folio_core::{FieldValue, FolioError, FolioResult, StatisticsIssue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::holding::NormalizedHolding;

/// Number of holdings listed individually by default.
pub const DEFAULT_TOP_HOLDINGS: usize = 10;

/// A holding paired with its share of the portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedHolding {
    /// Zero-based input position.
    pub position: usize,
    /// Security name, if present.
    pub name: Option<String>,
    /// Ticker symbol, if present.
    pub symbol: Option<String>,
    /// Share count as given in the input.
    pub shares: Option<FieldValue>,
    /// Market value.
    pub value: Decimal,
    /// `value / total_value * 100`.
    pub pct_of_total: Decimal,
}

impl RankedHolding {
    /// Name for display, `N/A` when missing.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("N/A")
    }

    /// Symbol for display, `N/A` when missing.
    pub fn display_symbol(&self) -> &str {
        self.symbol.as_deref().unwrap_or("N/A")
    }
}

/// Aggregate of the holdings ranked below the top list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherHoldings {
    /// Number of holdings aggregated.
    pub count: usize,
    /// Sum of their exact (unrounded) percentages.
    pub pct_of_total: Decimal,
    /// Sum of their values.
    pub value: Decimal,
}

/// Read-only summary over a set of normalized holdings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioStatistics {
    /// Sum of all holding values.
    pub total_value: Decimal,
    /// Number of holdings.
    pub count: usize,
    /// `total_value / count`.
    pub avg_value: Decimal,
    /// Largest holding value.
    pub max_value: Decimal,
    /// Smallest holding value.
    pub min_value: Decimal,
    /// Size of the top list.
    pub top_n: usize,
    /// The `top_n` holdings with the greatest value.
    pub top_holdings: Vec<RankedHolding>,
    /// Every holding, ranked by share of total.
    pub holdings_pct: Vec<RankedHolding>,
    /// Aggregate of the holdings ranked below the top list.
    pub other: Option<OtherHoldings>,
}

impl PortfolioStatistics {
    /// Calculates statistics with the default top list size.
    ///
    /// # Example
    ///
    /// ```
    /// use folio_core::HoldingRecord;
    /// use folio_core::ResolvedSchema;
    /// use folio_portfolio::{normalize_holdings, PortfolioStatistics};
    ///
    /// let records = vec![
    ///     HoldingRecord::new().with_field("Ticker", "AAPL").with_field("Value", "$1,500.00"),
    ///     HoldingRecord::new().with_field("Ticker", "BND").with_field("Value", "$500.00"),
    /// ];
    /// let schema = ResolvedSchema::from_records(&records);
    /// let holdings = normalize_holdings(&schema.canonicalize(&records), &schema).unwrap();
    ///
    /// let stats = PortfolioStatistics::calculate(&holdings).unwrap();
    /// assert_eq!(stats.total_value.to_string(), "2000.00");
    /// assert_eq!(stats.holdings_pct[0].symbol.as_deref(), Some("AAPL"));
    /// ```
    pub fn calculate(holdings: &[NormalizedHolding]) -> FolioResult<Self> {
        Self::calculate_with_top(holdings, DEFAULT_TOP_HOLDINGS)
    }

    /// Calculates statistics listing `top_n` holdings individually.
    ///
    /// # Errors
    ///
    /// - [`StatisticsIssue::NoHoldings`] for an empty input
    /// - [`StatisticsIssue::ZeroTotalValue`] when values sum to zero, since
    ///   percentages would be undefined
    /// - [`FolioError::Numeric`] if an intermediate result overflows
    pub fn calculate_with_top(holdings: &[NormalizedHolding], top_n: usize) -> FolioResult<Self> {
        let count = holdings.len();
        if count == 0 {
            return Err(FolioError::statistics(StatisticsIssue::NoHoldings));
        }

        let total_value = holdings.iter().try_fold(Decimal::ZERO, |acc, h| {
            acc.checked_add(h.value_numeric)
                .ok_or_else(|| FolioError::numeric(h.value_numeric.to_string(), "total overflows"))
        })?;

        if total_value.is_zero() {
            return Err(FolioError::statistics(StatisticsIssue::ZeroTotalValue));
        }

        let avg_value = total_value / Decimal::from(count);
        let max_value = holdings
            .iter()
            .map(|h| h.value_numeric)
            .fold(holdings[0].value_numeric, Decimal::max);
        let min_value = holdings
            .iter()
            .map(|h| h.value_numeric)
            .fold(holdings[0].value_numeric, Decimal::min);

        let ranked = holdings
            .iter()
            .map(|h| {
                Ok(RankedHolding {
                    position: h.position(),
                    name: h.holding.name.clone(),
                    symbol: h.holding.symbol.clone(),
                    shares: h.holding.shares.clone(),
                    value: h.value_numeric,
                    pct_of_total: pct_of(h.value_numeric, total_value)?,
                })
            })
            .collect::<FolioResult<Vec<_>>>()?;

        let mut top_holdings = ranked.clone();
        top_holdings.sort_by(|a, b| descending(a.value, b.value));
        top_holdings.truncate(top_n);

        let mut holdings_pct = ranked;
        holdings_pct.sort_by(|a, b| descending(a.pct_of_total, b.pct_of_total));
        let other = aggregate_rest(holdings_pct.get(top_n..).unwrap_or_default())?;

        Ok(Self {
            total_value,
            count,
            avg_value,
            max_value,
            min_value,
            top_n,
            top_holdings,
            holdings_pct,
            other,
        })
    }

    /// Aggregate of the holdings beyond the top list, if there are any.
    pub fn other_holdings(&self) -> Option<OtherHoldings> {
        self.other
    }

    /// Every holding ranked by value, largest first.
    pub fn by_value(&self) -> Vec<&RankedHolding> {
        let mut all: Vec<&RankedHolding> = self.holdings_pct.iter().collect();
        all.sort_by(|a, b| descending(a.value, b.value).then(a.position.cmp(&b.position)));
        all
    }
}

fn aggregate_rest(rest: &[RankedHolding]) -> FolioResult<Option<OtherHoldings>> {
    if rest.is_empty() {
        return Ok(None);
    }
    let mut other = OtherHoldings {
        count: rest.len(),
        pct_of_total: Decimal::ZERO,
        value: Decimal::ZERO,
    };
    for h in rest {
        other.pct_of_total = other
            .pct_of_total
            .checked_add(h.pct_of_total)
            .ok_or_else(|| {
                FolioError::numeric(h.pct_of_total.to_string(), "percentage overflows")
            })?;
        other.value = other
            .value
            .checked_add(h.value)
            .ok_or_else(|| FolioError::numeric(h.value.to_string(), "other holdings overflow"))?;
    }
    Ok(Some(other))
}

fn pct_of(value: Decimal, total: Decimal) -> FolioResult<Decimal> {
    value
        .checked_div(total)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| FolioError::numeric(value.to_string(), "percentage overflows"))
}

/// Descending comparator. Combined with the stable `sort_by`, equal keys keep input order.
fn descending(a: Decimal, b: Decimal) -> Ordering {
    b.cmp(&a)
}
