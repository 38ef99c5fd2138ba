//! Plain-text artifacts: the holdings listing and the analysis report.

use folio_core::{CanonicalHolding, FieldValue};
use folio_portfolio::{PortfolioStatistics, RankedHolding};

use crate::format::{format_money, format_pct};

const NOT_AVAILABLE: &str = "N/A";

fn display_or_na(value: Option<&FieldValue>) -> String {
    value
        .and_then(FieldValue::display_value)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn push_heading(output: &mut String, title: &str, underline: char) {
    output.push_str(title);
    output.push('\n');
    output.extend(std::iter::repeat(underline).take(title.chars().count()));
    output.push('\n');
}

/// Renders holdings one per line, in input order.
///
/// Values are shown as they appeared in the input; this listing does not
/// depend on statistics.
pub fn render_holdings_text(holdings: &[CanonicalHolding]) -> String {
    let mut output = String::new();
    push_heading(&mut output, "PORTFOLIO HOLDINGS", '=');
    output.push('\n');

    for h in holdings {
        output.push_str(&format!(
            "{} ({}) | Shares: {} | Value: {}\n",
            h.display_name(),
            h.display_symbol(),
            display_or_na(h.shares.as_ref()),
            display_or_na(h.value.as_ref()),
        ));
    }

    output
}

fn label(h: &RankedHolding) -> String {
    format!("{} ({})", h.display_name(), h.display_symbol())
}

/// Renders the portfolio analysis report.
pub fn render_report(stats: &PortfolioStatistics) -> String {
    let mut output = String::new();

    push_heading(&mut output, "PORTFOLIO ANALYSIS REPORT", '=');
    output.push('\n');

    push_heading(&mut output, "SUMMARY STATISTICS", '-');
    output.push_str(&format!(
        "Total Portfolio Value: {}\n",
        format_money(stats.total_value)
    ));
    output.push_str(&format!("Number of Holdings: {}\n", stats.count));
    output.push_str(&format!(
        "Average Holding Value: {}\n",
        format_money(stats.avg_value)
    ));
    output.push_str(&format!("Largest Holding: {}\n", format_money(stats.max_value)));
    output.push_str(&format!("Smallest Holding: {}\n", format_money(stats.min_value)));
    output.push('\n');

    push_heading(&mut output, "TOP HOLDINGS", '-');
    for h in &stats.top_holdings {
        output.push_str(&format!(
            "{}: {} ({})\n",
            label(h),
            format_pct(h.pct_of_total),
            format_money(h.value)
        ));
    }
    if let Some(other) = stats.other_holdings() {
        output.push_str(&format!(
            "Other Holdings: {} ({})\n",
            format_pct(other.pct_of_total),
            format_money(other.value)
        ));
    }
    output.push('\n');

    push_heading(&mut output, "ALL HOLDINGS (by value)", '-');
    for h in stats.by_value() {
        output.push_str(&format!("{}: {}", label(h), format_money(h.value)));
        if let Some(shares) = h.shares.as_ref().and_then(FieldValue::display_value) {
            output.push_str(&format!(", {} shares", shares));
        }
        output.push('\n');
    }

    output
}
