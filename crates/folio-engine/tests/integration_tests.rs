//! End-to-end pipeline tests.
//!
//! Each test writes a page-text input into a temporary directory, runs the
//! pipeline once and inspects the terminal state and the artifacts on disk.

use std::fs;
use std::path::{Path, PathBuf};

use folio_config::FolioConfig;
use folio_core::{ErrorKind, FolioError, StatisticsIssue};
use folio_engine::{
    ArtifactKind, InvocationContext, PipelineBuilder, PipelineOutcome, PipelineStage,
    PipelineState,
};
use rust_decimal_macros::dec;
use tempfile::TempDir;

// =============================================================================
// TEST FIXTURES
// =============================================================================

const HEADER: &str = "Name\tTicker\tShares\tValue";

fn page(rows: &[&str]) -> String {
    let mut text = String::from("Holdings overview\n");
    text.push_str(HEADER);
    text.push('\n');
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text.push_str("\nPrices delayed 15 minutes.\n");
    text
}

fn run(dir: &TempDir, input: &str) -> (PipelineOutcome, PathBuf) {
    run_with(dir, input, FolioConfig::default())
}

fn run_with(dir: &TempDir, input: &str, config: FolioConfig) -> (PipelineOutcome, PathBuf) {
    let source = dir.path().join("Brokerage.txt");
    fs::write(&source, input).unwrap();

    let out = dir.path().join("out");
    let pipeline = PipelineBuilder::from_config(config).build().unwrap();
    let ctx = InvocationContext::for_source(&source, &out);
    (pipeline.run(&source, &ctx), out)
}

fn read(out: &Path, name: &str) -> String {
    fs::read_to_string(out.join(name)).unwrap()
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn test_two_holdings_complete_run() {
    let dir = TempDir::new().unwrap();
    let (outcome, out) = run(
        &dir,
        &page(&[
            "Apple Inc\tAAPL\t10\t$1,500.00",
            "Bond Fund\tBND\t5\t$500.00",
        ]),
    );

    assert_eq!(outcome.state, PipelineState::Done);
    assert!(outcome.warnings.is_empty());
    assert_eq!(
        outcome.artifacts.kinds(),
        vec![
            ArtifactKind::RawText,
            ArtifactKind::FullExport,
            ArtifactKind::ReducedExport,
            ArtifactKind::HoldingsText,
            ArtifactKind::Report,
        ]
    );

    let stats = outcome.statistics.as_ref().unwrap();
    assert_eq!(stats.total_value, dec!(2000.00));
    assert_eq!(stats.avg_value, dec!(1000.00));
    assert_eq!(stats.holdings_pct[0].pct_of_total, dec!(75));

    assert_eq!(read(&out, "Brokerage_morningstar.csv"), "Symbol,Shares\nAAPL,10\nBND,5\n");
    assert!(read(&out, "Brokerage.txt").contains("Bond Fund (BND) | Shares: 5 | Value: $500.00"));
    assert!(read(&out, "Brokerage_report.txt").contains("Apple Inc (AAPL): 75.00% ($1,500.00)"));
    assert_eq!(outcome.output_dir(), Some(out));
}

#[test]
fn test_twelve_holdings_report_has_other_line() {
    let dir = TempDir::new().unwrap();
    let rows: Vec<String> = (1..=12)
        .map(|i| format!("Fund {i}\tF{i}\t{i}\t${i},000.00"))
        .collect();
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    let (outcome, out) = run(&dir, &page(&rows));

    assert!(outcome.is_success());
    let report = read(&out, "Brokerage_report.txt");
    let top: Vec<&str> = report
        .split("TOP HOLDINGS\n------------\n")
        .nth(1)
        .unwrap()
        .lines()
        .take_while(|l| !l.is_empty())
        .collect();

    assert_eq!(top.len(), 11);
    assert!(top[..10].iter().all(|l| l.starts_with("Fund ")));
    // (1 + 2) / 78 of the total
    assert_eq!(top[10], "Other Holdings: 3.85% ($3,000.00)");
}

#[test]
fn test_non_numeric_value_keeps_earlier_artifacts() {
    let dir = TempDir::new().unwrap();
    let (outcome, out) = run(
        &dir,
        &page(&["Apple Inc\tAAPL\t10\t$1,500.00", "Mystery\tMYST\t1\tabc"]),
    );

    assert_eq!(outcome.state.failed_stage(), Some(PipelineStage::Normalizing));
    assert_eq!(outcome.state.error().map(FolioError::kind), Some(ErrorKind::Numeric));
    assert!(outcome.statistics.is_none());

    assert!(outcome.artifacts.contains(ArtifactKind::RawText));
    assert!(outcome.artifacts.contains(ArtifactKind::FullExport));
    assert!(!outcome.artifacts.contains(ArtifactKind::Report));
    assert!(out.join("Brokerage.csv").is_file());
    assert!(out.join("Brokerage_rawdata.txt").is_file());
    assert!(!out.join("Brokerage_report.txt").exists());
}

#[test]
fn test_all_zero_values_is_statistics_error() {
    let dir = TempDir::new().unwrap();
    let (outcome, _) = run(&dir, &page(&["Cash\tCASH\t0\t$0.00", "Fund\tFND\t0\t0"]));

    match &outcome.state {
        PipelineState::Failed { stage, error } => {
            assert_eq!(*stage, PipelineStage::ComputingStatistics);
            assert_eq!(*error, FolioError::statistics(StatisticsIssue::ZeroTotalValue));
        }
        other => panic!("expected failure, got {other}"),
    }
    assert_eq!(outcome.holdings.len(), 2);
}

// =============================================================================
// FAILURES AND PARTIAL OUTPUT
// =============================================================================

#[test]
fn test_blank_input_produces_nothing() {
    let dir = TempDir::new().unwrap();
    let (outcome, out) = run(&dir, "   \n");

    assert_eq!(outcome.state.failed_stage(), Some(PipelineStage::Extracting));
    assert_eq!(outcome.state.error().map(FolioError::kind), Some(ErrorKind::Extraction));
    assert!(outcome.artifacts.is_empty());
    assert!(outcome.text.is_none());
    assert!(!out.exists());
}

#[test]
fn test_missing_table_keeps_raw_text() {
    let dir = TempDir::new().unwrap();
    let (outcome, out) = run(&dir, "Session expired. Please log in again.\n");

    assert_eq!(outcome.state.failed_stage(), Some(PipelineStage::Parsing));
    let error = outcome.state.error().unwrap();
    assert_eq!(error.kind(), ErrorKind::Parse);
    assert!(error.to_string().contains("Could not"));
    assert_eq!(outcome.artifacts.kinds(), vec![ArtifactKind::RawText]);
    assert_eq!(
        read(&out, "Brokerage_rawdata.txt"),
        "Session expired. Please log in again.\n"
    );
}

#[test]
fn test_missing_symbol_is_a_warning() {
    let dir = TempDir::new().unwrap();
    let input = "Name,Value\nCash,$250.00\nIndex Fund,$750.00\n";
    let (outcome, out) = run(&dir, input);

    assert!(outcome.is_success());
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].kind(), ErrorKind::Schema);
    assert!(!outcome.artifacts.contains(ArtifactKind::ReducedExport));
    assert!(!out.join("Brokerage_morningstar.csv").exists());
    assert!(read(&out, "Brokerage_report.txt").contains("Index Fund (N/A): 75.00% ($750.00)"));
}

#[test]
fn test_missing_value_column_fails_normalizing() {
    let pipeline = PipelineBuilder::new()
        .with_extractor(|_: &Path| -> folio_core::FolioResult<String> { Ok("x".into()) })
        .with_parser(|_: &str| -> folio_core::FolioResult<Vec<folio_core::HoldingRecord>> {
            Ok(vec![folio_core::HoldingRecord::new()
                .with_field("Name", "Apple Inc")
                .with_field("Ticker", "AAPL")])
        })
        .build()
        .unwrap();
    let dir = TempDir::new().unwrap();
    let outcome = pipeline.run(
        Path::new("in.txt"),
        &InvocationContext::new("B", dir.path()),
    );
    assert_eq!(
        outcome.state,
        PipelineState::Failed {
            stage: PipelineStage::Normalizing,
            error: FolioError::statistics(StatisticsIssue::MissingValueColumn),
        }
    );
    assert!(dir.path().join("B.csv").is_file());
}

#[test]
fn test_configured_top_holdings() {
    let dir = TempDir::new().unwrap();
    let config = FolioConfig {
        top_holdings: 1,
        ..FolioConfig::default()
    };
    let (outcome, out) = run_with(
        &dir,
        &page(&["Apple Inc\tAAPL\t10\t$1,500.00", "Bond Fund\tBND\t5\t$500.00"]),
        config,
    );

    assert!(outcome.is_success());
    assert!(read(&out, "Brokerage_report.txt").contains("Other Holdings: 25.00% ($500.00)\n"));
}

#[test]
fn test_rerun_overwrites_artifacts() {
    let dir = TempDir::new().unwrap();
    let (_, out) = run(&dir, &page(&["Apple Inc\tAAPL\t10\t$1,500.00"]));
    let (outcome, _) = run(&dir, &page(&["Bond Fund\tBND\t5\t$500.00"]));

    assert!(outcome.is_success());
    let full = read(&out, "Brokerage.csv");
    assert!(full.contains("BND"));
    assert!(!full.contains("AAPL"));
}

#[test]
fn test_failed_rerun_removes_stale_report() {
    let dir = TempDir::new().unwrap();
    let (first, out) = run(&dir, &page(&["Apple Inc\tAAPL\t10\t$1,500.00"]));
    assert!(first.is_success());
    assert!(out.join("Brokerage_report.txt").is_file());
    assert!(out.join("Brokerage_morningstar.csv").is_file());

    let (second, _) = run(&dir, "Name,Value\nMystery,abc\n");

    assert_eq!(second.state.failed_stage(), Some(PipelineStage::Normalizing));
    assert!(!second.artifacts.contains(ArtifactKind::Report));
    assert!(!out.join("Brokerage_report.txt").exists());
    assert!(!out.join("Brokerage_morningstar.csv").exists());
    assert!(read(&out, "Brokerage.csv").contains("Mystery"));
}
