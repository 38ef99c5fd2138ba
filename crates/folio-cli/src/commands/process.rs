//! Process command implementation.
//!
//! Runs one holdings file through the pipeline.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use folio_core::{ErrorKind, FolioError};
use folio_engine::{
    default_base_name, prune_stale_sessions, ArtifactSet, InvocationContext, PipelineBuilder,
    PipelineOutcome, SessionWorkspace,
};
use folio_ext_file::format::{format_money, format_pct};
use folio_portfolio::PortfolioStatistics;
use serde::Serialize;
use tabled::Tabled;

use super::{max_age_from_hours, CommandContext};
use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{
    print_error, print_header, print_info, print_json, print_success, print_table, print_warning,
    KeyValue,
};

/// Arguments for the process command.
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Text extracted from the saved holdings page
    pub input: PathBuf,

    /// Prefix for artifact file names (defaults to the input file stem)
    #[arg(short, long)]
    pub base_name: Option<String>,

    /// Write artifacts to this directory instead of a session directory
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Write directly into the output root without creating a session directory
    #[arg(long)]
    pub no_session: bool,
}

/// Execute the process command.
pub fn execute(args: ProcessArgs, ctx: &CommandContext) -> Result<()> {
    let config = &ctx.config;
    let output_dir = resolve_output_dir(&args, ctx)?;
    let base_name = args
        .base_name
        .clone()
        .unwrap_or_else(|| default_base_name(&args.input));

    let pipeline = PipelineBuilder::from_config(config.clone()).build()?;
    let invocation = InvocationContext::new(base_name, output_dir);
    let outcome = pipeline.run(&args.input, &invocation);

    match ctx.format {
        OutputFormat::Json => print_json(&ProcessReport::from(&outcome))?,
        OutputFormat::Table => print_summary(&outcome, ctx.quiet),
    }

    match outcome.state.failed_stage().zip(outcome.state.error()) {
        Some((stage, error)) => Err(CliError::PipelineFailed {
            stage: stage.to_string(),
            message: error.to_string(),
        }
        .into()),
        None => Ok(()),
    }
}

fn resolve_output_dir(args: &ProcessArgs, ctx: &CommandContext) -> Result<PathBuf> {
    if let Some(out) = &args.out {
        return Ok(out.clone());
    }

    let config = &ctx.config;
    if args.no_session || !config.use_sessions {
        return Ok(config.output_root.clone());
    }

    let max_age = max_age_from_hours(config.session_max_age_hours)?;
    let pruned = prune_stale_sessions(&config.output_root, max_age, None);
    if !pruned.removed.is_empty() && !ctx.quiet && ctx.format == OutputFormat::Table {
        print_info(&format!("Removed {} stale session(s)", pruned.removed.len()));
    }

    let workspace = SessionWorkspace::create(&config.output_root)?;
    Ok(workspace.path().to_path_buf())
}

// =============================================================================
// TABLE OUTPUT
// =============================================================================

#[derive(Tabled)]
struct ArtifactRow {
    #[tabled(rename = "Artifact")]
    kind: String,
    #[tabled(rename = "Path")]
    path: String,
}

#[derive(Tabled)]
struct TopHoldingRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "% of Total")]
    pct: String,
}

fn artifact_rows(artifacts: &ArtifactSet) -> Vec<ArtifactRow> {
    artifacts
        .iter()
        .map(|a| ArtifactRow {
            kind: a.kind.to_string(),
            path: a.path.display().to_string(),
        })
        .collect()
}

fn summary_rows(stats: &PortfolioStatistics) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Total Portfolio Value", format_money(stats.total_value)),
        KeyValue::new("Number of Holdings", stats.count.to_string()),
        KeyValue::new("Average Holding Value", format_money(stats.avg_value)),
        KeyValue::new("Largest Holding", format_money(stats.max_value)),
        KeyValue::new("Smallest Holding", format_money(stats.min_value)),
    ]
}

fn top_rows(stats: &PortfolioStatistics) -> Vec<TopHoldingRow> {
    stats
        .top_holdings
        .iter()
        .map(|h| TopHoldingRow {
            name: h.display_name().to_string(),
            symbol: h.display_symbol().to_string(),
            value: format_money(h.value),
            pct: format_pct(h.pct_of_total),
        })
        .collect()
}

fn print_summary(outcome: &PipelineOutcome, quiet: bool) {
    for warning in &outcome.warnings {
        print_warning(&describe(warning));
    }

    if !quiet {
        if let Some(stats) = &outcome.statistics {
            print_header("Portfolio Summary");
            print_table(&summary_rows(stats));
            print_header("Top Holdings");
            print_table(&top_rows(stats));
        }
        if !outcome.artifacts.is_empty() {
            print_header("Artifacts");
            print_table(&artifact_rows(&outcome.artifacts));
        }
    }

    match outcome.state.error() {
        Some(error) => print_error(&describe(error)),
        None => {
            if !quiet {
                print_success(&format!(
                    "Processed {} holding(s)",
                    outcome.holdings.len()
                ));
            }
        }
    }
}

fn describe(error: &FolioError) -> String {
    match error {
        FolioError::Schema { .. } => format!("{} (some columns will show N/A)", error),
        _ => error.to_string(),
    }
}

// =============================================================================
// JSON OUTPUT
// =============================================================================

#[derive(Debug, Serialize)]
struct ErrorView {
    kind: ErrorKind,
    message: String,
}

impl From<&FolioError> for ErrorView {
    fn from(error: &FolioError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ProcessReport<'a> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    failed_stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_dir: Option<PathBuf>,
    artifacts: &'a ArtifactSet,
    holdings: usize,
    warnings: Vec<ErrorView>,
    statistics: Option<&'a PortfolioStatistics>,
}

impl<'a> From<&'a PipelineOutcome> for ProcessReport<'a> {
    fn from(outcome: &'a PipelineOutcome) -> Self {
        Self {
            status: if outcome.is_success() { "done" } else { "failed" },
            failed_stage: outcome.state.failed_stage().map(|s| s.to_string()),
            error: outcome.state.error().map(ErrorView::from),
            output_dir: outcome.output_dir(),
            artifacts: &outcome.artifacts,
            holdings: outcome.holdings.len(),
            warnings: outcome.warnings.iter().map(ErrorView::from).collect(),
            statistics: outcome.statistics.as_ref(),
        }
    }
}
