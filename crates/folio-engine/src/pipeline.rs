//! The holdings pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use folio_core::traits::{HoldingsParser, TextExtractor};
use folio_core::{CanonicalField, CanonicalHolding, FolioError, FolioResult, ResolvedSchema};
use folio_ext_file::{
    render_full_export, render_holdings_text, render_reduced_export, render_report, ArtifactId,
    ArtifactKind, ArtifactWriter,
};
use folio_portfolio::{normalize_holdings, NormalizedHolding, PortfolioStatistics};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::context::InvocationContext;
use crate::state::{PipelineStage, PipelineState};

/// Canonical fields whose absence is reported but does not stop the run.
const ADVISORY_FIELDS: [CanonicalField; 3] = [
    CanonicalField::Name,
    CanonicalField::Symbol,
    CanonicalField::Shares,
];

/// Artifacts written by one invocation, in the order they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArtifactSet {
    artifacts: Vec<ArtifactId>,
}

impl ArtifactSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, artifact: ArtifactId) {
        self.artifacts.retain(|a| a.kind != artifact.kind);
        self.artifacts.push(artifact);
    }

    /// Path of the given artifact, if it was written.
    pub fn path(&self, kind: ArtifactKind) -> Option<&Path> {
        self.artifacts
            .iter()
            .find(|a| a.kind == kind)
            .map(|a| a.path.as_path())
    }

    /// Returns true if the given artifact was written.
    pub fn contains(&self, kind: ArtifactKind) -> bool {
        self.path(kind).is_some()
    }

    /// Kinds written, in order.
    pub fn kinds(&self) -> Vec<ArtifactKind> {
        self.artifacts.iter().map(|a| a.kind).collect()
    }

    /// All written artifacts.
    pub fn iter(&self) -> impl Iterator<Item = &ArtifactId> {
        self.artifacts.iter()
    }

    /// Number of artifacts written.
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Returns true if nothing was written.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

/// Everything one invocation produced, successful or not.
///
/// Whatever was produced before a failure stays available here.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutcome {
    /// Terminal state: `Done` or `Failed`.
    pub state: PipelineState,
    /// Artifacts written.
    pub artifacts: ArtifactSet,
    /// Raw extracted text, if extraction succeeded.
    pub text: Option<String>,
    /// Parsed holdings in the canonical shape.
    pub holdings: Vec<CanonicalHolding>,
    /// Statistics, if they could be computed.
    pub statistics: Option<PortfolioStatistics>,
    /// Problems that did not stop the run.
    pub warnings: Vec<FolioError>,
}

impl PipelineOutcome {
    /// Returns true if every stage completed.
    pub fn is_success(&self) -> bool {
        self.state.is_done()
    }

    /// Output directory of the written artifacts, if any were written.
    pub fn output_dir(&self) -> Option<PathBuf> {
        self.artifacts
            .iter()
            .next()
            .and_then(|a| a.path.parent())
            .map(Path::to_path_buf)
    }
}

type StageResult<T> = Result<T, (PipelineStage, FolioError)>;

/// Runs one input through extraction, parsing, normalization, statistics and
/// artifact generation.
///
/// Collaborators are shared behind `Arc`, so a pipeline is cheap to clone and
/// can serve any number of invocations. It holds no per-run state.
#[derive(Clone)]
pub struct Pipeline {
    extractor: Arc<dyn TextExtractor>,
    parser: Arc<dyn HoldingsParser>,
    top_n: usize,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("top_n", &self.top_n)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    pub(crate) fn new(
        extractor: Arc<dyn TextExtractor>,
        parser: Arc<dyn HoldingsParser>,
        top_n: usize,
    ) -> Self {
        Self {
            extractor,
            parser,
            top_n,
        }
    }

    /// Number of holdings listed individually in the report.
    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Processes `source` and writes artifacts as described by `ctx`.
    ///
    /// Never fails: data problems end in [`PipelineState::Failed`], with every
    /// artifact written before the failing stage still in place.
    pub fn run(&self, source: &Path, ctx: &InvocationContext) -> PipelineOutcome {
        info!(
            source = %source.display(),
            base_name = %ctx.base_name,
            output_dir = %ctx.output_dir.display(),
            "Starting pipeline"
        );

        let mut outcome = PipelineOutcome::default();
        match self.execute(source, ctx, &mut outcome) {
            Ok(()) => {
                advance(&mut outcome, PipelineState::Done);
                info!(artifacts = outcome.artifacts.len(), "Pipeline completed");
            }
            Err((stage, error)) => {
                warn!(stage = %stage, kind = %error.kind(), error = %error, "Pipeline failed");
                advance(&mut outcome, PipelineState::Failed { stage, error });
            }
        }
        outcome
    }

    fn execute(
        &self,
        source: &Path,
        ctx: &InvocationContext,
        outcome: &mut PipelineOutcome,
    ) -> StageResult<()> {
        // Extracting
        let stage = PipelineStage::Extracting;
        advance(outcome, PipelineState::Running(stage));
        let text = self.extractor.extract(source).map_err(|e| (stage, e))?;
        let writer =
            ArtifactWriter::new(&ctx.output_dir, ctx.base_name.as_str()).map_err(|e| (stage, e))?;
        writer.clear().map_err(|e| (stage, e))?;
        write_artifact(outcome, &writer, ArtifactKind::RawText, Ok(text.clone()));
        outcome.text = Some(text);

        // Parsing
        let stage = PipelineStage::Parsing;
        advance(outcome, PipelineState::Running(stage));
        let text = outcome.text.as_deref().unwrap_or_default();
        let records = self.parser.parse(text).map_err(|e| (stage, e))?;
        let schema = ResolvedSchema::from_records(&records);
        if let Err(warning) = schema.check(&ADVISORY_FIELDS) {
            warn!(error = %warning, "Incomplete holdings schema");
            outcome.warnings.push(warning);
        }
        let holdings = schema.canonicalize(&records);
        debug!(count = holdings.len(), "Parsed holdings");

        write_artifact(
            outcome,
            &writer,
            ArtifactKind::FullExport,
            render_full_export(&holdings, &schema),
        );
        match render_reduced_export(&holdings, &schema) {
            Ok(Some(csv)) => write_artifact(outcome, &writer, ArtifactKind::ReducedExport, Ok(csv)),
            Ok(None) => debug!("Reduced export not applicable"),
            Err(e) => record_warning(outcome, e),
        }
        write_artifact(
            outcome,
            &writer,
            ArtifactKind::HoldingsText,
            Ok(render_holdings_text(&holdings)),
        );
        outcome.holdings = holdings;

        // Normalizing
        let stage = PipelineStage::Normalizing;
        advance(outcome, PipelineState::Running(stage));
        let normalized: Vec<NormalizedHolding> =
            normalize_holdings(&outcome.holdings, &schema).map_err(|e| (stage, e))?;

        // ComputingStatistics
        let stage = PipelineStage::ComputingStatistics;
        advance(outcome, PipelineState::Running(stage));
        let stats = PortfolioStatistics::calculate_with_top(&normalized, self.top_n)
            .map_err(|e| (stage, e))?;
        debug!(
            count = stats.count,
            total_value = %stats.total_value,
            "Computed statistics"
        );

        // GeneratingArtifacts
        let stage = PipelineStage::GeneratingArtifacts;
        advance(outcome, PipelineState::Running(stage));
        let report = writer
            .write(ArtifactKind::Report, &render_report(&stats))
            .map_err(|e| (stage, e))?;
        outcome.artifacts.push(report);
        outcome.statistics = Some(stats);

        Ok(())
    }
}

fn advance(outcome: &mut PipelineOutcome, to: PipelineState) {
    debug_assert!(
        outcome.state.can_transition_to(&to),
        "illegal transition {} -> {}",
        outcome.state,
        to
    );
    debug!(from = %outcome.state, to = %to, "Pipeline transition");
    outcome.state = to;
}

/// Writes one self-contained artifact. A failure is recorded as a warning and
/// does not affect the other artifacts.
fn write_artifact(
    outcome: &mut PipelineOutcome,
    writer: &ArtifactWriter,
    kind: ArtifactKind,
    contents: FolioResult<String>,
) {
    match contents.and_then(|c| writer.write(kind, &c)) {
        Ok(id) => outcome.artifacts.push(id),
        Err(e) => record_warning(outcome, e),
    }
}

fn record_warning(outcome: &mut PipelineOutcome, error: FolioError) {
    warn!(error = %error, "Artifact skipped");
    outcome.warnings.push(error);
}
