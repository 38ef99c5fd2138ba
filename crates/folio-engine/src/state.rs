//! Pipeline state machine.

use std::fmt;

use folio_core::FolioError;

/// A working stage of the pipeline, where a failure can occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PipelineStage {
    /// Reading raw text from the source.
    Extracting,
    /// Structuring text into holdings and writing the holdings exports.
    Parsing,
    /// Converting values to numbers.
    Normalizing,
    /// Aggregating statistics.
    ComputingStatistics,
    /// Writing the statistics report.
    GeneratingArtifacts,
}

impl PipelineStage {
    /// All stages in execution order.
    pub const ALL: [PipelineStage; 5] = [
        PipelineStage::Extracting,
        PipelineStage::Parsing,
        PipelineStage::Normalizing,
        PipelineStage::ComputingStatistics,
        PipelineStage::GeneratingArtifacts,
    ];

    /// Stage name as used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Extracting => "extracting",
            PipelineStage::Parsing => "parsing",
            PipelineStage::Normalizing => "normalizing",
            PipelineStage::ComputingStatistics => "computing_statistics",
            PipelineStage::GeneratingArtifacts => "generating_artifacts",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of one pipeline invocation.
///
/// ```text
/// Idle -> Extracting -> Parsing -> Normalizing -> ComputingStatistics
///      -> GeneratingArtifacts -> Done
/// ```
///
/// `Failed` is reachable from every non-terminal state and records the stage
/// that failed. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PipelineState {
    /// Not started.
    #[default]
    Idle,
    /// Running the given stage.
    Running(PipelineStage),
    /// Every stage completed.
    Done,
    /// A stage failed; later stages did not run.
    Failed {
        /// Stage that failed.
        stage: PipelineStage,
        /// Why it failed.
        error: FolioError,
    },
}

impl PipelineState {
    /// Returns true for `Done` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed { .. })
    }

    /// Returns true if the pipeline completed.
    pub fn is_done(&self) -> bool {
        matches!(self, PipelineState::Done)
    }

    /// The failure, if the pipeline failed.
    pub fn error(&self) -> Option<&FolioError> {
        match self {
            PipelineState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// The stage that failed, if the pipeline failed.
    pub fn failed_stage(&self) -> Option<PipelineStage> {
        match self {
            PipelineState::Failed { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The state that follows this one on success.
    pub fn next(&self) -> Option<PipelineState> {
        use PipelineStage::*;
        let next = match self {
            PipelineState::Idle => PipelineState::Running(Extracting),
            PipelineState::Running(Extracting) => PipelineState::Running(Parsing),
            PipelineState::Running(Parsing) => PipelineState::Running(Normalizing),
            PipelineState::Running(Normalizing) => PipelineState::Running(ComputingStatistics),
            PipelineState::Running(ComputingStatistics) => {
                PipelineState::Running(GeneratingArtifacts)
            }
            PipelineState::Running(GeneratingArtifacts) => PipelineState::Done,
            PipelineState::Done | PipelineState::Failed { .. } => return None,
        };
        Some(next)
    }

    /// Whether moving from this state to `to` is a legal transition.
    pub fn can_transition_to(&self, to: &PipelineState) -> bool {
        match to {
            PipelineState::Failed { stage, .. } => {
                matches!(self, PipelineState::Running(current) if current == stage)
            }
            _ => self.next().as_ref() == Some(to),
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Idle => f.write_str("idle"),
            PipelineState::Running(stage) => write!(f, "{}", stage),
            PipelineState::Done => f.write_str("done"),
            PipelineState::Failed { stage, error } => write!(f, "failed at {}: {}", stage, error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_sequence() {
        let mut state = PipelineState::Idle;
        let mut seen = Vec::new();
        while let Some(next) = state.next() {
            assert!(state.can_transition_to(&next));
            seen.push(next.to_string());
            state = next;
        }
        assert_eq!(
            seen,
            vec![
                "extracting",
                "parsing",
                "normalizing",
                "computing_statistics",
                "generating_artifacts",
                "done"
            ]
        );
        assert!(state.is_terminal());
    }

    #[test]
    fn test_failed_only_from_running_stage() {
        let failed = PipelineState::Failed {
            stage: PipelineStage::Parsing,
            error: FolioError::parse("Could not find holdings"),
        };
        assert!(PipelineState::Running(PipelineStage::Parsing).can_transition_to(&failed));
        assert!(!PipelineState::Running(PipelineStage::Extracting).can_transition_to(&failed));
        assert!(!PipelineState::Done.can_transition_to(&failed));
        assert!(failed.next().is_none());
        assert_eq!(failed.failed_stage(), Some(PipelineStage::Parsing));
        assert!(failed.to_string().starts_with("failed at parsing"));
    }

    #[test]
    fn test_no_skipping_stages() {
        assert!(!PipelineState::Idle.can_transition_to(&PipelineState::Running(
            PipelineStage::Parsing
        )));
        assert!(!PipelineState::Running(PipelineStage::Normalizing)
            .can_transition_to(&PipelineState::Done));
    }
}
