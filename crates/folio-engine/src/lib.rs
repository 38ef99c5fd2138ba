//! # Folio Engine
//!
//! Orchestrates one holdings file through the Folio pipeline.
//!
//! This crate provides:
//! - [`Pipeline`]: the stage-by-stage run, ending in [`PipelineState::Done`]
//!   or [`PipelineState::Failed`]
//! - [`PipelineBuilder`]: wires the text extractor, holdings parser and
//!   configuration
//! - [`InvocationContext`]: base name and output directory of one run
//! - [`SessionWorkspace`] and [`prune_stale_sessions`]: per-run output
//!   directories and their cleanup
//!
//! ## Stages
//!
//! ```text
//! source ─> Extracting ─────────> B_rawdata.txt
//!              │
//!              └─> Parsing ──────> B.csv, B_morningstar.csv, B.txt
//!                     │
//!                     └─> Normalizing ─> ComputingStatistics
//!                                              │
//!                                              └─> GeneratingArtifacts ─> B_report.txt
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let pipeline = PipelineBuilder::from_config(config).build()?;
//! let workspace = SessionWorkspace::create("user_files")?;
//! let ctx = InvocationContext::for_source(&source, workspace.path());
//!
//! let outcome = pipeline.run(&source, &ctx);
//! if let Some(error) = outcome.state.error() {
//!     eprintln!("{}", error);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod context;
pub mod pipeline;
pub mod session;
pub mod state;

// Re-exports
pub use builder::PipelineBuilder;
pub use context::{default_base_name, InvocationContext};
pub use pipeline::{ArtifactSet, Pipeline, PipelineOutcome};
pub use session::{is_session_name, prune_stale_sessions, PruneReport, SessionWorkspace};
pub use state::{PipelineStage, PipelineState};

pub use folio_ext_file::{ArtifactId, ArtifactKind};
