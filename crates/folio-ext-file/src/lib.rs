//! # Folio Ext File
//!
//! File-based collaborators and artifact generation for the Folio pipeline.
//!
//! This crate provides:
//! - [`FileTextExtractor`]: reads already-extracted page text from disk
//! - [`DelimitedHoldingsParser`]: finds a delimited holdings table in raw text
//! - [`JsonHoldingsParser`]: reads holdings that were already structured as JSON
//! - Artifact rendering: full CSV export, reduced `Symbol`/`Shares` export,
//!   plain-text holdings listing and the statistics report
//! - [`ArtifactWriter`]: writes artifacts under an output directory using the
//!   `B_rawdata.txt` / `B.csv` / `B_morningstar.csv` / `B.txt` / `B_report.txt`
//!   naming convention
//!
//! Reading the browser archive container itself is left to external tooling.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod export;
mod extractor;
pub mod format;
mod parser;
mod report;
mod writer;

pub use export::{render_full_export, render_reduced_export, REDUCED_EXPORT_COLUMNS};
pub use extractor::FileTextExtractor;
pub use parser::{DelimitedHoldingsParser, JsonHoldingsParser, AUTO_DELIMITERS};
pub use report::{render_holdings_text, render_report};
pub use writer::{ArtifactId, ArtifactKind, ArtifactWriter};
