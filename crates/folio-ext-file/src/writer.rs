//! Artifact file naming and writing.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use folio_core::{FolioError, FolioResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// The artifacts one pipeline invocation can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Raw extracted text, `B_rawdata.txt`.
    RawText,
    /// Every column of every holding, `B.csv`.
    FullExport,
    /// `Symbol`,`Shares` only, `B_morningstar.csv`.
    ReducedExport,
    /// Plain-text holdings listing, `B.txt`.
    HoldingsText,
    /// Statistics report, `B_report.txt`.
    Report,
}

impl ArtifactKind {
    /// All artifact kinds in production order.
    pub const ALL: [ArtifactKind; 5] = [
        ArtifactKind::RawText,
        ArtifactKind::FullExport,
        ArtifactKind::ReducedExport,
        ArtifactKind::HoldingsText,
        ArtifactKind::Report,
    ];

    /// File name for this artifact given the base name.
    pub fn file_name(&self, base_name: &str) -> String {
        match self {
            ArtifactKind::RawText => format!("{}_rawdata.txt", base_name),
            ArtifactKind::FullExport => format!("{}.csv", base_name),
            ArtifactKind::ReducedExport => format!("{}_morningstar.csv", base_name),
            ArtifactKind::HoldingsText => format!("{}.txt", base_name),
            ArtifactKind::Report => format!("{}_report.txt", base_name),
        }
    }

    /// Short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::RawText => "raw text",
            ArtifactKind::FullExport => "full export",
            ArtifactKind::ReducedExport => "reduced export",
            ArtifactKind::HoldingsText => "holdings text",
            ArtifactKind::Report => "report",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A written artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactId {
    /// What was written.
    pub kind: ArtifactKind,
    /// Where it was written.
    pub path: PathBuf,
}

/// Writes artifacts for one base name under one output directory.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
    base_name: String,
}

impl ArtifactWriter {
    /// Creates a writer, creating `output_dir` if needed.
    ///
    /// # Errors
    ///
    /// Fails if the base name is empty or contains a path separator, or if
    /// the directory cannot be created.
    pub fn new(output_dir: impl Into<PathBuf>, base_name: impl Into<String>) -> FolioResult<Self> {
        let output_dir = output_dir.into();
        let base_name = base_name.into();

        if base_name.trim().is_empty()
            || base_name.contains(['/', '\\'])
            || base_name == "."
            || base_name == ".."
        {
            return Err(FolioError::artifact(
                "output",
                format!("invalid base name '{}'", base_name),
            ));
        }

        fs::create_dir_all(&output_dir).map_err(|e| {
            FolioError::artifact(
                "output",
                format!("cannot create {}: {}", output_dir.display(), e),
            )
        })?;

        Ok(Self {
            output_dir,
            base_name,
        })
    }

    /// Output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Base name used for file names.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Path the given artifact is written to.
    pub fn path_for(&self, kind: ArtifactKind) -> PathBuf {
        self.output_dir.join(kind.file_name(&self.base_name))
    }

    /// Removes every artifact a previous run left for this base name.
    ///
    /// Files that do not exist are skipped. Other files in the directory are
    /// never touched.
    pub fn clear(&self) -> FolioResult<()> {
        for kind in ArtifactKind::ALL {
            let path = self.path_for(kind);
            match fs::remove_file(&path) {
                Ok(()) => {
                    debug!(artifact = %kind, path = %path.display(), "Removed stale artifact")
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(FolioError::artifact(
                        kind.file_name(&self.base_name),
                        format!("cannot remove stale file: {}", e),
                    ))
                }
            }
        }
        Ok(())
    }

    /// Writes `contents` as the given artifact, replacing any previous file.
    pub fn write(&self, kind: ArtifactKind, contents: &str) -> FolioResult<ArtifactId> {
        let path = self.path_for(kind);
        fs::write(&path, contents)
            .map_err(|e| FolioError::artifact(kind.file_name(&self.base_name), e.to_string()))?;

        info!(artifact = %kind, path = %path.display(), bytes = contents.len(), "Wrote artifact");
        Ok(ArtifactId { kind, path })
    }
}
