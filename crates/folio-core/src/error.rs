//! Error types for the Folio pipeline.
//!
//! Every failure the pipeline can report is a tagged [`FolioError`] variant.
//! Collaborators signal failure through these variants rather than sentinel
//! strings, so callers dispatch on [`FolioError::kind`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::CanonicalField;

/// A specialized Result type for Folio operations.
pub type FolioResult<T> = Result<T, FolioError>;

/// Broad classification of a [`FolioError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No content or unreadable input.
    Extraction,
    /// Holdings could not be structured from text.
    Parse,
    /// A canonical column could not be resolved.
    Schema,
    /// A value could not be coerced to a number.
    Numeric,
    /// Degenerate input prevents meaningful statistics.
    Statistics,
    /// An artifact could not be written.
    Artifact,
    /// Invalid configuration or wiring.
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Extraction => "extraction",
            ErrorKind::Parse => "parse",
            ErrorKind::Schema => "schema",
            ErrorKind::Numeric => "numeric",
            ErrorKind::Statistics => "statistics",
            ErrorKind::Artifact => "artifact",
            ErrorKind::Config => "config",
        };
        f.write_str(s)
    }
}

/// Why statistics could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticsIssue {
    /// The holdings set is empty.
    NoHoldings,
    /// Holdings exist but their values sum to zero.
    ZeroTotalValue,
    /// No column resolves to `Value`.
    MissingValueColumn,
}

impl fmt::Display for StatisticsIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatisticsIssue::NoHoldings => "no holdings to summarize",
            StatisticsIssue::ZeroTotalValue => "total portfolio value is zero",
            StatisticsIssue::MissingValueColumn => "Value column not found in data",
        };
        f.write_str(s)
    }
}

/// The main error type for Folio operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FolioError {
    /// Raw text could not be extracted from the source.
    #[error("Extraction failed: {message}")]
    Extraction {
        /// Description of the extraction failure.
        message: String,
    },

    /// Holdings could not be structured from the extracted text.
    #[error("{message}")]
    Parse {
        /// Description of the parse failure.
        message: String,
    },

    /// One or more canonical fields could not be resolved.
    #[error(
        "Missing required columns: {}; available columns: {}",
        join_fields(.missing),
        .available.join(", ")
    )]
    Schema {
        /// Canonical fields without a source column.
        missing: Vec<CanonicalField>,
        /// Columns present in the input, for diagnostics.
        available: Vec<String>,
    },

    /// A value could not be coerced to a number.
    #[error("Cannot convert '{value}' to a number{}: {reason}", row_suffix(.row))]
    Numeric {
        /// The raw value as it appeared in the input.
        value: String,
        /// Zero-based input row, when known.
        row: Option<usize>,
        /// Why the conversion failed.
        reason: String,
    },

    /// Statistics cannot be computed from degenerate input.
    #[error("Cannot compute statistics: {issue}")]
    Statistics {
        /// The degenerate condition.
        issue: StatisticsIssue,
    },

    /// An artifact could not be produced or written.
    #[error("Failed to write {artifact}: {reason}")]
    Artifact {
        /// Artifact being produced.
        artifact: String,
        /// Description of the failure.
        reason: String,
    },

    /// Invalid configuration or pipeline wiring.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of the configuration error.
        reason: String,
    },
}

impl FolioError {
    /// Creates an extraction error.
    #[must_use]
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Creates a schema error.
    #[must_use]
    pub fn schema(missing: Vec<CanonicalField>, available: Vec<String>) -> Self {
        Self::Schema { missing, available }
    }

    /// Creates a numeric error without row context.
    #[must_use]
    pub fn numeric(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Numeric {
            value: value.into(),
            row: None,
            reason: reason.into(),
        }
    }

    /// Creates a statistics error.
    #[must_use]
    pub fn statistics(issue: StatisticsIssue) -> Self {
        Self::Statistics { issue }
    }

    /// Creates an artifact error.
    #[must_use]
    pub fn artifact(artifact: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Artifact {
            artifact: artifact.into(),
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Attaches a row index to a numeric error. Other variants are returned unchanged.
    #[must_use]
    pub fn at_row(self, index: usize) -> Self {
        match self {
            Self::Numeric { value, reason, .. } => Self::Numeric {
                value,
                row: Some(index),
                reason,
            },
            other => other,
        }
    }

    /// Returns the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Extraction { .. } => ErrorKind::Extraction,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Schema { .. } => ErrorKind::Schema,
            Self::Numeric { .. } => ErrorKind::Numeric,
            Self::Statistics { .. } => ErrorKind::Statistics,
            Self::Artifact { .. } => ErrorKind::Artifact,
            Self::Config { .. } => ErrorKind::Config,
        }
    }
}

fn join_fields(fields: &[CanonicalField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn row_suffix(row: &Option<usize>) -> String {
    row.map(|r| format!(" (row {})", r + 1)).unwrap_or_default()
}
