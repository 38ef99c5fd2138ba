//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The pipeline stopped before producing every artifact.
    #[error("Processing failed while {stage}: {message}")]
    PipelineFailed {
        /// Stage that failed.
        stage: String,
        /// Error message.
        message: String,
    },

    /// Invalid argument value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Refused to overwrite an existing file.
    #[error("{0} already exists (use --force to overwrite)")]
    AlreadyExists(String),
}
