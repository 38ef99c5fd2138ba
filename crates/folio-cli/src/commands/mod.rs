//! CLI command implementations.

pub mod config;
pub mod process;
pub mod sessions;

pub use config::ConfigArgs;
pub use process::ProcessArgs;
pub use sessions::SessionsArgs;

use std::path::PathBuf;
use std::time::Duration;

use folio_config::FolioConfig;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Output format.
    pub format: OutputFormat,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Effective configuration.
    pub config: FolioConfig,
    /// Configuration file given on the command line, if any.
    pub config_path: Option<PathBuf>,
}

/// Converts an hour count into a duration, rejecting zero.
pub fn max_age_from_hours(hours: u64) -> Result<Duration, CliError> {
    if hours == 0 {
        return Err(CliError::InvalidArgument(
            "max age must be at least one hour".into(),
        ));
    }
    Ok(Duration::from_secs(hours.saturating_mul(3600)))
}
