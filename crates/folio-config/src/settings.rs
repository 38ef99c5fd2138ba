//! Folio settings.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Configuration file looked up when none is given explicitly.
pub const DEFAULT_CONFIG_PATH: &str = "folio.toml";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FolioConfig {
    /// Directory under which session workspaces are created.
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,

    /// Number of holdings listed individually in the report.
    #[serde(default = "default_top_holdings")]
    pub top_holdings: usize,

    /// Sessions older than this are pruned.
    #[serde(default = "default_session_max_age_hours")]
    pub session_max_age_hours: u64,

    /// Write each run into its own session directory.
    #[serde(default = "default_true")]
    pub use_sessions: bool,

    /// Holdings parser settings.
    #[serde(default)]
    pub parser: ParserConfig,
}

fn default_output_root() -> PathBuf {
    PathBuf::from("user_files")
}

fn default_top_holdings() -> usize {
    10
}

fn default_session_max_age_hours() -> u64 {
    24
}

fn default_true() -> bool {
    true
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            output_root: default_output_root(),
            top_holdings: default_top_holdings(),
            session_max_age_hours: default_session_max_age_hours(),
            use_sessions: true,
            parser: ParserConfig::default(),
        }
    }
}

impl FolioConfig {
    /// Load and validate configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Load from `path` if given, else from [`DEFAULT_CONFIG_PATH`] if it
    /// exists, else defaults.
    ///
    /// An explicitly given path must exist.
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Maximum session age in seconds.
    pub fn session_max_age_secs(&self) -> u64 {
        self.session_max_age_hours.saturating_mul(3600)
    }
}

impl Validate for FolioConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.top_holdings == 0 {
            errors.push(ValidationError::new("top_holdings", "must be at least 1"));
        }
        if self.session_max_age_hours == 0 {
            errors.push(ValidationError::new(
                "session_max_age_hours",
                "must be greater than 0",
            ));
        }
        if self.output_root.as_os_str().is_empty() {
            errors.push(ValidationError::new("output_root", "must not be empty"));
        }

        errors
    }
}

/// Holdings parser settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParserConfig {
    /// Column delimiter of the holdings table.
    #[serde(default)]
    pub delimiter: DelimiterChoice,
}

/// Column delimiter selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelimiterChoice {
    /// Detect from the header row.
    #[default]
    Auto,
    /// Tab separated.
    Tab,
    /// Comma separated.
    Comma,
    /// Pipe separated.
    Pipe,
    /// Semicolon separated.
    Semicolon,
}

impl DelimiterChoice {
    /// The delimiter byte, or `None` for auto-detection.
    pub fn as_byte(self) -> Option<u8> {
        match self {
            DelimiterChoice::Auto => None,
            DelimiterChoice::Tab => Some(b'\t'),
            DelimiterChoice::Comma => Some(b','),
            DelimiterChoice::Pipe => Some(b'|'),
            DelimiterChoice::Semicolon => Some(b';'),
        }
    }
}

impl fmt::Display for DelimiterChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DelimiterChoice::Auto => "auto",
            DelimiterChoice::Tab => "tab",
            DelimiterChoice::Comma => "comma",
            DelimiterChoice::Pipe => "pipe",
            DelimiterChoice::Semicolon => "semicolon",
        };
        f.write_str(s)
    }
}
