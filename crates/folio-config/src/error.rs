//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration operation result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("Cannot read configuration file {}: {message}", path.display())]
    Io {
        /// The file that failed to load.
        path: PathBuf,
        /// Underlying I/O error message.
        message: String,
    },

    /// Validation error.
    #[error("Validation error: {field}: {message}")]
    Validation {
        /// Field that failed validation.
        field: String,
        /// Validation error message.
        message: String,
    },

    /// Multiple validation errors.
    #[error("Multiple validation errors: {}", join_errors(.0))]
    MultipleValidationErrors(Vec<ValidationError>),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single invalid setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Setting name as written in the TOML file.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Deserialization(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialization(err.to_string())
    }
}

/// Implemented by settings that can be checked after loading.
pub trait Validate {
    /// Every problem found; empty when the settings are usable.
    fn validate(&self) -> Vec<ValidationError>;

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Folds the problems found into a single [`ConfigError`].
    fn validate_or_error(&self) -> ConfigResult<()> {
        let mut errors = self.validate();
        if errors.len() > 1 {
            return Err(ConfigError::MultipleValidationErrors(errors));
        }
        match errors.pop() {
            None => Ok(()),
            Some(ValidationError { field, message }) => {
                Err(ConfigError::Validation { field, message })
            }
        }
    }
}
