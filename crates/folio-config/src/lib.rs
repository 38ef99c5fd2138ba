//! Folio Configuration
//!
//! Settings for the Folio holdings pipeline, loaded from TOML.
//!
//! # Example
//!
//! ```rust
//! use folio_config::{DelimiterChoice, FolioConfig, Validate};
//!
//! let config: FolioConfig = toml::from_str(r#"
//!     top_holdings = 5
//!
//!     [parser]
//!     delimiter = "tab"
//! "#).unwrap();
//!
//! assert_eq!(config.top_holdings, 5);
//! assert_eq!(config.parser.delimiter, DelimiterChoice::Tab);
//! assert_eq!(config.output_root.to_str(), Some("user_files"));
//! assert!(config.is_valid());
//! ```
//!
//! Every key is optional; missing keys take their defaults.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod settings;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use settings::{DelimiterChoice, FolioConfig, ParserConfig, DEFAULT_CONFIG_PATH};
