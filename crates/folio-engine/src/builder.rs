//! Builder pattern for the pipeline.

use std::sync::Arc;

use folio_config::{FolioConfig, Validate};
use folio_core::traits::{HoldingsParser, TextExtractor};
use folio_core::{FolioError, FolioResult};
use folio_ext_file::{DelimitedHoldingsParser, FileTextExtractor};

use crate::pipeline::Pipeline;

/// Builder for constructing a [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<FolioConfig>,
    extractor: Option<Arc<dyn TextExtractor>>,
    parser: Option<Arc<dyn HoldingsParser>>,
}

impl PipelineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder wired with the file extractor and a delimited-table parser
    /// configured from `config`.
    pub fn from_config(config: FolioConfig) -> Self {
        let parser = match config.parser.delimiter.as_byte() {
            Some(delimiter) => DelimitedHoldingsParser::with_delimiter(delimiter),
            None => DelimitedHoldingsParser::new(),
        };
        Self::new()
            .with_extractor(FileTextExtractor::new())
            .with_parser(parser)
            .with_config(config)
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: FolioConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the text extractor.
    pub fn with_extractor(mut self, extractor: impl TextExtractor + 'static) -> Self {
        self.extractor = Some(Arc::new(extractor));
        self
    }

    /// Set the holdings parser.
    pub fn with_parser(mut self, parser: impl HoldingsParser + 'static) -> Self {
        self.parser = Some(Arc::new(parser));
        self
    }

    /// Build the pipeline.
    pub fn build(self) -> FolioResult<Pipeline> {
        let config = self.config.unwrap_or_default();
        config
            .validate_or_error()
            .map_err(|e| FolioError::config(e.to_string()))?;

        let extractor = self
            .extractor
            .ok_or_else(|| FolioError::config("text extractor not configured"))?;

        let parser = self
            .parser
            .ok_or_else(|| FolioError::config("holdings parser not configured"))?;

        Ok(Pipeline::new(extractor, parser, config.top_holdings))
    }
}
