//! Collaborator traits for the Folio pipeline.
//!
//! The pipeline does not read archive containers or scrape page text itself.
//! It consumes two collaborators:
//!
//! - [`TextExtractor`]: turns a source file into raw text
//! - [`HoldingsParser`]: structures raw text into [`HoldingRecord`]s
//!
//! Both report failure through tagged [`FolioError`](crate::FolioError)
//! variants (`Extraction` and `Parse`). Plain closures implement both traits,
//! which keeps test doubles short.

use std::path::Path;

use crate::error::FolioResult;
use crate::types::HoldingRecord;

/// Extracts raw text from a source file.
pub trait TextExtractor: Send + Sync {
    /// Returns the text content of `source`.
    ///
    /// Implementations return [`FolioError::Extraction`](crate::FolioError::Extraction)
    /// when the source is unreadable or yields no content.
    fn extract(&self, source: &Path) -> FolioResult<String>;
}

/// Structures raw text into holding records.
pub trait HoldingsParser: Send + Sync {
    /// Parses `text` into records in input order.
    ///
    /// Implementations return [`FolioError::Parse`](crate::FolioError::Parse)
    /// when no holdings can be found.
    fn parse(&self, text: &str) -> FolioResult<Vec<HoldingRecord>>;
}

impl<F> TextExtractor for F
where
    F: Fn(&Path) -> FolioResult<String> + Send + Sync,
{
    fn extract(&self, source: &Path) -> FolioResult<String> {
        self(source)
    }
}

impl<F> HoldingsParser for F
where
    F: Fn(&str) -> FolioResult<Vec<HoldingRecord>> + Send + Sync,
{
    fn parse(&self, text: &str) -> FolioResult<Vec<HoldingRecord>> {
        self(text)
    }
}
