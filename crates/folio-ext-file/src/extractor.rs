//! File-based text extraction.

use std::fs;
use std::path::Path;

use folio_core::traits::TextExtractor;
use folio_core::{FolioError, FolioResult};
use tracing::debug;

const UTF8_BOM: char = '\u{feff}';

/// Reads raw text that was already extracted from a saved page.
///
/// Fails with [`FolioError::Extraction`] when the file cannot be read, is not
/// UTF-8, or holds nothing but whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTextExtractor;

impl FileTextExtractor {
    /// Create a new file text extractor.
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for FileTextExtractor {
    fn extract(&self, source: &Path) -> FolioResult<String> {
        let bytes = fs::read(source).map_err(|e| {
            FolioError::extraction(format!("cannot read {}: {}", source.display(), e))
        })?;

        let text = String::from_utf8(bytes).map_err(|_| {
            FolioError::extraction(format!("{} is not valid UTF-8 text", source.display()))
        })?;
        let text = text.strip_prefix(UTF8_BOM).map(str::to_string).unwrap_or(text);

        if text.trim().is_empty() {
            return Err(FolioError::extraction(format!(
                "no content extracted from {}",
                source.display()
            )));
        }

        debug!(path = %source.display(), bytes = text.len(), "Extracted text");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::ErrorKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_reads_text() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "\u{feff}Name\tValue\nApple\t$1.00\n").unwrap();

        let text = FileTextExtractor::new().extract(file.path()).unwrap();
        assert!(text.starts_with("Name\tValue"));
    }

    #[test]
    fn test_blank_file_is_extraction_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "  \n\t\n").unwrap();

        let err = FileTextExtractor::new().extract(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Extraction);
        assert!(err.to_string().contains("no content"));
    }

    #[test]
    fn test_missing_file_is_extraction_error() {
        let err = FileTextExtractor::new()
            .extract(Path::new("/definitely/not/here.txt"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Extraction);
    }

    #[test]
    fn test_binary_file_is_extraction_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0x80]).unwrap();

        let err = FileTextExtractor::new().extract(file.path()).unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }
}
