//! Per-invocation context.

use std::path::{Path, PathBuf};

/// Base name used when the source path has no usable file stem.
pub const FALLBACK_BASE_NAME: &str = "holdings";

/// Everything one pipeline invocation needs besides its input.
///
/// Each invocation gets its own context; nothing is shared between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    /// Prefix of every artifact file name.
    pub base_name: String,
    /// Directory the artifacts are written to.
    pub output_dir: PathBuf,
}

impl InvocationContext {
    /// Creates a context with an explicit base name.
    pub fn new(base_name: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_name: base_name.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Creates a context whose base name is the file stem of `source`.
    pub fn for_source(source: &Path, output_dir: impl Into<PathBuf>) -> Self {
        Self::new(default_base_name(source), output_dir)
    }
}

/// File stem of `source`, or [`FALLBACK_BASE_NAME`].
pub fn default_base_name(source: &Path) -> String {
    source
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(FALLBACK_BASE_NAME)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name_from_stem() {
        let ctx = InvocationContext::for_source(Path::new("/saved/Empower Holdings.mhtml"), "out");
        assert_eq!(ctx.base_name, "Empower Holdings");
        assert_eq!(ctx.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_fallback_base_name() {
        assert_eq!(default_base_name(Path::new("/")), FALLBACK_BASE_NAME);
        assert_eq!(default_base_name(Path::new("archive.tar.gz")), "archive.tar");
    }
}
