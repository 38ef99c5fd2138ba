//! Session workspaces.
//!
//! Each run can write into its own directory under a shared output root,
//! named `<YYYYMMDD>_<8 hex chars>`. Old session directories are removed by
//! [`prune_stale_sessions`].

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::Local;
use folio_core::{FolioError, FolioResult};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

const DATE_LEN: usize = 8;
const SUFFIX_LEN: usize = 8;

/// A per-run output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionWorkspace {
    id: String,
    path: PathBuf,
}

impl SessionWorkspace {
    /// Creates a fresh session directory under `root`.
    pub fn create(root: impl AsRef<Path>) -> FolioResult<Self> {
        let root = root.as_ref();
        let id = new_session_id();
        let path = root.join(&id);

        fs::create_dir_all(&path).map_err(|e| {
            FolioError::artifact(
                "session",
                format!("cannot create {}: {}", path.display(), e),
            )
        })?;

        debug!(session = %id, path = %path.display(), "Created session workspace");
        Ok(Self { id, path })
    }

    /// Session identifier, which is also the directory name.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Session directory.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn new_session_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}_{}",
        Local::now().format("%Y%m%d"),
        &suffix[..SUFFIX_LEN]
    )
}

/// Returns true if `name` looks like a session directory name.
pub fn is_session_name(name: &str) -> bool {
    match name.split_once('_') {
        Some((date, suffix)) => {
            date.len() == DATE_LEN
                && date.bytes().all(|b| b.is_ascii_digit())
                && suffix.len() == SUFFIX_LEN
                && suffix.bytes().all(|b| b.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Result of a pruning sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PruneReport {
    /// Session directories removed.
    pub removed: Vec<PathBuf>,
    /// Session directories that could not be inspected or removed.
    pub failed: Vec<PathBuf>,
}

/// Removes session directories under `root` older than `max_age`.
///
/// Only directories with session-shaped names are considered, and the one
/// named `keep` is always left alone. A missing root is not an error. Failures
/// on individual directories are logged and recorded; the sweep continues.
pub fn prune_stale_sessions(root: &Path, max_age: Duration, keep: Option<&str>) -> PruneReport {
    let mut report = PruneReport::default();

    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return report,
        Err(e) => {
            warn!(root = %root.display(), error = %e, "Cannot read session root");
            report.failed.push(root.to_path_buf());
            return report;
        }
    };

    let now = SystemTime::now();
    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !is_session_name(name) || keep == Some(name) {
            continue;
        }

        let path = entry.path();
        let modified = entry.metadata().and_then(|m| {
            if m.is_dir() {
                m.modified().map(Some)
            } else {
                Ok(None)
            }
        });

        let modified = match modified {
            Ok(Some(modified)) => modified,
            Ok(None) => continue,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot inspect session directory");
                report.failed.push(path);
                continue;
            }
        };

        let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
        if age <= max_age {
            continue;
        }

        match fs::remove_dir_all(&path) {
            Ok(()) => {
                debug!(path = %path.display(), age_secs = age.as_secs(), "Removed stale session");
                report.removed.push(path);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot remove stale session");
                report.failed.push(path);
            }
        }
    }

    if !report.removed.is_empty() {
        info!(count = report.removed.len(), root = %root.display(), "Pruned stale sessions");
    }
    report
}
