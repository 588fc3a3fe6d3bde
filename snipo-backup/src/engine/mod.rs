//! Backup engine: export and import pipelines.
//!
//! The engine is request-scoped and sequential: one export or import runs
//! start-to-finish on the calling task, holds the whole snapshot in memory,
//! and takes no locks of its own. Concurrent imports against the same store
//! must be serialized by the caller.

mod export;
mod import;

use std::sync::Arc;

use chrono::Utc;

use crate::codec::BackupFormat;
use crate::store::{FolderStore, SnippetStore, TagStore};

/// Conflict policy for import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportStrategy {
    /// Wipe all snippets, tags and folders before writing anything.
    Replace,
    /// Skip snapshot snippets whose title already exists live.
    #[default]
    Merge,
    /// Currently identical to `Merge`. Both variants are kept so a future
    /// divergence (merging tags onto an existing snippet, say) is a local
    /// change.
    Skip,
}

impl std::fmt::Display for ImportStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportStrategy::Replace => write!(f, "replace"),
            ImportStrategy::Merge => write!(f, "merge"),
            ImportStrategy::Skip => write!(f, "skip"),
        }
    }
}

impl std::str::FromStr for ImportStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "replace" => Ok(ImportStrategy::Replace),
            "merge" => Ok(ImportStrategy::Merge),
            "skip" => Ok(ImportStrategy::Skip),
            _ => Err(format!(
                "Invalid import strategy '{}'. Use 'replace', 'merge' or 'skip'",
                s
            )),
        }
    }
}

/// Options for an export run.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub format: BackupFormat,
    /// When set and non-empty, the encoded snapshot is sealed and the
    /// filename gains an `.enc` suffix.
    pub password: Option<String>,
}

/// Options for an import run.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub strategy: ImportStrategy,
    pub password: Option<String>,
}

/// The backup engine. Talks to the live store only through the repository
/// traits.
#[derive(Clone)]
pub struct BackupEngine {
    snippets: Arc<dyn SnippetStore>,
    tags: Arc<dyn TagStore>,
    folders: Arc<dyn FolderStore>,
}

impl BackupEngine {
    pub fn new(
        snippets: Arc<dyn SnippetStore>,
        tags: Arc<dyn TagStore>,
        folders: Arc<dyn FolderStore>,
    ) -> Self {
        Self {
            snippets,
            tags,
            folders,
        }
    }
}

/// Build the artifact filename: `snipo-backup-<YYYY-MM-DD-HHMMSS>.<ext>`,
/// suffixed with `.enc` when the payload is sealed.
pub(crate) fn backup_filename(format: BackupFormat, encrypted: bool) -> String {
    let stamp = Utc::now().format("%Y-%m-%d-%H%M%S");
    let mut name = format!("snipo-backup-{}.{}", stamp, format.extension());
    if encrypted {
        name.push_str(".enc");
    }
    name
}
