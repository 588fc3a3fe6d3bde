//! Snapshot data model.
//!
//! A `Snapshot` is the complete, self-contained representation of the
//! exportable data graph. It is a pure value: identifiers carried in the
//! records come from the source system and are advisory only — nothing may
//! assume they are valid in any other store. Tags and folders are embedded
//! in snippets by value so a snapshot can be replayed into a store with a
//! disjoint identifier space.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current snapshot format version, stamped into every export.
pub const FORMAT_VERSION: &str = "1.0";

/// The full exportable data graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Format version marker. A snapshot with an empty version is invalid.
    pub version: String,
    /// Export timestamp (RFC 3339 on the wire).
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub snippets: Vec<SnippetRecord>,
    #[serde(default)]
    pub tags: Vec<TagRecord>,
    #[serde(default)]
    pub folders: Vec<FolderRecord>,
}

impl Snapshot {
    /// Create an empty snapshot stamped with the current format version and
    /// the current time.
    pub fn new() -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            created_at: Utc::now(),
            snippets: Vec::new(),
            tags: Vec::new(),
            folders: Vec::new(),
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// A snippet with its full detail: files, and tags/folders by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnippetRecord {
    /// Source-system identifier. Advisory only.
    #[serde(default)]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Legacy single-file content. Snippets created since multi-file
    /// support carry their content in `files` instead.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub files: Vec<FileRecord>,
    #[serde(default)]
    pub tags: Vec<TagRecord>,
    #[serde(default)]
    pub folders: Vec<FolderRecord>,
}

/// A tag. Name is the natural key across system boundaries: two tags are
/// the same iff their names match exactly, never by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRecord {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// A folder. Name is the natural key; `parent_id` refers to another
/// `FolderRecord.id` within the same snapshot and is meaningless outside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderRecord {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub sort_order: i32,
}

/// An ordered child of exactly one snippet. Has no independent identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub filename: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub sort_order: i32,
}

/// Outcome accumulator for an import run.
///
/// This is not a transaction log: an entry in `errors` does not roll back
/// prior successful writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    pub snippets_imported: usize,
    pub tags_imported: usize,
    pub folders_imported: usize,
    pub errors: Vec<String>,
}

/// Lightweight snippet projection returned by list queries. The detail
/// projection (`SnippetRecord`) is fetched per id during export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnippetSummary {
    pub id: i64,
    pub title: String,
}

/// Input for creating a snippet in the live store.
///
/// Tags are attached by name and resolved or created by the store at write
/// time; the folder is attached by live id.
#[derive(Debug, Clone, Default)]
pub struct SnippetInput {
    pub title: String,
    pub description: String,
    pub content: String,
    pub language: String,
    pub is_public: bool,
    pub is_archived: bool,
    pub folder_id: Option<i64>,
    pub tag_names: Vec<String>,
    pub files: Vec<FileRecord>,
}

/// Input for creating a folder in the live store. Parent assignment happens
/// separately through `FolderStore::move_folder`.
#[derive(Debug, Clone, Default)]
pub struct FolderInput {
    pub name: String,
    pub icon: String,
    pub sort_order: i32,
}
