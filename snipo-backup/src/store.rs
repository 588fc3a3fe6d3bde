//! Repository trait definitions.
//!
//! The engine never talks to a database directly; it consumes these narrow
//! interfaces. Implementations are expected to enforce their own write
//! semantics (the folder store must reject circular parent chains).
//!
//! # Thread Safety
//!
//! All implementations must be `Send + Sync`; the engine holds them as
//! `Arc<dyn _>`.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{FolderInput, FolderRecord, SnippetInput, SnippetRecord, SnippetSummary, TagRecord};

/// Snippet repository.
#[async_trait]
pub trait SnippetStore: Send + Sync {
    /// List every non-deleted snippet in one unbounded page.
    ///
    /// Normal listing is paginated; export needs all of it in one pass.
    async fn list_all(&self) -> Result<Vec<SnippetSummary>>;

    /// Fetch the full detail projection (files, tags, folders) for one
    /// snippet.
    async fn get_detail(&self, id: i64) -> Result<SnippetRecord>;

    /// Create a snippet. Tag names are resolved or created by the store at
    /// write time.
    async fn create(&self, input: SnippetInput) -> Result<SnippetRecord>;

    /// Delete every snippet and its join relationships.
    async fn delete_all(&self) -> Result<()>;
}

/// Tag repository.
#[async_trait]
pub trait TagStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<TagRecord>>;

    async fn create(&self, name: &str, color: &str) -> Result<TagRecord>;

    async fn delete_all(&self) -> Result<()>;
}

/// Folder repository.
#[async_trait]
pub trait FolderStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<FolderRecord>>;

    /// Create a folder with no parent. Parents are assigned afterwards via
    /// [`FolderStore::move_folder`].
    async fn create(&self, input: FolderInput) -> Result<FolderRecord>;

    /// Re-parent a folder.
    ///
    /// # Errors
    ///
    /// Fails if the move would create a cycle.
    async fn move_folder(&self, id: i64, new_parent_id: Option<i64>) -> Result<FolderRecord>;

    async fn delete_all(&self) -> Result<()>;
}
