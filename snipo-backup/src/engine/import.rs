//! Import pipeline: merge a snapshot into the live store.
//!
//! Identifiers are not portable across systems, so every cross-reference is
//! resolved through natural keys: tag and folder names, snippet titles. The
//! import is best-effort by design — individual record failures accumulate
//! in [`ImportResult::errors`] while the pipeline proceeds; there is no
//! all-or-nothing transaction.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use super::{BackupEngine, ImportOptions, ImportStrategy};
use crate::cipher;
use crate::codec;
use crate::error::Result;
use crate::model::{FolderInput, ImportResult, Snapshot, SnippetInput};

/// Mapping from snapshot folder ids to live folder ids, plus the set of
/// snapshot ids whose folders were created by this import run.
struct FolderMapping {
    live_id: HashMap<i64, i64>,
    created: HashSet<i64>,
}

impl BackupEngine {
    /// Import a backup artifact.
    ///
    /// Hard failures — bad password, unrecognized container — abort before
    /// anything is written. Once writing starts, per-record failures are
    /// collected and never abort the run.
    pub async fn import(&self, bytes: &[u8], options: &ImportOptions) -> Result<ImportResult> {
        let opened;
        let payload: &[u8] = match options.password.as_deref().filter(|p| !p.is_empty()) {
            Some(password) => {
                opened = cipher::open(bytes, password)?;
                &opened
            }
            None => bytes,
        };

        let (snapshot, format) = codec::decode(payload)?;
        info!(
            version = %snapshot.version,
            format = %format,
            strategy = %options.strategy,
            snippets = snapshot.snippets.len(),
            tags = snapshot.tags.len(),
            folders = snapshot.folders.len(),
            "Importing snapshot"
        );

        let mut result = ImportResult::default();

        if options.strategy == ImportStrategy::Replace {
            // Point of no return: the wipe is the first mutating step.
            self.snippets.delete_all().await?;
            self.tags.delete_all().await?;
            self.folders.delete_all().await?;
        }

        self.import_tags(&snapshot, &mut result).await?;
        let folders = self.import_folders(&snapshot, &mut result).await?;
        self.import_snippets(&snapshot, &folders, &mut result).await?;

        Ok(result)
    }

    /// Resolve or create every snapshot tag by name.
    ///
    /// A name already live resolves without a write; a name created here is
    /// added to the lookup table so a duplicate within the same snapshot
    /// resolves to it instead of creating a second tag. No snapshot-id to
    /// live-id map is kept for tags: snippets attach tags by name at write
    /// time, so nothing downstream would consume it.
    async fn import_tags(&self, snapshot: &Snapshot, result: &mut ImportResult) -> Result<()> {
        let mut by_name: HashSet<String> = self
            .tags
            .list_all()
            .await?
            .into_iter()
            .map(|t| t.name)
            .collect();

        for tag in &snapshot.tags {
            if by_name.contains(&tag.name) {
                debug!(name = %tag.name, "Tag already exists, resolved by name");
                continue;
            }

            match self.tags.create(&tag.name, &tag.color).await {
                Ok(_) => {
                    by_name.insert(tag.name.clone());
                    result.tags_imported += 1;
                }
                Err(e) => {
                    warn!(name = %tag.name, error = %e, "Tag import failed");
                    result.errors.push(format!("Tag '{}': {}", tag.name, e));
                }
            }
        }

        Ok(())
    }

    /// Resolve or create folders, then restore the hierarchy.
    ///
    /// Two passes: the first creates or resolves every folder with no
    /// parent assignment, building the snapshot-id to live-id map. The
    /// second re-parents only folders this run created — a folder that
    /// already existed keeps whatever parent it already had.
    async fn import_folders(
        &self,
        snapshot: &Snapshot,
        result: &mut ImportResult,
    ) -> Result<FolderMapping> {
        let mut by_name: HashMap<String, i64> = self
            .folders
            .list_all()
            .await?
            .into_iter()
            .map(|f| (f.name, f.id))
            .collect();

        let mut mapping = FolderMapping {
            live_id: HashMap::new(),
            created: HashSet::new(),
        };

        for folder in &snapshot.folders {
            if let Some(&live_id) = by_name.get(&folder.name) {
                mapping.live_id.insert(folder.id, live_id);
                continue;
            }

            let input = FolderInput {
                name: folder.name.clone(),
                icon: folder.icon.clone(),
                sort_order: folder.sort_order,
            };
            match self.folders.create(input).await {
                Ok(created) => {
                    by_name.insert(folder.name.clone(), created.id);
                    mapping.live_id.insert(folder.id, created.id);
                    mapping.created.insert(folder.id);
                    result.folders_imported += 1;
                }
                Err(e) => {
                    warn!(name = %folder.name, error = %e, "Folder import failed");
                    result.errors.push(format!("Folder '{}': {}", folder.name, e));
                }
            }
        }

        for folder in &snapshot.folders {
            let Some(parent_id) = folder.parent_id else {
                continue;
            };
            if !mapping.created.contains(&folder.id) {
                continue;
            }

            let Some(&live_id) = mapping.live_id.get(&folder.id) else {
                continue;
            };
            match mapping.live_id.get(&parent_id) {
                Some(&live_parent) => {
                    if let Err(e) = self.folders.move_folder(live_id, Some(live_parent)).await {
                        warn!(name = %folder.name, error = %e, "Folder re-parent failed");
                        result
                            .errors
                            .push(format!("Folder '{}' parent: {}", folder.name, e));
                    }
                }
                None => {
                    result.errors.push(format!(
                        "Folder '{}': parent {} not found in snapshot",
                        folder.name, parent_id
                    ));
                }
            }
        }

        Ok(mapping)
    }

    /// Create snapshot snippets that do not collide by title.
    ///
    /// `merge` and `skip` both skip on collision; they are kept as distinct
    /// strategies pending a product decision on whether `merge` should
    /// union tags/folders onto the existing snippet.
    async fn import_snippets(
        &self,
        snapshot: &Snapshot,
        folders: &FolderMapping,
        result: &mut ImportResult,
    ) -> Result<()> {
        let mut titles: HashSet<String> = self
            .snippets
            .list_all()
            .await?
            .into_iter()
            .map(|s| s.title)
            .collect();

        for snippet in &snapshot.snippets {
            if titles.contains(&snippet.title) {
                debug!(title = %snippet.title, "Snippet title exists, skipped");
                continue;
            }
            if snippet.title.is_empty() {
                result
                    .errors
                    .push(format!("Snippet {}: missing title", snippet.id));
                continue;
            }

            // Only the first listed folder survives import. Multi-folder
            // membership is dropped so that restores of existing backups
            // keep producing the same result.
            let folder_id = snippet
                .folders
                .first()
                .and_then(|f| folders.live_id.get(&f.id))
                .copied();

            let input = SnippetInput {
                title: snippet.title.clone(),
                description: snippet.description.clone(),
                content: snippet.content.clone(),
                language: snippet.language.clone(),
                is_public: snippet.is_public,
                is_archived: snippet.is_archived,
                folder_id,
                // Attached by name; the store resolves or creates tags at
                // write time.
                tag_names: snippet.tags.iter().map(|t| t.name.clone()).collect(),
                files: snippet.files.clone(),
            };

            match self.snippets.create(input).await {
                Ok(_) => {
                    titles.insert(snippet.title.clone());
                    result.snippets_imported += 1;
                }
                Err(e) => {
                    warn!(title = %snippet.title, error = %e, "Snippet import failed");
                    result
                        .errors
                        .push(format!("Snippet '{}': {}", snippet.title, e));
                }
            }
        }

        Ok(())
    }
}
