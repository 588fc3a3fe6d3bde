//! In-memory repository doubles for pipeline tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use snipo_backup::error::{Error, Result};
use snipo_backup::model::{
    FolderInput, FolderRecord, SnippetInput, SnippetRecord, SnippetSummary, TagRecord,
};
use snipo_backup::store::{FolderStore, SnippetStore, TagStore};
use snipo_backup::BackupEngine;

#[derive(Default)]
struct Inner {
    snippets: Vec<SnippetRecord>,
    tags: Vec<TagRecord>,
    folders: Vec<FolderRecord>,
    /// Snippet ids whose detail fetch should fail.
    broken_details: HashSet<i64>,
}

/// One struct backing all three repository traits, so snippet creation can
/// resolve tag names and folder ids the way the real store does.
#[derive(Default)]
pub struct MemStore {
    inner: Mutex<Inner>,
    next_id: AtomicI64,
}

impl MemStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(Inner::default()),
            next_id: AtomicI64::new(1),
        })
    }

    fn alloc_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Make `get_detail` fail for the given snippet id.
    pub fn break_detail(&self, id: i64) {
        self.inner.lock().unwrap().broken_details.insert(id);
    }

    pub fn snippet_titles(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .snippets
            .iter()
            .map(|s| s.title.clone())
            .collect()
    }

    pub fn snippet_by_title(&self, title: &str) -> Option<SnippetRecord> {
        self.inner
            .lock()
            .unwrap()
            .snippets
            .iter()
            .find(|s| s.title == title)
            .cloned()
    }

    pub fn tag_names(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .tags
            .iter()
            .map(|t| t.name.clone())
            .collect()
    }

    pub fn folder_by_name(&self, name: &str) -> Option<FolderRecord> {
        self.inner
            .lock()
            .unwrap()
            .folders
            .iter()
            .find(|f| f.name == name)
            .cloned()
    }
}

#[async_trait]
impl SnippetStore for MemStore {
    async fn list_all(&self) -> Result<Vec<SnippetSummary>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .snippets
            .iter()
            .map(|s| SnippetSummary {
                id: s.id,
                title: s.title.clone(),
            })
            .collect())
    }

    async fn get_detail(&self, id: i64) -> Result<SnippetRecord> {
        let inner = self.inner.lock().unwrap();
        if inner.broken_details.contains(&id) {
            return Err(Error::Store(format!("detail fetch failed for {}", id)));
        }
        inner
            .snippets
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| Error::Store(format!("snippet {} not found", id)))
    }

    async fn create(&self, input: SnippetInput) -> Result<SnippetRecord> {
        if input.title.is_empty() {
            return Err(Error::Store("title is required".to_string()));
        }

        // Resolve tags by name at write time, creating missing ones.
        let mut tags = Vec::new();
        for name in &input.tag_names {
            let existing = {
                let inner = self.inner.lock().unwrap();
                inner.tags.iter().find(|t| &t.name == name).cloned()
            };
            let tag = match existing {
                Some(tag) => tag,
                None => {
                    let tag = TagRecord {
                        id: self.alloc_id(),
                        name: name.clone(),
                        color: String::new(),
                    };
                    self.inner.lock().unwrap().tags.push(tag.clone());
                    tag
                }
            };
            tags.push(tag);
        }

        let mut inner = self.inner.lock().unwrap();
        let folders = match input.folder_id {
            Some(folder_id) => {
                let folder = inner
                    .folders
                    .iter()
                    .find(|f| f.id == folder_id)
                    .cloned()
                    .ok_or_else(|| Error::Store(format!("folder {} not found", folder_id)))?;
                vec![folder]
            }
            None => vec![],
        };

        let record = SnippetRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: input.title,
            description: input.description,
            content: input.content,
            language: input.language,
            is_public: input.is_public,
            is_archived: input.is_archived,
            files: input.files,
            tags,
            folders,
        };
        inner.snippets.push(record.clone());
        Ok(record)
    }

    async fn delete_all(&self) -> Result<()> {
        self.inner.lock().unwrap().snippets.clear();
        Ok(())
    }
}

#[async_trait]
impl TagStore for MemStore {
    async fn list_all(&self) -> Result<Vec<TagRecord>> {
        Ok(self.inner.lock().unwrap().tags.clone())
    }

    async fn create(&self, name: &str, color: &str) -> Result<TagRecord> {
        let tag = TagRecord {
            id: self.alloc_id(),
            name: name.to_string(),
            color: color.to_string(),
        };
        self.inner.lock().unwrap().tags.push(tag.clone());
        Ok(tag)
    }

    async fn delete_all(&self) -> Result<()> {
        self.inner.lock().unwrap().tags.clear();
        Ok(())
    }
}

#[async_trait]
impl FolderStore for MemStore {
    async fn list_all(&self) -> Result<Vec<FolderRecord>> {
        Ok(self.inner.lock().unwrap().folders.clone())
    }

    async fn create(&self, input: FolderInput) -> Result<FolderRecord> {
        let folder = FolderRecord {
            id: self.alloc_id(),
            name: input.name,
            parent_id: None,
            icon: input.icon,
            sort_order: input.sort_order,
        };
        self.inner.lock().unwrap().folders.push(folder.clone());
        Ok(folder)
    }

    async fn move_folder(&self, id: i64, new_parent_id: Option<i64>) -> Result<FolderRecord> {
        let mut inner = self.inner.lock().unwrap();

        // Reject cycles by walking the would-be ancestor chain.
        let mut cursor = new_parent_id;
        while let Some(ancestor) = cursor {
            if ancestor == id {
                return Err(Error::Store("circular folder hierarchy".to_string()));
            }
            cursor = inner
                .folders
                .iter()
                .find(|f| f.id == ancestor)
                .and_then(|f| f.parent_id);
        }

        let folder = inner
            .folders
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| Error::Store(format!("folder {} not found", id)))?;
        folder.parent_id = new_parent_id;
        Ok(folder.clone())
    }

    async fn delete_all(&self) -> Result<()> {
        self.inner.lock().unwrap().folders.clear();
        Ok(())
    }
}

/// Wire one `MemStore` into a `BackupEngine`.
pub fn engine_for(store: &Arc<MemStore>) -> BackupEngine {
    BackupEngine::new(store.clone(), store.clone(), store.clone())
}
