//! Remote sync orchestration: thin wrapping of export/import over an
//! object store.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use snipo_backup::{BackupEngine, ExportOptions, ImportOptions, ImportResult};
use tracing::info;

use crate::error::Result;
use crate::store::{RemoteObject, RemoteStore};

/// Key prefix all backup artifacts live under.
pub const BACKUP_KEY_PREFIX: &str = "backups/";

/// Remote synchronization adapter.
///
/// Every operation is one blocking round trip; a remote-storage failure
/// aborts that operation. Per-record errors produced by a nested import are
/// merged into the returned [`ImportResult`] rather than raised.
#[derive(Clone)]
pub struct RemoteSync {
    engine: BackupEngine,
    remote: Arc<dyn RemoteStore>,
}

impl RemoteSync {
    pub fn new(engine: BackupEngine, remote: Arc<dyn RemoteStore>) -> Self {
        Self { engine, remote }
    }

    /// Export a fresh backup and upload it. Returns the remote key.
    pub async fn sync_to_remote(&self, options: &ExportOptions) -> Result<String> {
        let (bytes, filename) = self.engine.export(options).await?;

        let encrypted = options
            .password
            .as_deref()
            .is_some_and(|p| !p.is_empty());
        let content_type = if encrypted {
            "application/octet-stream"
        } else {
            options.format.content_type()
        };

        let key = format!("{}{}", BACKUP_KEY_PREFIX, filename);
        let size = bytes.len();
        self.remote
            .upload(&key, Bytes::from(bytes), content_type)
            .await?;

        info!(key = %key, size, "Backup uploaded");
        Ok(key)
    }

    /// List all remote backups.
    pub async fn list_remote(&self) -> Result<Vec<RemoteObject>> {
        self.remote.list(BACKUP_KEY_PREFIX).await
    }

    /// Download a remote backup and import it.
    pub async fn restore_from_remote(
        &self,
        key: &str,
        options: &ImportOptions,
    ) -> Result<ImportResult> {
        let bytes = self.remote.download(key).await?;
        info!(key = %key, size = bytes.len(), "Restoring from remote backup");
        let result = self.engine.import(&bytes, options).await?;
        Ok(result)
    }

    /// Delete a remote backup.
    pub async fn delete_remote(&self, key: &str) -> Result<()> {
        self.remote.delete(key).await
    }

    /// Issue a presigned download URL for a remote backup.
    pub async fn presigned_download_url(&self, key: &str, ttl: Duration) -> Result<String> {
        self.remote.presign_get(key, ttl).await
    }
}
