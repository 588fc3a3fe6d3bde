//! Object-storage interface consumed by the sync adapter.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::error::Result;

/// Read-only projection of one remote object. Never persisted locally.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteObject {
    /// Full object key, e.g. `backups/snipo-backup-2026-08-28-120000.json`
    pub key: String,
    /// Size in bytes
    pub size: u64,
    /// Last modified timestamp, when the backend reports one
    pub last_modified: Option<DateTime<Utc>>,
}

/// S3-compatible object storage operations.
///
/// Every method is a single round trip with no retry loop; retries are the
/// caller's responsibility.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Upload an object, overwriting any existing one under the key.
    async fn upload(&self, key: &str, data: Bytes, content_type: &str) -> Result<()>;

    /// Download an object.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SyncError::NotFound`] if the key does not exist.
    async fn download(&self, key: &str) -> Result<Bytes>;

    /// List objects under a key prefix.
    async fn list(&self, prefix: &str) -> Result<Vec<RemoteObject>>;

    /// Delete an object. No-op if the key does not exist.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Issue a presigned GET URL valid for `ttl`.
    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<String>;
}
