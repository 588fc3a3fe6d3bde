//! S3-compatible remote store.
//!
//! Uses the `object_store` crate for S3, MinIO, and other S3-compatible
//! services.
//!
//! # Configuration
//!
//! ```toml
//! [remote.s3]
//! bucket = "snipo-backups"
//! region = "us-east-1"
//!
//! # Optional: for MinIO or other S3-compatible services
//! endpoint = "http://localhost:9000"
//! force_path_style = true
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path as ObjectPath;
use object_store::signer::Signer;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{Result, SyncError};
use crate::store::{RemoteObject, RemoteStore};

/// Configuration for the S3 remote store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    /// S3 bucket name
    pub bucket: String,
    /// AWS region
    #[serde(default = "default_region")]
    pub region: String,
    /// Optional prefix prepended to all keys
    #[serde(default)]
    pub prefix: Option<String>,
    /// Optional custom endpoint (for MinIO, etc.)
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Use path-style requests (required for MinIO)
    #[serde(default)]
    pub force_path_style: bool,
    /// Optional access key (if not using IAM/env credentials)
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// Optional secret key
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// Allow HTTP (non-HTTPS) connections
    #[serde(default)]
    pub allow_http: bool,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl S3Config {
    /// Create a new configuration for AWS.
    pub fn aws(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            prefix: None,
            endpoint: None,
            force_path_style: false,
            access_key_id: None,
            secret_access_key: None,
            allow_http: false,
        }
    }

    /// Create configuration for MinIO or other S3-compatible services.
    pub fn minio(bucket: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: default_region(),
            prefix: None,
            endpoint: Some(endpoint.into()),
            force_path_style: true,
            access_key_id: None,
            secret_access_key: None,
            allow_http: true,
        }
    }

    /// Set an optional key prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set explicit credentials.
    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }
}

/// S3-compatible remote store.
#[derive(Clone)]
pub struct S3RemoteStore {
    store: Arc<AmazonS3>,
    prefix: String,
}

impl S3RemoteStore {
    /// Build the store from configuration.
    pub fn new(config: S3Config) -> Result<Self> {
        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region)
            .with_allow_http(config.allow_http);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.with_endpoint(endpoint);
        }

        if config.force_path_style {
            builder = builder.with_virtual_hosted_style_request(false);
        }

        if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            builder = builder
                .with_access_key_id(key_id)
                .with_secret_access_key(secret);
        }

        let store = builder
            .build()
            .map_err(|e| SyncError::Config(e.to_string()))?;

        Ok(Self {
            store: Arc::new(store),
            prefix: config.prefix.unwrap_or_default(),
        })
    }

    fn to_object_path(&self, key: &str) -> ObjectPath {
        if self.prefix.is_empty() {
            ObjectPath::from(key)
        } else {
            ObjectPath::from(format!("{}/{}", self.prefix.trim_end_matches('/'), key))
        }
    }

    fn from_object_path(&self, path: &ObjectPath) -> String {
        let full = path.as_ref();
        if self.prefix.is_empty() {
            full.to_string()
        } else {
            full.strip_prefix(self.prefix.trim_end_matches('/'))
                .map(|s| s.trim_start_matches('/'))
                .unwrap_or(full)
                .to_string()
        }
    }
}

impl std::fmt::Debug for S3RemoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3RemoteStore")
            .field("prefix", &self.prefix)
            .finish()
    }
}

#[async_trait]
impl RemoteStore for S3RemoteStore {
    #[instrument(skip(self, data), fields(key = %key, size = data.len()))]
    async fn upload(&self, key: &str, data: Bytes, content_type: &str) -> Result<()> {
        let path = self.to_object_path(key);
        debug!("Uploading {} bytes to s3://{:?}", data.len(), path);

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());

        self.store
            .put_opts(&path, data.into(), PutOptions::from(attributes))
            .await?;

        Ok(())
    }

    #[instrument(skip(self), fields(key = %key))]
    async fn download(&self, key: &str) -> Result<Bytes> {
        let path = self.to_object_path(key);
        debug!("Downloading s3://{:?}", path);

        match self.store.get(&path).await {
            Ok(result) => Ok(result.bytes().await?),
            Err(object_store::Error::NotFound { .. }) => {
                Err(SyncError::NotFound(key.to_string()))
            }
            Err(e) => Err(SyncError::from(e)),
        }
    }

    #[instrument(skip(self), fields(prefix = %prefix))]
    async fn list(&self, prefix: &str) -> Result<Vec<RemoteObject>> {
        use futures::TryStreamExt;

        let obj_prefix = self.to_object_path(prefix);
        debug!("Listing s3://{:?}", obj_prefix);

        let mut results = Vec::new();
        let mut stream = self.store.list(Some(&obj_prefix));

        while let Some(meta) = stream.try_next().await? {
            results.push(RemoteObject {
                key: self.from_object_path(&meta.location),
                size: meta.size as u64,
                last_modified: Some(meta.last_modified),
            });
        }

        Ok(results)
    }

    #[instrument(skip(self), fields(key = %key))]
    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.to_object_path(key);
        debug!("Deleting s3://{:?}", path);

        match self.store.delete(&path).await {
            Ok(()) => Ok(()),
            Err(object_store::Error::NotFound { .. }) => Ok(()), // Idempotent
            Err(e) => Err(SyncError::from(e)),
        }
    }

    #[instrument(skip(self), fields(key = %key, ttl_secs = ttl.as_secs()))]
    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<String> {
        let path = self.to_object_path(key);
        let url = self.store.signed_url(http::Method::GET, &path, ttl).await?;
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_aws() {
        let config = S3Config::aws("my-bucket", "eu-west-1");
        assert_eq!(config.bucket, "my-bucket");
        assert_eq!(config.region, "eu-west-1");
        assert!(!config.force_path_style);
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn config_minio() {
        let config = S3Config::minio("local-bucket", "http://localhost:9000")
            .with_credentials("minioadmin", "minioadmin");
        assert!(config.force_path_style);
        assert!(config.allow_http);
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: S3Config = serde_json::from_str(r#"{"bucket": "b"}"#).unwrap();
        assert_eq!(config.region, "us-east-1");
        assert!(!config.allow_http);
    }

    #[test]
    fn key_prefix_roundtrip() {
        let store = S3RemoteStore {
            store: Arc::new(
                AmazonS3Builder::new()
                    .with_bucket_name("test")
                    .with_region("us-east-1")
                    .with_access_key_id("k")
                    .with_secret_access_key("s")
                    .build()
                    .unwrap(),
            ),
            prefix: "tenant-a/".to_string(),
        };

        let path = store.to_object_path("backups/file.json");
        assert_eq!(path.as_ref(), "tenant-a/backups/file.json");
        assert_eq!(store.from_object_path(&path), "backups/file.json");
    }
}
