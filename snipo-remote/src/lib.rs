//! Remote synchronization for Snipo backups.
//!
//! Wraps the [`snipo_backup`] engine with S3-compatible object storage:
//! one-shot upload of fresh exports, listing, download-and-restore,
//! deletion, and presigned-URL issuance. "Sync" here means one-shot
//! transfer, not continuous replication.

pub mod error;
pub mod s3;
pub mod store;
pub mod sync;

pub use error::{Result, SyncError};
pub use s3::{S3Config, S3RemoteStore};
pub use store::{RemoteObject, RemoteStore};
pub use sync::{RemoteSync, BACKUP_KEY_PREFIX};
