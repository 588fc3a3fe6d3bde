//! Remote sync error types.

use thiserror::Error;

/// Errors surfaced by the remote sync adapter.
///
/// Object-storage failures abort the whole operation; per-record import
/// failures do not reach here — they ride inside the returned
/// `ImportResult`.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Remote object not found
    #[error("Remote backup not found: {0}")]
    NotFound(String),

    /// Remote storage operation failed
    #[error("Remote storage error: {0}")]
    Remote(String),

    /// Object store error
    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    /// Storage configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure inside the nested export or import pipeline
    #[error(transparent)]
    Engine(#[from] snipo_backup::Error),
}

/// Result type for remote sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
