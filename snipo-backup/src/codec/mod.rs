//! Snapshot serialization.
//!
//! Supports two container formats:
//! - **Json**: the snapshot as one structured JSON document. Round-trips
//!   losslessly; the natural choice for small backups and diffing.
//! - **Zip**: an archive with human-readable per-snippet file entries plus
//!   exactly one `metadata.json` manifest carrying the JSON document form.
//!   The manifest is the source of truth on re-import.

mod archive;
mod document;

pub use archive::{extension_for_language, sanitize_title, MANIFEST_ENTRY};

use crate::error::Result;
use crate::model::Snapshot;

/// Backup container format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackupFormat {
    /// Single structured JSON document
    #[default]
    Json,
    /// Zip archive with per-snippet entries and a manifest
    Zip,
}

impl BackupFormat {
    /// File extension for the unencrypted artifact.
    pub fn extension(&self) -> &'static str {
        match self {
            BackupFormat::Json => "json",
            BackupFormat::Zip => "zip",
        }
    }

    /// Content type for remote upload of the unencrypted artifact.
    pub fn content_type(&self) -> &'static str {
        match self {
            BackupFormat::Json => "application/json",
            BackupFormat::Zip => "application/zip",
        }
    }
}

impl std::fmt::Display for BackupFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackupFormat::Json => write!(f, "json"),
            BackupFormat::Zip => write!(f, "zip"),
        }
    }
}

impl std::str::FromStr for BackupFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" | "document" => Ok(BackupFormat::Json),
            "zip" | "archive" => Ok(BackupFormat::Zip),
            _ => Err(format!("Invalid backup format '{}'. Use 'json' or 'zip'", s)),
        }
    }
}

/// Serialize a snapshot into the requested container format.
pub fn encode(snapshot: &Snapshot, format: BackupFormat) -> Result<Vec<u8>> {
    match format {
        BackupFormat::Json => document::encode(snapshot),
        BackupFormat::Zip => archive::encode(snapshot),
    }
}

/// Deserialize a snapshot, detecting the container format from the bytes.
///
/// Callers cannot be expected to know how the bytes were produced —
/// decryption strips any extension signal — so the format is probed: a
/// cheap structural JSON decode first, then the zip manifest.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] when neither shape is recognized or the
/// manifest carries no version marker.
pub fn decode(bytes: &[u8]) -> Result<(Snapshot, BackupFormat)> {
    if let Ok(snapshot) = document::decode(bytes) {
        return Ok((snapshot, BackupFormat::Json));
    }

    let snapshot = archive::decode(bytes)?;
    Ok((snapshot, BackupFormat::Zip))
}
