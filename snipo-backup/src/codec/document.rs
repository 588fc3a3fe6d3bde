//! Flat JSON document format.

use crate::error::{Error, Result};
use crate::model::Snapshot;

/// Serialize the snapshot as a pretty-printed JSON document.
pub fn encode(snapshot: &Snapshot) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(snapshot)
        .map_err(|e| Error::Export(format!("Snapshot serialization failed: {}", e)))
}

/// Parse a JSON document into a snapshot.
///
/// A structurally valid document with an empty `version` is still rejected:
/// the version marker is what distinguishes a snapshot from arbitrary JSON.
pub fn decode(bytes: &[u8]) -> Result<Snapshot> {
    let snapshot: Snapshot = serde_json::from_slice(bytes)
        .map_err(|e| Error::InvalidFormat(format!("Not a snapshot document: {}", e)))?;

    if snapshot.version.is_empty() {
        return Err(Error::InvalidFormat(
            "Snapshot document has no version marker".to_string(),
        ));
    }

    Ok(snapshot)
}
