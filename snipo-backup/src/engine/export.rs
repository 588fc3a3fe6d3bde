//! Export pipeline: gather live data into a snapshot, encode it, and
//! optionally seal it.

use tracing::{debug, info, warn};

use super::{backup_filename, BackupEngine, ExportOptions};
use crate::cipher;
use crate::codec;
use crate::error::Result;
use crate::model::Snapshot;

impl BackupEngine {
    /// Export the full data graph.
    ///
    /// Returns the artifact bytes and the filename to serve them under.
    /// Export is best-effort: a snippet whose detail fetch fails is logged
    /// and skipped, never fatal.
    pub async fn export(&self, options: &ExportOptions) -> Result<(Vec<u8>, String)> {
        let snapshot = self.collect_snapshot().await?;
        info!(
            snippets = snapshot.snippets.len(),
            tags = snapshot.tags.len(),
            folders = snapshot.folders.len(),
            format = %options.format,
            "Exporting snapshot"
        );

        let encoded = codec::encode(&snapshot, options.format)?;

        match options.password.as_deref().filter(|p| !p.is_empty()) {
            Some(password) => {
                let sealed = cipher::seal(&encoded, password)?;
                Ok((sealed, backup_filename(options.format, true)))
            }
            None => Ok((encoded, backup_filename(options.format, false))),
        }
    }

    /// Pull every snippet (enriched to full detail), all tags, and all
    /// folders into a fresh snapshot.
    ///
    /// Tags and folders are fetched independently of the snippets so that
    /// unused ones survive a backup cycle.
    async fn collect_snapshot(&self) -> Result<Snapshot> {
        let mut snapshot = Snapshot::new();

        let summaries = self.snippets.list_all().await?;
        debug!(count = summaries.len(), "Collected snippet summaries");

        for summary in summaries {
            // The list projection is deliberately lighter than the detail
            // projection; re-fetch to get files, tags and folders.
            match self.snippets.get_detail(summary.id).await {
                Ok(detail) => snapshot.snippets.push(detail),
                Err(e) => {
                    warn!(
                        snippet_id = summary.id,
                        title = %summary.title,
                        error = %e,
                        "Skipping snippet, detail fetch failed"
                    );
                }
            }
        }

        snapshot.tags = self.tags.list_all().await?;
        snapshot.folders = self.folders.list_all().await?;

        Ok(snapshot)
    }
}
