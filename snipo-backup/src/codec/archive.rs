//! Zip archive format.
//!
//! Entry layout:
//! - `snippets/<sanitized-title>/<filename>` — one entry per snippet file
//! - `snippets/<sanitized-title>.<ext>` — legacy single-file snippets
//! - `metadata.json` — the full snapshot in document form
//!
//! The per-snippet entries exist for human readability only; re-import
//! reads the manifest. Two snippets sanitizing to the same title share an
//! entry path — an acknowledged limitation, the manifest is unaffected.

use std::collections::HashSet;
use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use super::document;
use crate::error::{Error, Result};
use crate::model::Snapshot;

/// Name of the authoritative manifest entry.
pub const MANIFEST_ENTRY: &str = "metadata.json";

/// Maximum length of a sanitized title, in characters.
const MAX_TITLE_LEN: usize = 50;

/// Build the zip archive for a snapshot.
///
/// Sanitized titles can collide; the zip writer rejects duplicate entry
/// names, so a path already written is skipped rather than failing the
/// whole archive. The skipped snippet is still fully present in the
/// manifest.
pub fn encode(snapshot: &Snapshot) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    let mut written: HashSet<String> = HashSet::new();

    for snippet in &snapshot.snippets {
        let title = sanitize_title(&snippet.title);

        if snippet.files.is_empty() {
            let entry = format!(
                "snippets/{}.{}",
                title,
                extension_for_language(&snippet.language)
            );
            if !written.insert(entry.clone()) {
                continue;
            }
            zip.start_file(&entry, options)
                .map_err(|e| Error::Export(format!("Archive entry '{}' failed: {}", entry, e)))?;
            zip.write_all(snippet.content.as_bytes())
                .map_err(|e| Error::Export(format!("Archive write failed: {}", e)))?;
        } else {
            for file in &snippet.files {
                let entry = format!("snippets/{}/{}", title, file.filename);
                if !written.insert(entry.clone()) {
                    continue;
                }
                zip.start_file(&entry, options)
                    .map_err(|e| Error::Export(format!("Archive entry '{}' failed: {}", entry, e)))?;
                zip.write_all(file.content.as_bytes())
                    .map_err(|e| Error::Export(format!("Archive write failed: {}", e)))?;
            }
        }
    }

    let manifest = document::encode(snapshot)?;
    zip.start_file(MANIFEST_ENTRY, options)
        .map_err(|e| Error::Export(format!("Manifest entry failed: {}", e)))?;
    zip.write_all(&manifest)
        .map_err(|e| Error::Export(format!("Manifest write failed: {}", e)))?;

    let cursor = zip
        .finish()
        .map_err(|e| Error::Export(format!("Archive finalization failed: {}", e)))?;
    Ok(cursor.into_inner())
}

/// Read the snapshot back from an archive's manifest entry.
pub fn decode(bytes: &[u8]) -> Result<Snapshot> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::InvalidFormat(format!("Not a backup archive: {}", e)))?;

    let mut entry = archive
        .by_name(MANIFEST_ENTRY)
        .map_err(|_| Error::InvalidFormat("Archive has no manifest entry".to_string()))?;

    let mut manifest = Vec::with_capacity(entry.size() as usize);
    entry
        .read_to_end(&mut manifest)
        .map_err(|e| Error::InvalidFormat(format!("Manifest read failed: {}", e)))?;

    document::decode(&manifest)
}

/// Replace path-hostile characters in a snippet title and cap its length.
///
/// Empty titles become `untitled`, as do titles made of dots only — `.`
/// and `..` are path traversal segments, not names.
pub fn sanitize_title(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .take(MAX_TITLE_LEN)
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed = cleaned.trim();
    if trimmed.is_empty() || trimmed.chars().all(|c| c == '.') {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

/// File extension for a legacy single-file snippet entry.
pub fn extension_for_language(language: &str) -> &'static str {
    match language.to_lowercase().as_str() {
        "javascript" | "js" => "js",
        "typescript" | "ts" => "ts",
        "python" | "py" => "py",
        "rust" => "rs",
        "go" | "golang" => "go",
        "java" => "java",
        "c" => "c",
        "cpp" | "c++" => "cpp",
        "csharp" | "c#" => "cs",
        "ruby" => "rb",
        "php" => "php",
        "shell" | "bash" | "sh" => "sh",
        "html" => "html",
        "css" => "css",
        "json" => "json",
        "yaml" | "yml" => "yml",
        "toml" => "toml",
        "markdown" | "md" => "md",
        "sql" => "sql",
        "kotlin" => "kt",
        "swift" => "swift",
        "xml" => "xml",
        _ => "txt",
    }
}
