//! Property-based checks for the codec: document round-trips losslessly
//! for arbitrary record contents, and sanitized titles are always safe
//! archive path segments.

use proptest::prelude::*;

use snipo_backup::codec::{self, sanitize_title, BackupFormat};
use snipo_backup::model::{FileRecord, SnippetRecord, Snapshot, TagRecord};

fn arb_snippet() -> impl Strategy<Value = SnippetRecord> {
    (
        any::<i64>(),
        "\\PC{1,40}",
        "\\PC{0,80}",
        any::<bool>(),
        prop::collection::vec(("[A-Za-z0-9_. -]{1,20}", "\\PC{0,60}"), 0..4),
    )
        .prop_map(|(id, title, content, is_public, files)| SnippetRecord {
            id,
            title,
            description: String::new(),
            content,
            language: "text".to_string(),
            is_public,
            is_archived: false,
            files: files
                .into_iter()
                .enumerate()
                .map(|(i, (filename, content))| FileRecord {
                    filename,
                    content,
                    language: String::new(),
                    sort_order: i as i32,
                })
                .collect(),
            tags: vec![],
            folders: vec![],
        })
}

proptest! {
    #[test]
    fn document_roundtrip_is_lossless(
        snippets in prop::collection::vec(arb_snippet(), 0..8),
        tag_names in prop::collection::vec("\\PC{1,20}", 0..5),
    ) {
        let mut snapshot = Snapshot::new();
        snapshot.snippets = snippets;
        snapshot.tags = tag_names
            .into_iter()
            .enumerate()
            .map(|(i, name)| TagRecord { id: i as i64, name, color: String::new() })
            .collect();

        let bytes = codec::encode(&snapshot, BackupFormat::Json).unwrap();
        let (decoded, format) = codec::decode(&bytes).unwrap();
        prop_assert_eq!(format, BackupFormat::Json);
        prop_assert_eq!(decoded, snapshot);
    }

    #[test]
    fn archive_manifest_roundtrip_is_lossless(
        snippets in prop::collection::vec(arb_snippet(), 0..6),
    ) {
        let mut snapshot = Snapshot::new();
        snapshot.snippets = snippets;

        let bytes = codec::encode(&snapshot, BackupFormat::Zip).unwrap();
        let (decoded, format) = codec::decode(&bytes).unwrap();
        prop_assert_eq!(format, BackupFormat::Zip);
        prop_assert_eq!(decoded, snapshot);
    }

    #[test]
    fn sanitized_titles_are_safe_path_segments(title in "\\PC{0,200}") {
        let sanitized = sanitize_title(&title);
        prop_assert!(!sanitized.is_empty());
        prop_assert!(sanitized.chars().count() <= 50);
        for hostile in ['/', '\\', ':', '*', '?', '"', '<', '>', '|'] {
            prop_assert!(!sanitized.contains(hostile));
        }
        prop_assert!(!sanitized.chars().any(|c| c.is_control()));
        // `.` and `..` would be traversal segments, not names.
        prop_assert!(!sanitized.chars().all(|c| c == '.'));
    }
}
