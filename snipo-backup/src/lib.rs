//! Backup, restore and synchronization engine for the Snipo snippet
//! manager.
//!
//! The engine serializes the entire data graph to a portable snapshot in
//! one of two container formats, optionally seals it with password-based
//! authenticated encryption, and replays snapshots into a live store under
//! three conflict-resolution strategies, remapping identifiers through
//! natural keys. It talks to the live store only through the repository
//! traits in [`store`].

pub mod cipher;
pub mod codec;
pub mod engine;
pub mod error;
pub mod model;
pub mod store;

pub use codec::BackupFormat;
pub use engine::{BackupEngine, ExportOptions, ImportOptions, ImportStrategy};
pub use error::{Error, Result};
pub use model::{ImportResult, Snapshot, FORMAT_VERSION};
