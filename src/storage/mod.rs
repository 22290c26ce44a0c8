//! Entry persistence.
//!
//! Two backends sit behind [`StorageBackend`]:
//!
//! - [`DirectoryBackend`]: a granted local directory, one file per entry.
//! - [`FallbackStore`]: the whole collection under one key of a
//!   [`KeyValueStore`].
//!
//! Their failure semantics differ on purpose. A directory write touches only the
//! new entry's file, so the in-memory collection can run ahead of disk. A
//! fallback write replaces the collection with the in-memory snapshot, so both
//! agree after every successful write.

pub mod directory;
pub mod fallback;
pub mod picker;

pub use directory::{DirectoryBackend, ENTRY_SUFFIX};
pub use fallback::{FallbackStore, FileKvStore, KeyValueStore, MemoryKvStore};
pub use picker::{DirectoryPicker, PathPicker};

use crate::error::StorageResult;
use crate::journal::types::{JournalEntry, RawEntry};

/// The backend entries are currently persisted to.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    Directory(DirectoryBackend),
    Fallback(FallbackStore),
}

impl StorageBackend {
    pub fn is_directory(&self) -> bool {
        matches!(self, StorageBackend::Directory(_))
    }

    /// Read every stored record. Records that cannot be parsed are logged and
    /// left out.
    pub async fn load_all(&self) -> StorageResult<Vec<RawEntry>> {
        match self {
            StorageBackend::Directory(dir) => {
                let mut records = Vec::new();
                for file in dir.list().await? {
                    match file.record {
                        Ok(raw) => records.push(raw),
                        Err(e) => tracing::error!(
                            file = %file.name,
                            error = %e,
                            "error loading entry"
                        ),
                    }
                }
                Ok(records)
            }
            StorageBackend::Fallback(store) => store.load().await,
        }
    }

    /// Persist a newly created entry. `snapshot` is the full in-memory
    /// collection after the entry was added; only the fallback store uses it.
    pub async fn persist_new(
        &self,
        entry: &JournalEntry,
        snapshot: &[JournalEntry],
    ) -> StorageResult<()> {
        match self {
            StorageBackend::Directory(dir) => dir.put(entry).await,
            StorageBackend::Fallback(store) => store.replace_all(snapshot).await,
        }
    }

    /// Remove the stored record for `id`. `snapshot` is the in-memory
    /// collection after removal; only the fallback store uses it.
    pub async fn remove(&self, id: &str, snapshot: &[JournalEntry]) -> StorageResult<()> {
        match self {
            StorageBackend::Directory(dir) => dir.delete(id).await,
            StorageBackend::Fallback(store) => store.replace_all(snapshot).await,
        }
    }
}
