//! The entry repository.
//!
//! [`Journal`] owns the in-memory, newest-first entry collection and keeps it in
//! step with the active [`StorageBackend`]. A session starts on the fallback
//! store and moves to a directory backend once [`Journal::select_directory`]
//! succeeds; there is no way back.
//!
//! None of the mutating operations report storage failures to the caller. They
//! are logged, and the in-memory collection is the source of truth for the rest
//! of the session.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use crate::error::StorageResult;
use crate::journal::types::{iso_timestamp, sort_newest_first, JournalEntry, UNTITLED};
use crate::storage::directory::read_record;
use crate::storage::{DirectoryBackend, DirectoryPicker, FallbackStore, StorageBackend};

pub struct Journal {
    entries: Vec<JournalEntry>,
    backend: StorageBackend,
    fallback: FallbackStore,
    last_issued: Option<DateTime<Utc>>,
}

impl Journal {
    /// An empty journal on the fallback store. Nothing is read yet.
    pub fn new(fallback: FallbackStore) -> Self {
        Self {
            entries: Vec::new(),
            backend: StorageBackend::Fallback(fallback.clone()),
            fallback,
            last_issued: None,
        }
    }

    /// A journal on the fallback store with its collection loaded.
    pub async fn open(fallback: FallbackStore) -> Self {
        let mut journal = Self::new(fallback);
        if let Err(e) = journal.load_entries().await {
            tracing::error!(error = %e, "failed to load entries from fallback store");
        }
        journal
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Whether a directory backend was selected in this session.
    pub fn is_using_file_system(&self) -> bool {
        self.backend.is_directory()
    }

    pub fn directory(&self) -> Option<&Path> {
        match &self.backend {
            StorageBackend::Directory(dir) => Some(dir.root()),
            StorageBackend::Fallback(_) => None,
        }
    }

    /// Replace the in-memory collection with what the active backend holds.
    ///
    /// Missing titles and dates are repaired in memory only. Unreadable records
    /// are skipped. If the backend itself cannot be read the collection is left
    /// untouched and the error returned.
    pub async fn load_entries(&mut self) -> StorageResult<usize> {
        let records = self.backend.load_all().await?;
        let now = iso_timestamp(Utc::now());
        let mut entries: Vec<JournalEntry> =
            records.into_iter().map(|raw| raw.repair(&now)).collect();
        sort_newest_first(&mut entries);

        tracing::info!(
            count = entries.len(),
            directory = self.is_using_file_system(),
            "entries loaded"
        );
        self.entries = entries;
        Ok(self.entries.len())
    }

    /// Try to move the journal onto a directory.
    ///
    /// On a grant the directory becomes the active backend and is loaded, and
    /// `true` is returned. Otherwise the picker's file dialog is offered; any
    /// files picked replace the in-memory collection and are mirrored into the
    /// fallback store. The backend does not change and `false` is returned so
    /// the caller can warn that entries stay in fallback storage. A pick that
    /// yields no readable entry changes nothing.
    pub async fn select_directory(&mut self, picker: &dyn DirectoryPicker) -> bool {
        match picker.request_directory().await {
            Ok(path) => {
                tracing::info!(directory = %path.display(), "directory selected");
                self.backend = StorageBackend::Directory(DirectoryBackend::new(path));
                if let Err(e) = self.load_entries().await {
                    tracing::error!(error = %e, "failed to load entries from directory");
                }
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "error selecting directory");
                if let Some(files) = picker.pick_files().await {
                    self.import_files(files).await;
                }
                false
            }
        }
    }

    async fn import_files(&mut self, files: Vec<PathBuf>) {
        let now = iso_timestamp(Utc::now());
        let mut loaded = Vec::with_capacity(files.len());
        for path in &files {
            match read_record(path).await {
                Ok(raw) => loaded.push(raw.repair(&now)),
                Err(e) => tracing::warn!(file = %path.display(), error = %e, "skipping picked file"),
            }
        }
        if loaded.is_empty() {
            tracing::warn!(picked = files.len(), "no readable entries among picked files; nothing imported");
            return;
        }
        sort_newest_first(&mut loaded);

        tracing::info!(picked = files.len(), imported = loaded.len(), "imported picked files");
        self.entries = loaded;
        if let Err(e) = self.fallback.replace_all(&self.entries).await {
            tracing::error!(error = %e, "failed to mirror picked files into fallback store");
        }
    }

    /// Create an entry and persist it.
    ///
    /// The entry is prepended in memory before persisting and stays there if
    /// persisting fails. On the directory backend that leaves memory ahead of
    /// disk until the next reload.
    pub async fn add_entry(&mut self, title: &str, content: &str) -> JournalEntry {
        let title = match title.trim() {
            "" => UNTITLED.to_string(),
            _ => title.to_string(),
        };
        let entry = JournalEntry {
            id: uuid::Uuid::now_v7().to_string(),
            title,
            content: content.to_string(),
            date: self.next_timestamp(),
        };

        self.entries.insert(0, entry.clone());

        match self.backend.persist_new(&entry, &self.entries).await {
            Ok(()) => tracing::info!(id = %entry.id, "entry saved"),
            Err(e) => tracing::error!(id = %entry.id, error = %e, "error saving entry"),
        }
        entry
    }

    /// Delete an entry. Never fails from the caller's point of view.
    ///
    /// The entry leaves memory first. If removing its file from the directory
    /// backend fails, the remaining collection is written to the fallback store
    /// as a secondary copy. That copy is not a delete: a later fallback-only
    /// session will show exactly these entries.
    pub async fn delete_entry(&mut self, id: &str) {
        self.entries.retain(|e| e.id != id);

        if let Err(e) = self.backend.remove(id, &self.entries).await {
            tracing::error!(id = %id, error = %e, "error deleting entry");
            if self.backend.is_directory() {
                if let Err(e) = self.fallback.replace_all(&self.entries).await {
                    tracing::error!(error = %e, "failed to mirror entries into fallback store");
                }
            }
        } else {
            tracing::info!(id = %id, "entry deleted");
        }
    }

    /// Current time, never earlier than the previous timestamp handed out.
    fn next_timestamp(&mut self) -> String {
        let now = Utc::now();
        let at = match self.last_issued {
            Some(last) if now < last => last,
            _ => now,
        };
        self.last_issued = Some(at);
        iso_timestamp(at)
    }
}

impl std::fmt::Debug for Journal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Journal")
            .field("entries", &self.entries.len())
            .field("backend", &self.backend)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKvStore;
    use std::sync::Arc;

    fn memory_journal() -> Journal {
        Journal::new(FallbackStore::new(
            Arc::new(MemoryKvStore::new()),
            "journalEntries",
        ))
    }

    #[tokio::test]
    async fn add_prepends_and_defaults_title() {
        let mut journal = memory_journal();
        let first = journal.add_entry("First", "one").await;
        let second = journal.add_entry("   ", "two").await;

        assert_eq!(second.title, UNTITLED);
        let ids: Vec<&str> = journal.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
        assert!(!journal.is_using_file_system());
        assert!(journal.directory().is_none());
    }

    #[tokio::test]
    async fn timestamps_never_go_backwards() {
        let mut journal = memory_journal();
        journal.last_issued = Some(Utc::now() + chrono::Duration::hours(1));
        let ahead = journal.last_issued.unwrap();

        let entry = journal.add_entry("t", "c").await;
        assert_eq!(entry.date, iso_timestamp(ahead));
    }

    #[tokio::test]
    async fn get_finds_entry_by_id() {
        let mut journal = memory_journal();
        let entry = journal.add_entry("Find me", "c").await;
        assert_eq!(journal.get(&entry.id), Some(&entry));
        assert!(journal.get("nope").is_none());
    }
}
