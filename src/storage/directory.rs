//! Directory backend: one pretty-printed `<id>.json` file per entry.

use std::path::{Component, Path, PathBuf};

use crate::error::{StorageError, StorageResult};
use crate::journal::types::{JournalEntry, RawEntry};

/// Suffix of files recognized as entries.
pub const ENTRY_SUFFIX: &str = ".json";

/// One file read during a directory scan.
#[derive(Debug)]
pub struct ScannedFile {
    pub name: String,
    pub record: StorageResult<RawEntry>,
}

/// A granted directory holding entry files.
#[derive(Debug, Clone)]
pub struct DirectoryBackend {
    root: PathBuf,
}

impl DirectoryBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file that holds entry `id`.
    ///
    /// The file name must be one normal, non-hidden path component, so an id
    /// can never address anything outside the root.
    pub fn entry_path(&self, id: &str) -> StorageResult<PathBuf> {
        let name = format!("{id}{ENTRY_SUFFIX}");
        let mut components = Path::new(&name).components();
        let single = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(part)), None) if part == name.as_str()
        );
        if id.is_empty() || !single || id.starts_with('.') || id.contains(['/', '\\']) {
            return Err(StorageError::InvalidId(id.to_string()));
        }
        Ok(self.root.join(name))
    }

    /// Read every entry file in the directory.
    ///
    /// Failing to enumerate the directory is an error. Failing to read or parse
    /// an individual file is reported per file so the caller can skip it.
    pub async fn list(&self) -> StorageResult<Vec<ScannedFile>> {
        let mut dir = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| StorageError::io(&self.root, e))?;

        let mut scanned = Vec::new();
        while let Some(item) = dir
            .next_entry()
            .await
            .map_err(|e| StorageError::io(&self.root, e))?
        {
            let name = item.file_name().to_string_lossy().into_owned();
            if !name.ends_with(ENTRY_SUFFIX) {
                continue;
            }
            let record = read_record(&item.path()).await;
            scanned.push(ScannedFile { name, record });
        }
        // read_dir order is platform dependent
        scanned.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(scanned)
    }

    /// Write `entry` to `<id>.json`, replacing any existing file.
    pub async fn put(&self, entry: &JournalEntry) -> StorageResult<()> {
        let path = self.entry_path(&entry.id)?;
        let json = serde_json::to_string_pretty(entry)?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| StorageError::io(&path, e))
    }

    /// Remove `<id>.json`. A missing file is an error, as with any other
    /// removal failure.
    pub async fn delete(&self, id: &str) -> StorageResult<()> {
        let path = self.entry_path(id)?;
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| StorageError::io(&path, e))
    }
}

/// Read and parse one entry file.
pub async fn read_record(path: &Path) -> StorageResult<RawEntry> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| StorageError::io(path, e))?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(id: &str) -> JournalEntry {
        JournalEntry {
            id: id.into(),
            title: "Evening".into(),
            content: "<div>Quiet day.</div>".into(),
            date: "2025-04-02T21:15:00.000Z".into(),
        }
    }

    #[tokio::test]
    async fn put_writes_pretty_json_named_by_id() {
        let tmp = TempDir::new().unwrap();
        let backend = DirectoryBackend::new(tmp.path());
        backend.put(&entry("abc")).await.unwrap();

        let text = std::fs::read_to_string(tmp.path().join("abc.json")).unwrap();
        assert!(text.starts_with("{\n  \"id\": \"abc\""));
        assert!(text.contains("\n  \"date\": \"2025-04-02T21:15:00.000Z\"\n}"));
    }

    #[tokio::test]
    async fn list_ignores_other_suffixes_and_reports_bad_files() {
        let tmp = TempDir::new().unwrap();
        let backend = DirectoryBackend::new(tmp.path());
        backend.put(&entry("good")).await.unwrap();
        std::fs::write(tmp.path().join("broken.json"), "{ nope").unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

        let scanned = backend.list().await.unwrap();
        assert_eq!(scanned.len(), 2);
        assert_eq!(scanned[0].name, "broken.json");
        assert!(scanned[0].record.is_err());
        assert_eq!(scanned[1].record.as_ref().unwrap().id, "good");
    }

    #[tokio::test]
    async fn delete_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let backend = DirectoryBackend::new(tmp.path());
        assert!(backend.delete("ghost").await.is_err());
    }

    #[tokio::test]
    async fn ids_that_leave_the_root_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("journal");
        std::fs::create_dir(&root).unwrap();
        let outside = tmp.path().join("precious.json");
        std::fs::write(&outside, "{}").unwrap();
        let backend = DirectoryBackend::new(&root);

        for id in ["../precious", "..", ".", "", "a/b", "a\\b", "/etc/passwd"] {
            assert!(
                matches!(backend.delete(id).await, Err(StorageError::InvalidId(_))),
                "{id:?}"
            );
        }
        assert!(matches!(
            backend.put(&entry("../precious")).await,
            Err(StorageError::InvalidId(_))
        ));
        assert_eq!(std::fs::read_to_string(&outside).unwrap(), "{}");
        assert!(backend.entry_path("0192-uuid.v7").is_ok());
    }

    #[tokio::test]
    async fn list_on_missing_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let backend = DirectoryBackend::new(tmp.path().join("gone"));
        assert!(backend.list().await.is_err());
    }
}
