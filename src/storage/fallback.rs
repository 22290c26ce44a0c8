//! Fallback store: the whole entry collection serialized under one key of a
//! key/value store.
//!
//! [`FileKvStore`] keeps the key/value map in a single JSON file and is what the
//! binary uses. [`MemoryKvStore`] keeps it in memory.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{StorageError, StorageResult};
use crate::journal::types::{JournalEntry, RawEntry};

/// String key/value storage with browser-local-storage semantics: whole values
/// are read and replaced, never patched.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// Key/value map persisted as a JSON object in one file.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    path: PathBuf,
}

impl FileKvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> StorageResult<BTreeMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StorageError::io(&self.path, e)),
        }
    }
}

#[async_trait]
impl KeyValueStore for FileKvStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.read_map().await?.remove(key))
    }

    /// Replace one key. The file is rewritten through a temp file and rename.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StorageError::io(parent, e))?;
            }
        }

        let tmp_path = self.path.with_extension("tmp");
        let json = serde_json::to_string(&map)?;
        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(|e| StorageError::io(&tmp_path, e))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| StorageError::io(&self.path, e))?;
        Ok(())
    }
}

/// In-process key/value map.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    values: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| StorageError::Store(format!("store lock poisoned: {e}")))?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| StorageError::Store(format!("store lock poisoned: {e}")))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The entry collection as held by a [`KeyValueStore`].
#[derive(Clone)]
pub struct FallbackStore {
    kv: Arc<dyn KeyValueStore>,
    key: String,
}

impl FallbackStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored collection.
    ///
    /// An absent key is an empty collection. Records that fail to parse are
    /// logged and skipped; a value that is not a JSON array at all is an error.
    pub async fn load(&self) -> StorageResult<Vec<RawEntry>> {
        let Some(text) = self.kv.get(&self.key).await? else {
            return Ok(Vec::new());
        };

        let values: Vec<serde_json::Value> = serde_json::from_str(&text)?;
        let mut records = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<RawEntry>(value) {
                Ok(raw) => records.push(raw),
                Err(e) => {
                    tracing::warn!(key = %self.key, index, error = %e, "skipping malformed stored entry")
                }
            }
        }
        Ok(records)
    }

    /// Replace the stored collection with `entries`.
    pub async fn replace_all(&self, entries: &[JournalEntry]) -> StorageResult<()> {
        let json = serde_json::to_string(entries)?;
        self.kv.set(&self.key, &json).await
    }
}

impl std::fmt::Debug for FallbackStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackStore").field("key", &self.key).finish()
    }
}
