#![allow(dead_code)]

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use reverie::ai::{Assistant, CompletionProvider, CompletionRequest};
use reverie::error::{CompletionError, PickerError};
use reverie::journal::{Journal, JournalEntry};
use reverie::prompts::PromptProvider;
use reverie::storage::{DirectoryPicker, FallbackStore, KeyValueStore, MemoryKvStore};

pub const FALLBACK_KEY: &str = "journalEntries";

/// A fallback store over a fresh in-memory key/value map. The map is returned
/// too so tests can look at what was written.
pub fn memory_fallback() -> (FallbackStore, Arc<MemoryKvStore>) {
    let kv = Arc::new(MemoryKvStore::new());
    let store = FallbackStore::new(kv.clone(), FALLBACK_KEY);
    (store, kv)
}

/// Ids stored in the fallback collection, in stored order.
pub async fn fallback_ids(kv: &MemoryKvStore) -> Vec<String> {
    let Some(text) = kv.get(FALLBACK_KEY).await.unwrap() else {
        return Vec::new();
    };
    let entries: Vec<JournalEntry> = serde_json::from_str(&text).unwrap();
    entries.into_iter().map(|e| e.id).collect()
}

pub fn ids(entries: &[JournalEntry]) -> Vec<String> {
    entries.iter().map(|e| e.id.clone()).collect()
}

/// Write a raw entry file into `dir` and return its path.
pub fn write_entry_file(dir: &Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, json).unwrap();
    path
}

pub fn entry_json(id: &str, title: &str, content: &str, date: &str) -> String {
    serde_json::json!({ "id": id, "title": title, "content": content, "date": date }).to_string()
}

/// Journal on a memory fallback store, moved onto `dir`.
pub async fn directory_journal(dir: &Path) -> (Journal, Arc<MemoryKvStore>) {
    let (fallback, kv) = memory_fallback();
    let mut journal = Journal::new(fallback);
    assert!(journal.select_directory(&GrantingPicker(dir.to_path_buf())).await);
    (journal, kv)
}

/// Grants the wrapped directory without checks.
pub struct GrantingPicker(pub PathBuf);

#[async_trait]
impl DirectoryPicker for GrantingPicker {
    async fn request_directory(&self) -> Result<PathBuf, PickerError> {
        Ok(self.0.clone())
    }

    async fn pick_files(&self) -> Option<Vec<PathBuf>> {
        None
    }
}

/// Refuses the directory grant; the file picker returns `files`.
pub struct DenyingPicker {
    pub files: Option<Vec<PathBuf>>,
}

#[async_trait]
impl DirectoryPicker for DenyingPicker {
    async fn request_directory(&self) -> Result<PathBuf, PickerError> {
        Err(PickerError::Denied("user dismissed the dialog".into()))
    }

    async fn pick_files(&self) -> Option<Vec<PathBuf>> {
        self.files.clone()
    }
}

/// Completion provider with a canned reply (or failure) that records requests.
pub struct ScriptedProvider {
    reply: Result<String, String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(message) => Err(CompletionError::Network(message.clone())),
        }
    }
}

pub fn assistant(provider: Arc<ScriptedProvider>) -> Assistant {
    Assistant::new(provider)
}

/// Prompt provider whose quote endpoint is `quote_url`.
pub fn prompt_provider(assistant: Assistant, quote_url: &str) -> PromptProvider {
    PromptProvider::new(reqwest::Client::new(), quote_url, assistant)
}

/// Chat-completion reply body carrying `content`.
pub fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }
        ]
    })
}
