//! Error types shared across the storage, AI and capture layers.
//!
//! Library code returns these typed errors; the CLI and `main` wrap them in
//! `anyhow` with context.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a storage primitive (directory file or fallback key/value store).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("fallback store error: {0}")]
    Store(String),

    #[error("invalid entry id {0:?}: not a single file name")]
    InvalidId(String),
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure of a chat-completion call.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse completion: {0}")]
    Parse(String),

    #[error("completion contained no choices")]
    Empty,
}

/// Why a directory grant was not obtained.
#[derive(Debug, Error)]
pub enum PickerError {
    #[error("directory access denied: {0}")]
    Denied(String),
}

/// Failure reported by a transcription stream.
#[derive(Debug, Error)]
pub enum TranscriptionError {
    #[error("transcription source failed: {0}")]
    Source(#[from] std::io::Error),

    #[error("recognition error: {0}")]
    Recognition(String),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;
