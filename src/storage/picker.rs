//! Directory access acquisition.
//!
//! A [`DirectoryPicker`] either grants a read/write directory or, when that is
//! refused, offers a one-shot file picker whose files are imported into the
//! fallback store.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::directory::ENTRY_SUFFIX;
use crate::error::PickerError;

#[async_trait]
pub trait DirectoryPicker: Send + Sync {
    /// Ask for a directory with read/write access.
    async fn request_directory(&self) -> Result<PathBuf, PickerError>;

    /// Fallback multi-file picker. `None` means the user picked nothing.
    async fn pick_files(&self) -> Option<Vec<PathBuf>>;
}

/// Picker over a path supplied up front (CLI flag or API body).
///
/// The directory is granted when it exists and a probe file can be created in
/// it. The file picker yields the entry files found at the path.
#[derive(Debug, Clone)]
pub struct PathPicker {
    path: PathBuf,
}

impl PathPicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

const PROBE_PREFIX: &str = ".reverie-write-probe-";

#[async_trait]
impl DirectoryPicker for PathPicker {
    async fn request_directory(&self) -> Result<PathBuf, PickerError> {
        let meta = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| PickerError::Denied(format!("{}: {e}", self.path.display())))?;
        if !meta.is_dir() {
            return Err(PickerError::Denied(format!(
                "{} is not a directory",
                self.path.display()
            )));
        }

        // Unique name plus create_new: an existing file is never touched.
        let probe = self
            .path
            .join(format!("{PROBE_PREFIX}{}", uuid::Uuid::now_v7()));
        tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&probe)
            .await
            .map_err(|e| PickerError::Denied(format!("{} is not writable: {e}", self.path.display())))?;
        if let Err(e) = tokio::fs::remove_file(&probe).await {
            tracing::warn!(path = %probe.display(), error = %e, "failed to remove write probe");
        }

        Ok(self.path.clone())
    }

    async fn pick_files(&self) -> Option<Vec<PathBuf>> {
        let meta = tokio::fs::metadata(&self.path).await.ok()?;
        if meta.is_file() {
            return is_entry_file(&self.path).then(|| vec![self.path.clone()]);
        }

        let mut dir = tokio::fs::read_dir(&self.path).await.ok()?;
        let mut files = Vec::new();
        while let Ok(Some(item)) = dir.next_entry().await {
            let path = item.path();
            if is_entry_file(&path) {
                files.push(path);
            }
        }
        files.sort();
        Some(files)
    }
}

fn is_entry_file(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().ends_with(ENTRY_SUFFIX))
        .unwrap_or(false)
}
