//! Dictation into an entry draft.
//!
//! A [`TranscriptionProvider`] yields recognized text chunks until the capture
//! ends. [`dictate`] drains one into an [`EntryDraft`]. The draft is the only
//! state the capture touches.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::error::TranscriptionError;
use crate::journal::EntryDraft;

#[async_trait]
pub trait TranscriptionProvider: Send {
    /// Next transcript chunk; `None` once capture has stopped.
    async fn next_transcript(&mut self) -> Option<Result<String, TranscriptionError>>;
}

/// Reads transcripts one line at a time, e.g. from a speech-to-text tool piped
/// into stdin. Blank lines are skipped.
pub struct LineTranscriber<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin + Send> LineTranscriber<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> TranscriptionProvider for LineTranscriber<R> {
    async fn next_transcript(&mut self) -> Option<Result<String, TranscriptionError>> {
        loop {
            match self.lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => return Some(Ok(line.trim().to_string())),
                Ok(None) => return None,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// Append every transcript from `provider` to `draft` until the capture ends or
/// reports an error. Returns how many chunks were appended; what was captured
/// before an error is kept.
pub async fn dictate(provider: &mut dyn TranscriptionProvider, draft: &mut EntryDraft) -> usize {
    let mut appended = 0;
    while let Some(next) = provider.next_transcript().await {
        match next {
            Ok(transcript) => {
                draft.append_transcript(&transcript);
                appended += 1;
            }
            Err(e) => {
                tracing::error!(error = %e, "speech recognition stopped");
                break;
            }
        }
    }
    tracing::debug!(chunks = appended, "dictation finished");
    appended
}
