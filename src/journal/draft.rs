//! The buffer an entry is composed in before it is submitted.

use chrono::Utc;

use super::export::{plain_text, render, TextExport};
use super::types::{JournalPrompt, UNTITLED};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub title: String,
    content: String,
}

/// Title and content ready for [`Journal::add_entry`](super::Journal::add_entry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub title: String,
    pub content: String,
}

impl EntryDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
        }
    }

    /// Raw (possibly HTML) content.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn push_text(&mut self, text: &str) {
        self.content.push_str(text);
    }

    /// Append a prompt's question as its own block.
    pub fn insert_prompt(&mut self, prompt: &JournalPrompt) {
        self.content.push_str("<div>");
        self.content.push_str(&prompt.question);
        self.content.push_str("</div>");
    }

    /// Append dictated text, space separated from what came before.
    pub fn append_transcript(&mut self, transcript: &str) {
        self.content.push(' ');
        self.content.push_str(transcript);
    }

    pub fn plain_text(&self) -> String {
        plain_text(&self.content)
    }

    /// True when there is no visible text to submit or export.
    pub fn is_blank(&self) -> bool {
        self.plain_text().trim().is_empty()
    }

    /// Take the draft for submission, leaving it empty. `None` when blank.
    pub fn submit(&mut self) -> Option<Submission> {
        if self.is_blank() {
            return None;
        }
        let title = match self.title.trim() {
            "" => UNTITLED.to_string(),
            t => t.to_string(),
        };
        let submission = Submission {
            title,
            content: std::mem::take(&mut self.content),
        };
        self.title.clear();
        Some(submission)
    }

    /// Export the draft as it stands now. `None` when blank.
    pub fn export(&self) -> Option<TextExport> {
        if self.is_blank() {
            return None;
        }
        Some(render(&self.title, &self.plain_text(), Utc::now()))
    }
}
