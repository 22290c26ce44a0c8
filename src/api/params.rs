//! Request and response bodies for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::journal::types::RawEntry;
use crate::journal::JournalEntry;

#[derive(Debug, Deserialize)]
pub struct GeneratePromptParams {
    pub category: String,
}

/// Both fields are optional so a missing one can be answered with `400`
/// instead of a body rejection. Candidates only need an `id`; missing fields
/// are repaired before the search.
#[derive(Debug, Deserialize)]
pub struct SemanticSearchParams {
    pub query: Option<String>,
    pub entries: Option<Vec<RawEntry>>,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub results: Vec<JournalEntry>,
}

#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Exact,
    Semantic,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default)]
    pub mode: SearchMode,
}

#[derive(Debug, Deserialize)]
pub struct NewEntryParams {
    #[serde(default)]
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectDirectoryParams {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct SelectDirectoryResponse {
    pub using_file_system: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub using_file_system: bool,
    pub directory: Option<String>,
    pub entry_count: usize,
    pub version: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackParams {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub feedback: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AiPromptParams {
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
