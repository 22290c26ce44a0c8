//! Journaling requests built on a [`CompletionProvider`]: free-text generation,
//! entry feedback and semantic search.

use std::collections::HashSet;
use std::sync::Arc;

use super::{CompletionProvider, CompletionRequest, GENERATION_SAMPLING, SEARCH_SAMPLING};
use crate::error::CompletionError;
use crate::journal::JournalEntry;

pub const GENERATION_INSTRUCTION: &str = "You are a thoughtful journaling assistant. Generate meaningful, introspective prompts that encourage self-reflection and personal growth.";

pub const SEARCH_INSTRUCTION: &str = "You are a helpful assistant that finds relevant journal entries based on semantic meaning. Return only the IDs of relevant entries, separated by commas.";

#[derive(Clone)]
pub struct Assistant {
    provider: Arc<dyn CompletionProvider>,
}

impl Assistant {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// One generation request. Provider errors are returned as-is.
    pub async fn generate_response(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = CompletionRequest {
            system: GENERATION_INSTRUCTION.to_string(),
            user: prompt.to_string(),
            sampling: GENERATION_SAMPLING,
        };
        self.provider.complete(request).await.map_err(|e| {
            tracing::error!(error = %e, "error generating response");
            e
        })
    }

    /// Feedback on an entry's content.
    pub async fn feedback(&self, content: &str) -> Result<String, CompletionError> {
        let prompt = format!("Provide feedback on the following journal entry:\n\n{content}");
        self.generate_response(&prompt).await
    }

    /// Entries the model considers relevant to `query`, in the order the model
    /// listed them. Any failure yields an empty list.
    pub async fn semantic_search(&self, query: &str, entries: &[JournalEntry]) -> Vec<JournalEntry> {
        let request = CompletionRequest {
            system: SEARCH_INSTRUCTION.to_string(),
            user: search_prompt(query, entries),
            sampling: SEARCH_SAMPLING,
        };

        match self.provider.complete(request).await {
            Ok(reply) => {
                let results = select_by_ids(&reply, entries);
                tracing::info!(
                    candidates = entries.len(),
                    matched = results.len(),
                    "semantic search finished"
                );
                results
            }
            Err(e) => {
                tracing::error!(error = %e, "error in semantic search");
                Vec::new()
            }
        }
    }
}

fn search_prompt(query: &str, entries: &[JournalEntry]) -> String {
    let listing = entries
        .iter()
        .map(|entry| format!("ID: {}\nContent: {}\n---", entry.id, entry.content))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Find relevant entries from this list that match the query: \"{query}\"\n\nEntries:\n{listing}")
}

/// Map a comma-separated id list back onto `entries`, keeping the reply's order.
/// Unknown ids and repeats are dropped.
fn select_by_ids(reply: &str, entries: &[JournalEntry]) -> Vec<JournalEntry> {
    let mut seen = HashSet::new();
    reply
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty() && seen.insert(*id))
        .filter_map(|id| entries.iter().find(|e| e.id == id).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, content: &str) -> JournalEntry {
        JournalEntry {
            id: id.into(),
            title: "t".into(),
            content: content.into(),
            date: "2025-01-01T00:00:00.000Z".into(),
        }
    }

    #[test]
    fn prompt_lists_every_candidate() {
        let prompt = search_prompt("stress", &[entry("a", "deadline"), entry("b", "beach")]);
        assert!(prompt.starts_with("Find relevant entries from this list that match the query: \"stress\""));
        assert!(prompt.contains("ID: a\nContent: deadline\n---\nID: b\nContent: beach\n---"));
    }

    #[test]
    fn select_follows_reply_order() {
        let entries = [entry("a", "1"), entry("b", "2"), entry("c", "3")];
        let picked = select_by_ids(" c, a ,zzz, c,", &entries);
        let ids: Vec<&str> = picked.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn select_on_empty_reply_is_empty() {
        assert!(select_by_ids("", &[entry("a", "1")]).is_empty());
    }
}
