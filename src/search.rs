//! Entry search: exact substring matching, and a generation guard for searches
//! that overlap in time.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::journal::JournalEntry;

/// Entries whose content contains `term`, case-insensitively. An empty term
/// matches nothing.
pub fn exact_search(entries: &[JournalEntry], term: &str) -> Vec<JournalEntry> {
    if term.is_empty() {
        return Vec::new();
    }
    let needle = term.to_lowercase();
    entries
        .iter()
        .filter(|e| e.content.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Handed out when a search starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Result of a guarded search.
#[derive(Debug, PartialEq, Eq)]
pub enum SearchOutcome<T> {
    /// No newer search was dispatched while this one ran.
    Current(T),
    /// A newer search started first; the result was discarded.
    Superseded,
}

/// Monotonic search generation counter. Only the most recently dispatched
/// search may deliver results.
#[derive(Debug, Default)]
pub struct SearchCoordinator {
    latest: AtomicU64,
}

impl SearchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Run `search` under a fresh ticket.
    pub async fn run<T, F>(&self, search: F) -> SearchOutcome<T>
    where
        F: Future<Output = T>,
    {
        let ticket = self.begin();
        let result = search.await;
        if self.is_current(ticket) {
            SearchOutcome::Current(result)
        } else {
            tracing::debug!(ticket = ticket.0, "discarding superseded search result");
            SearchOutcome::Superseded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::oneshot;

    fn entry(id: &str, content: &str) -> JournalEntry {
        JournalEntry {
            id: id.into(),
            title: "t".into(),
            content: content.into(),
            date: "2025-01-01T00:00:00.000Z".into(),
        }
    }

    #[test]
    fn exact_search_is_case_insensitive() {
        let entries = [entry("a", "Feeling STRESSED at work"), entry("b", "calm")];
        let hits = exact_search(&entries, "stress");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");
        assert!(exact_search(&entries, "").is_empty());
    }

    #[test]
    fn tickets_are_monotonic() {
        let coordinator = SearchCoordinator::new();
        let first = coordinator.begin();
        assert!(coordinator.is_current(first));
        let second = coordinator.begin();
        assert!(!coordinator.is_current(first));
        assert!(coordinator.is_current(second));
    }

    #[tokio::test]
    async fn late_response_of_older_search_is_discarded() {
        let coordinator = Arc::new(SearchCoordinator::new());
        let (release_first, first_gate) = oneshot::channel::<()>();

        let slow = {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(async move {
                coordinator
                    .run(async move {
                        first_gate.await.ok();
                        "first"
                    })
                    .await
            })
        };

        // let the first search take its ticket
        while coordinator.latest.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        let second = coordinator.run(async { "second" }).await;
        release_first.send(()).unwrap();

        assert_eq!(second, SearchOutcome::Current("second"));
        assert_eq!(slow.await.unwrap(), SearchOutcome::Superseded);
    }
}
