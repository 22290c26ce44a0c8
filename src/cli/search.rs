use anyhow::Result;

use super::Session;
use crate::journal::export::plain_text;
use crate::search::exact_search;

/// Search the journal from the terminal, by substring or through the assistant.
pub async fn search(session: &Session, query: &str, semantic: bool) -> Result<()> {
    let entries = session.journal.entries();
    let results = if semantic {
        session.services.assistant.semantic_search(query, entries).await
    } else {
        exact_search(entries, query)
    };

    if results.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    println!("Found {} result(s)\n", results.len());
    for (i, entry) in results.iter().enumerate() {
        let text = plain_text(&entry.content);
        let preview = if text.chars().count() > 120 {
            format!("{}...", text.chars().take(120).collect::<String>())
        } else {
            text
        };
        println!("  {}. {} [{}] {}", i + 1, entry.title, entry.date, entry.id);
        println!("     {}", preview.replace('\n', " "));
        println!();
    }
    Ok(())
}
