//! CLI `prompt` and `feedback` commands.

use anyhow::{Context, Result};

use super::Session;
use crate::journal::types::{JournalPrompt, PromptCategory};

pub enum PromptSource {
    Catalog { seed: usize },
    Quote,
    Ai,
}

pub async fn prompt(session: &Session, category: Option<&str>, source: PromptSource) -> Result<()> {
    let category = match category {
        Some(raw) => raw.parse().map_err(anyhow::Error::msg)?,
        None => PromptCategory::Reflection,
    };

    let prompts = &session.services.prompts;
    let prompt = match source {
        PromptSource::Catalog { seed } => prompts.catalog_prompt(category, seed),
        PromptSource::Quote => prompts.quote_prompt().await,
        PromptSource::Ai => prompts.ai_prompt(category).await,
    };
    print_prompt(&prompt);
    Ok(())
}

fn print_prompt(prompt: &JournalPrompt) {
    println!("[{}] {}", prompt.category, prompt.question);
    println!("  id: {}", prompt.id);
}

/// Ask the assistant for feedback on a stored entry.
pub async fn feedback(session: &Session, id: &str) -> Result<()> {
    let entry = session
        .journal
        .get(id)
        .with_context(|| format!("no entry with id {id}"))?;

    println!("{}", entry.title);
    println!("{}", "=".repeat(entry.title.chars().count().max(8)));
    let feedback = session
        .services
        .assistant
        .feedback(&entry.content)
        .await
        .context("failed to get feedback")?;
    println!("{feedback}");
    Ok(())
}
