//! Writing prompts from three sources: the built-in [`catalog`], a remote quote
//! service, and the AI assistant.
//!
//! The quote and AI sources never fail from the caller's side; on any error they
//! return a fixed fallback prompt and log what went wrong.

pub mod catalog;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

use crate::ai::Assistant;
use crate::error::CompletionError;
use crate::journal::types::{JournalPrompt, PromptCategory};

/// Returned when the quote service cannot be used.
pub fn quote_fallback() -> JournalPrompt {
    JournalPrompt {
        id: "fallback".into(),
        question: "What's on your mind today?".into(),
        category: PromptCategory::Reflection,
    }
}

/// Returned when AI prompt generation fails.
pub fn ai_fallback() -> JournalPrompt {
    JournalPrompt {
        id: "ai-fallback".into(),
        question: "What would you like to explore today?".into(),
        category: PromptCategory::Reflection,
    }
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(rename = "_id")]
    id: String,
    content: String,
    author: String,
}

#[derive(Clone)]
pub struct PromptProvider {
    http: Client,
    quote_url: String,
    assistant: Assistant,
}

impl PromptProvider {
    pub fn new(http: Client, quote_url: impl Into<String>, assistant: Assistant) -> Self {
        Self {
            http,
            quote_url: quote_url.into(),
            assistant,
        }
    }

    /// Built-in prompt; see [`catalog::select`].
    pub fn catalog_prompt(&self, category: PromptCategory, seed: usize) -> JournalPrompt {
        catalog::select(category, seed)
    }

    /// A reflection prompt built around a random quote.
    pub async fn quote_prompt(&self) -> JournalPrompt {
        match self.fetch_quote().await {
            Ok(quote) => JournalPrompt {
                id: quote.id,
                question: format!(
                    "Reflect on this quote: \"{}\" - {}. How does it relate to your life?",
                    quote.content, quote.author
                ),
                category: PromptCategory::Reflection,
            },
            Err(e) => {
                tracing::error!(error = %e, url = %self.quote_url, "error fetching quote prompt");
                quote_fallback()
            }
        }
    }

    async fn fetch_quote(&self) -> Result<Quote> {
        let response = self
            .http
            .get(&self.quote_url)
            .send()
            .await
            .context("quote request failed")?;
        anyhow::ensure!(
            response.status().is_success(),
            "quote service returned HTTP {}",
            response.status()
        );
        response.json().await.context("malformed quote payload")
    }

    /// An AI-written prompt for `category`, or [`ai_fallback`] on failure.
    pub async fn ai_prompt(&self, category: PromptCategory) -> JournalPrompt {
        match generate_prompt(&self.assistant, category).await {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::error!(error = %e, category = %category, "error generating AI prompt");
                ai_fallback()
            }
        }
    }
}

/// Ask the assistant for one prompt in `category`. The prompt id is the current
/// Unix time in milliseconds.
pub async fn generate_prompt(
    assistant: &Assistant,
    category: PromptCategory,
) -> Result<JournalPrompt, CompletionError> {
    let request = format!(
        "Generate a single, thoughtful journaling prompt for the category: {category}. \
         The prompt should encourage deep reflection and personal insight."
    );
    let question = assistant.generate_response(&request).await?;
    Ok(JournalPrompt {
        id: chrono::Utc::now().timestamp_millis().to_string(),
        question,
        category,
    })
}
