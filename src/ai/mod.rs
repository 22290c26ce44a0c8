//! Chat-completion access.
//!
//! [`CompletionProvider`] is the seam to the external model; the shipped
//! implementation is [`openai::ChatCompletionClient`]. [`Assistant`] builds the
//! journaling-specific requests on top of it.

pub mod assistant;
pub mod openai;

pub use assistant::Assistant;
pub use openai::ChatCompletionClient;

use async_trait::async_trait;

use crate::error::CompletionError;

/// Sampling parameters sent with a request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

/// Used for prompts and feedback.
pub const GENERATION_SAMPLING: Sampling = Sampling {
    temperature: 0.7,
    top_p: 1.0,
    max_tokens: 1000,
};

/// Used for semantic search, where the reply is a list of ids.
pub const SEARCH_SAMPLING: Sampling = Sampling {
    temperature: 0.2,
    top_p: 1.0,
    max_tokens: 1000,
};

/// A single-turn chat request: one system instruction, one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub sampling: Sampling,
}

/// One request, one reply. Implementations do not retry.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}
