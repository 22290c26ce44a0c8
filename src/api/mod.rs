//! HTTP API over the journal, prompts, feedback and search.

pub mod params;
pub mod routes;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ai::Assistant;
use crate::journal::Journal;
use crate::prompts::PromptProvider;
use crate::search::SearchCoordinator;

/// State shared across handlers.
///
/// The journal sits behind one lock: listing shares it, mutations take it
/// exclusively. AI calls run on cloned entry snapshots, never under the lock.
#[derive(Clone)]
pub struct AppState {
    pub journal: Arc<RwLock<Journal>>,
    pub assistant: Assistant,
    pub prompts: PromptProvider,
    pub searches: Arc<SearchCoordinator>,
}

impl AppState {
    pub fn new(journal: Journal, assistant: Assistant, prompts: PromptProvider) -> Self {
        Self {
            journal: Arc::new(RwLock::new(journal)),
            assistant,
            prompts,
            searches: Arc::new(SearchCoordinator::new()),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/status", get(routes::status))
        .route("/api/directory", post(routes::select_directory))
        // Entries
        .route(
            "/api/entries",
            get(routes::list_entries).post(routes::create_entry),
        )
        .route("/api/entries/{id}", delete(routes::delete_entry))
        .route("/api/entries/{id}/export", get(routes::export_entry))
        // AI
        .route("/api/feedback", post(routes::feedback))
        .route("/api/generate-prompt", post(routes::generate_prompt))
        .route("/api/semantic-search", post(routes::semantic_search))
        // Prompts
        .route("/api/prompts", get(routes::list_prompts))
        .route("/api/prompts/quote", get(routes::quote_prompt))
        .route("/api/prompts/ai", post(routes::ai_prompt))
        .route("/api/search", post(routes::search))
        .with_state(state)
}
