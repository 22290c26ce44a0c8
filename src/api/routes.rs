//! HTTP handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;

use super::params::*;
use super::AppState;
use crate::journal::types::{iso_timestamp, PromptCategory};
use crate::journal::{export, JournalEntry};
use crate::prompts::{self, catalog};
use crate::search::{exact_search, SearchOutcome};
use crate::storage::PathPicker;

fn error_response(status: StatusCode, error: &str, details: Option<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
            details,
        }),
    )
        .into_response()
}

fn parse_category(raw: &str) -> Result<PromptCategory, Response> {
    raw.parse::<PromptCategory>()
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, "Invalid category", Some(e)))
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    "OK"
}

/// GET /api/status
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let journal = state.journal.read().await;
    Json(StatusResponse {
        using_file_system: journal.is_using_file_system(),
        directory: journal.directory().map(|d| d.display().to_string()),
        entry_count: journal.entries().len(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /api/directory
pub async fn select_directory(
    State(state): State<AppState>,
    Json(params): Json<SelectDirectoryParams>,
) -> Json<SelectDirectoryResponse> {
    let picker = PathPicker::new(&params.path);
    let mut journal = state.journal.write().await;
    let selected = journal.select_directory(&picker).await;

    Json(SelectDirectoryResponse {
        using_file_system: selected,
        warning: (!selected).then(|| {
            "Failed to select directory. Entries will be saved in fallback storage.".to_string()
        }),
    })
}

/// GET /api/entries
pub async fn list_entries(State(state): State<AppState>) -> impl IntoResponse {
    let journal = state.journal.read().await;
    Json(journal.entries().to_vec())
}

/// POST /api/entries
pub async fn create_entry(
    State(state): State<AppState>,
    Json(params): Json<NewEntryParams>,
) -> Response {
    if export::plain_text(&params.content).trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Entry content is empty", None);
    }
    let entry = state
        .journal
        .write()
        .await
        .add_entry(&params.title, &params.content)
        .await;
    (StatusCode::CREATED, Json(entry)).into_response()
}

/// DELETE /api/entries/{id}
pub async fn delete_entry(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    state.journal.write().await.delete_entry(&id).await;
    StatusCode::NO_CONTENT
}

/// GET /api/entries/{id}/export
pub async fn export_entry(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let journal = state.journal.read().await;
    let Some(entry) = journal.get(&id) else {
        return error_response(StatusCode::NOT_FOUND, "Entry not found", Some(id));
    };
    let export = export::export_entry(entry);
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.filename),
            ),
        ],
        export.body,
    )
        .into_response()
}

/// POST /api/feedback
pub async fn feedback(
    State(state): State<AppState>,
    Json(params): Json<FeedbackParams>,
) -> Response {
    match state.assistant.feedback(&params.content).await {
        Ok(feedback) => Json(FeedbackResponse { feedback }).into_response(),
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to generate feedback",
            Some(e.to_string()),
        ),
    }
}

/// GET /api/prompts
pub async fn list_prompts(Query(query): Query<CategoryQuery>) -> Response {
    match query.category.as_deref() {
        None => Json(catalog::all()).into_response(),
        Some(raw) => match parse_category(raw) {
            Ok(category) => Json(catalog::for_category(category)).into_response(),
            Err(response) => response,
        },
    }
}

/// GET /api/prompts/quote
pub async fn quote_prompt(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.prompts.quote_prompt().await)
}

/// POST /api/prompts/ai
pub async fn ai_prompt(
    State(state): State<AppState>,
    Json(params): Json<AiPromptParams>,
) -> Response {
    match parse_category(&params.category) {
        Ok(category) => Json(state.prompts.ai_prompt(category).await).into_response(),
        Err(response) => response,
    }
}

/// POST /api/generate-prompt
///
/// Thin passthrough: generation errors surface as `500` with details instead of
/// the fallback prompt.
pub async fn generate_prompt(
    State(state): State<AppState>,
    payload: Result<Json<GeneratePromptParams>, JsonRejection>,
) -> Response {
    let category = payload
        .map_err(|e| e.body_text())
        .and_then(|Json(params)| params.category.parse::<PromptCategory>());

    let result = match category {
        Ok(category) => prompts::generate_prompt(&state.assistant, category)
            .await
            .map_err(|e| e.to_string()),
        Err(e) => Err(e),
    };

    match result {
        Ok(prompt) => Json(prompt).into_response(),
        Err(details) => {
            tracing::error!(error = %details, "error generating prompt");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate prompt",
                Some(details),
            )
        }
    }
}

/// POST /api/semantic-search
pub async fn semantic_search(
    State(state): State<AppState>,
    payload: Result<Json<SemanticSearchParams>, JsonRejection>,
) -> Response {
    let params = match payload {
        Ok(Json(params)) => params,
        Err(e) => {
            tracing::error!(error = %e.body_text(), "error in semantic search route");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", None);
        }
    };

    let (Some(query), Some(entries)) = (params.query.filter(|q| !q.is_empty()), params.entries)
    else {
        return error_response(StatusCode::BAD_REQUEST, "Missing query or entries", None);
    };

    let now = iso_timestamp(Utc::now());
    let entries: Vec<JournalEntry> = entries.into_iter().map(|raw| raw.repair(&now)).collect();
    let results = state.assistant.semantic_search(&query, &entries).await;
    Json(SearchResults { results }).into_response()
}

/// POST /api/search
///
/// Searches the journal's own entries. Only the most recently started search
/// answers with results; an older one still in flight gets `409`.
pub async fn search(State(state): State<AppState>, Json(params): Json<SearchParams>) -> Response {
    let entries = state.journal.read().await.entries().to_vec();
    let SearchParams { query, mode } = params;

    let outcome = state
        .searches
        .run(async {
            if query.is_empty() {
                return Vec::new();
            }
            match mode {
                SearchMode::Exact => exact_search(&entries, &query),
                SearchMode::Semantic => state.assistant.semantic_search(&query, &entries).await,
            }
        })
        .await;

    match outcome {
        SearchOutcome::Current(results) => Json(SearchResults { results }).into_response(),
        SearchOutcome::Superseded => error_response(
            StatusCode::CONFLICT,
            "Superseded by a newer search",
            None,
        ),
    }
}
