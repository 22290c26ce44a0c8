//! Service wiring: storage, AI client and prompt provider assembled from
//! config, and the HTTP server entry point [`serve`].

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::ai::{Assistant, ChatCompletionClient, CompletionProvider};
use crate::api::{self, AppState};
use crate::config::ReverieConfig;
use crate::journal::Journal;
use crate::prompts::PromptProvider;
use crate::storage::{FallbackStore, FileKvStore};

/// Shared setup for the server and CLI commands.
pub struct Services {
    pub fallback: FallbackStore,
    pub assistant: Assistant,
    pub prompts: PromptProvider,
}

impl Services {
    pub fn from_config(config: &ReverieConfig) -> Result<Self> {
        let fallback_path = config.resolved_fallback_path();
        let kv = FileKvStore::new(&fallback_path);
        let fallback = FallbackStore::new(Arc::new(kv), config.storage.fallback_key.clone());
        tracing::info!(path = %fallback_path.display(), "fallback store ready");

        let http = reqwest::Client::builder()
            .user_agent(concat!("reverie/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        let completion: Arc<dyn CompletionProvider> =
            Arc::new(ChatCompletionClient::from_config(http.clone(), &config.ai));
        let assistant = Assistant::new(completion);
        tracing::info!(model = %config.ai.model, endpoint = %config.ai.endpoint, "AI client ready");

        let prompts = PromptProvider::new(http, config.prompts.quote_url.clone(), assistant.clone());

        Ok(Self {
            fallback,
            assistant,
            prompts,
        })
    }

    /// Open the journal on the fallback store.
    pub async fn open_journal(&self) -> Journal {
        Journal::open(self.fallback.clone()).await
    }
}

/// Start the HTTP server and run until ctrl-c.
pub async fn serve(config: ReverieConfig) -> Result<()> {
    let bind_addr = config.bind_addr();
    tracing::info!(addr = %bind_addr, "starting Reverie journal server");

    let services = Services::from_config(&config)?;
    let journal = services.open_journal().await;
    let state = AppState::new(journal, services.assistant, services.prompts);
    let router = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "journal server listening at http://{bind_addr}/");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutting down journal server");
        })
        .await?;

    Ok(())
}
