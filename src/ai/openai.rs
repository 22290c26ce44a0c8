//! OpenAI-compatible chat-completion client.
//!
//! Works with any endpoint that serves `POST {base}/chat/completions`, including
//! the GitHub Models inference endpoint used by default.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

use super::{CompletionProvider, CompletionRequest};
use crate::config::AiConfig;
use crate::error::CompletionError;

pub struct ChatCompletionClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl ChatCompletionClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
            model: model.into(),
        }
    }

    pub fn from_config(client: Client, config: &AiConfig) -> Self {
        if config.api_key.is_none() {
            tracing::warn!("no AI credential configured; set REVERIE_AI_KEY or GITHUB_TOKEN");
        }
        Self::new(
            client,
            config.endpoint.clone(),
            config.model.clone(),
            config.api_key.clone(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageResponse,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Option<String>,
}

#[async_trait]
impl CompletionProvider for ChatCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.sampling.temperature,
            top_p: request.sampling.top_p,
            max_tokens: request.sampling.max_tokens,
        };

        let mut http_request = self.client.post(self.chat_completions_url()).json(&body);
        if let Some(key) = &self.api_key {
            http_request = http_request.header(header::AUTHORIZATION, format!("Bearer {key}"));
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status { status, body });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Parse(e.to_string()))?;

        chat.choices
            .into_iter()
            .next()
            .ok_or(CompletionError::Empty)
            .map(|choice| choice.message.content.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_tolerates_trailing_slash() {
        let client = ChatCompletionClient::new(Client::new(), "http://localhost:8000/v1/", "m", None);
        assert_eq!(
            client.chat_completions_url(),
            "http://localhost:8000/v1/chat/completions"
        );
        assert_eq!(client.model(), "m");
    }

    #[test]
    fn request_body_shape() {
        let body = ChatRequest {
            model: "Llama-3.3-70B-Instruct",
            messages: [
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "hi",
                },
            ],
            temperature: 0.7,
            top_p: 1.0,
            max_tokens: 1000,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["top_p"], 1.0);
    }
}
