mod helpers;

use helpers::{assistant, completion_body, prompt_provider, ScriptedProvider};
use reverie::ai::{Assistant, ChatCompletionClient};
use reverie::journal::PromptCategory;
use reverie::prompts::{ai_fallback, generate_prompt, quote_fallback};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn ai_prompt_falls_back_when_the_model_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ChatCompletionClient::new(reqwest::Client::new(), server.uri(), "m", None);
    let prompts = prompt_provider(Assistant::new(Arc::new(client)), "http://127.0.0.1:9/unused");

    let prompt = prompts.ai_prompt(PromptCategory::Gratitude).await;
    assert_eq!(prompt, ai_fallback());
    assert_eq!(prompt.id, "ai-fallback");
    assert_eq!(prompt.question, "What would you like to explore today?");
    assert_eq!(prompt.category, PromptCategory::Reflection);
}

#[tokio::test]
async fn ai_prompt_carries_the_requested_category() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion_body("What small kindness surprised you?")),
        )
        .mount(&server)
        .await;

    let client = ChatCompletionClient::new(reqwest::Client::new(), server.uri(), "m", None);
    let prompts = prompt_provider(Assistant::new(Arc::new(client)), "http://127.0.0.1:9/unused");

    let prompt = prompts.ai_prompt(PromptCategory::Gratitude).await;
    assert_eq!(prompt.question, "What small kindness surprised you?");
    assert_eq!(prompt.category, PromptCategory::Gratitude);
    assert!(prompt.id.parse::<i64>().is_ok(), "id is a millisecond timestamp");
}

#[tokio::test]
async fn generate_prompt_names_the_category_in_its_request() {
    let provider = ScriptedProvider::replying("What are you building?");
    let prompt = generate_prompt(&assistant(provider.clone()), PromptCategory::Creativity)
        .await
        .unwrap();

    assert_eq!(prompt.category, PromptCategory::Creativity);
    let sent = provider.requests();
    assert!(sent[0]
        .user
        .starts_with("Generate a single, thoughtful journaling prompt for the category: creativity."));
}

#[tokio::test]
async fn generate_prompt_propagates_failures() {
    let provider = ScriptedProvider::failing("boom");
    assert!(generate_prompt(&assistant(provider), PromptCategory::Goals)
        .await
        .is_err());
}

#[tokio::test]
async fn quote_prompt_wraps_the_quote() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/random"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_id": "q-17",
            "content": "Well begun is half done.",
            "author": "Aristotle",
            "tags": ["wisdom"]
        })))
        .mount(&server)
        .await;

    let prompts = prompt_provider(
        assistant(ScriptedProvider::failing("unused")),
        &format!("{}/random", server.uri()),
    );
    let prompt = prompts.quote_prompt().await;

    assert_eq!(prompt.id, "q-17");
    assert_eq!(
        prompt.question,
        "Reflect on this quote: \"Well begun is half done.\" - Aristotle. How does it relate to your life?"
    );
    assert_eq!(prompt.category, PromptCategory::Reflection);
}

#[tokio::test]
async fn quote_prompt_falls_back_on_bad_responses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/garbled"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    for route in ["down", "garbled"] {
        let prompts = prompt_provider(
            assistant(ScriptedProvider::failing("unused")),
            &format!("{}/{route}", server.uri()),
        );
        assert_eq!(prompts.quote_prompt().await, quote_fallback(), "route {route}");
    }
}

#[test]
fn catalog_prompts_stay_in_their_category() {
    let prompts = prompt_provider(
        assistant(ScriptedProvider::failing("unused")),
        "http://127.0.0.1:9/unused",
    );
    for category in PromptCategory::ALL {
        for seed in 0..6 {
            assert_eq!(prompts.catalog_prompt(category, seed).category, category);
        }
    }
    assert_eq!(
        prompts.catalog_prompt(PromptCategory::Reflection, 0),
        prompts.catalog_prompt(PromptCategory::Reflection, 3)
    );
}
