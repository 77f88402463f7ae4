use anyhow::{anyhow, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "openai/gpt-4o";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Placeholder shown when the API returns no completion text
pub const EMPTY_REPLY: &str = "⚠️ No response";

#[derive(Serialize)]
struct CompletionMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<CompletionMessage>,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionReply,
}

#[derive(Deserialize)]
struct CompletionReply {
    content: String,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

/// Client for an OpenAI-compatible chat completion endpoint.
///
/// One request, one response: no retry, no timeout tuning, no streaming.
#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl CompletionClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_settings(api_key, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_MAX_TOKENS)
    }

    pub fn with_settings(api_key: &str, endpoint: &str, model: &str, max_tokens: u32) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            max_tokens,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn complete(&self, content: &str) -> Result<String> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![CompletionMessage {
                role: "user".to_string(),
                content: content.to_string(),
            }],
            max_tokens: self.max_tokens,
        };

        log::debug!("posting completion request for model {}", self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(remote_error_message(status, &body)));
        }

        let completion: CompletionResponse = response.json().await?;
        Ok(reply_text(completion))
    }
}

/// First completion's text, or the placeholder when the API returned none
fn reply_text(response: CompletionResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .filter(|content| !content.is_empty())
        .unwrap_or_else(|| EMPTY_REPLY.to_string())
}

/// Human-readable message for a failed call: the remote `error.message`
/// when the body is a JSON error payload, otherwise status plus raw body
fn remote_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(|message| message.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("completion API error {}: {}", status, body))
}
