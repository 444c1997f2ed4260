// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat completion client for an OpenAI-compatible API

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::config::GenerativeConfig;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Response did not contain a JSON list: {0}")]
    NotAList(String),

    #[error("Generative service returned empty content")]
    EmptyContent,

    #[error("Generative service is not configured")]
    NotConfigured,
}

/// Produces text completions for a system + user prompt pair
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError>;

    /// Complete and parse the reply as a JSON array of strings
    async fn complete_json_list(&self, system: &str, prompt: &str) -> Result<Vec<String>, LlmError> {
        let text = self.complete(system, prompt).await?;
        parse_json_list(&text)
    }

    fn model_name(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Client for an OpenAI-compatible `/v1/chat/completions` endpoint
pub struct GenerativeTextClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl GenerativeTextClient {
    /// Create a client; fails with `NotConfigured` when no API key is set
    pub fn new(config: &GenerativeConfig) -> Result<Self, LlmError> {
        let api_key = config.api_key.clone().ok_or(LlmError::NotConfigured)?;
        let client = Client::builder().timeout(config.timeout()).build()?;

        let endpoint = config.api_url.trim_end_matches('/').to_string();
        info!(
            "Generative client configured: endpoint={}, model={}",
            endpoint, config.model
        );

        Ok(Self {
            client,
            endpoint,
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl TextGenerator for GenerativeTextClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.0,
            max_tokens: self.max_tokens,
        };

        let url = format!("{}/v1/chat/completions", self.endpoint);
        debug!("Chat completion POST {} ({} prompt chars)", url, prompt.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply: ChatResponse = serde_json::from_str(&response.text().await?)?;
        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(LlmError::EmptyContent)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Parse a model reply as a list of strings
///
/// Tolerates Markdown code fences and surrounding prose by taking the
/// outermost `[...]`. Non-string and blank entries are dropped.
pub fn parse_json_list(text: &str) -> Result<Vec<String>, LlmError> {
    let start = text.find('[');
    let end = text.rfind(']');
    let slice = match (start, end) {
        (Some(s), Some(e)) if s < e => &text[s..=e],
        _ => return Err(LlmError::NotAList(preview(text))),
    };

    let values: Vec<serde_json::Value> = serde_json::from_str(slice)?;
    Ok(values
        .into_iter()
        .filter_map(|v| v.as_str().map(|s| s.trim().to_string()))
        .filter(|s| !s.is_empty())
        .collect())
}

fn preview(text: &str) -> String {
    text.chars().take(80).collect()
}
