//! OpenAI-compatible chat completions responder
//!
//! One instance per persona: the persona's instructions are sent as the
//! system message and the turn prompt as the user message.

use async_trait::async_trait;
use reqwest::Client;
use roundtable_application::{Responder, ResponderError, TurnContext};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Request body for `/v1/chat/completions`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Responder backed by a chat completions endpoint
pub struct ChatCompletionsResponder {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    system_prompt: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl ChatCompletionsResponder {
    pub fn new(
        client: Client,
        base_url: &str,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: format!("{}/v1/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            model: model.into(),
            system_prompt: String::new(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Build the shared HTTP client
    pub fn http_client(request_timeout: Duration) -> Result<Client, ResponderError> {
        Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ResponderError::Transport(e.to_string()))
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// The request that `generate` would send for `prompt`
    pub fn request_for(&self, prompt: &str) -> ChatRequest {
        let mut messages = Vec::with_capacity(2);
        if !self.system_prompt.trim().is_empty() {
            messages.push(ChatMessage::system(self.system_prompt.as_str()));
        }
        messages.push(ChatMessage::user(prompt));

        ChatRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

fn extract_content(body: ChatResponse) -> Result<String, ResponderError> {
    body.choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.unwrap_or_default())
        .ok_or_else(|| ResponderError::InvalidResponse("response has no choices".to_string()))
}

#[async_trait]
impl Responder for ChatCompletionsResponder {
    async fn generate(
        &self,
        prompt: &str,
        context: Option<&TurnContext>,
    ) -> Result<String, ResponderError> {
        if let Some(ctx) = context {
            debug!("POST {} for {} (round {})", self.endpoint, ctx.speaker, ctx.round);
        }

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_for(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ResponderError::Timeout
                } else {
                    ResponderError::Transport(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ResponderError::RequestFailed(format!(
                "status {}: {}",
                status, error_text
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ResponderError::InvalidResponse(e.to_string()))?;

        extract_content(body)
    }
}
