//! OpenAI-compatible chat completion client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ChatCompleter, ChatMessage, CompletionOptions, GatewayError, Result};

/// Configuration for the gateway client.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bearer token sent in the Authorization header
    pub api_key: String,

    /// Endpoint base, e.g. `https://models.github.ai/inference`
    pub base_url: String,
}

impl GatewayConfig {
    /// Create a new gateway config for the given endpoint and token.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Full URL of the chat completion route.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Chat completion client for OpenAI-compatible endpoints.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl GatewayClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    messages: &'a [ChatMessage],
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
}

/// A parsed completion response.
///
/// The payload shape is not validated beyond deserialization; callers decide
/// how to treat a response without usable content.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletion {
    /// Build a completion holding a single text choice. Convenient for
    /// scripted backends in tests.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            choices: vec![Choice {
                message: Some(ResponseMessage {
                    content: Some(text.into()),
                }),
            }],
        }
    }

    /// Extract the trimmed content of the first choice, or `None` when the
    /// response carries no choice, no message, or only whitespace.
    pub fn into_text(self) -> Option<String> {
        let content = self.choices.into_iter().next()?.message?.content?;
        let trimmed = content.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

#[async_trait]
impl ChatCompleter for GatewayClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<ChatCompletion> {
        debug!(
            model = options.model,
            temperature = options.temperature,
            max_tokens = options.max_tokens,
            messages = messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.config.endpoint())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&CompletionRequest {
                messages,
                model: &options.model,
                temperature: options.temperature,
                max_tokens: options.max_tokens,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api { status, body });
        }

        let completion: ChatCompletion = response.json().await?;
        Ok(completion)
    }

    fn name(&self) -> &str {
        "openai-compatible"
    }
}
