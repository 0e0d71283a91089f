//! Chat completion gateway for parley.
//!
//! This crate provides a trait-based abstraction over an OpenAI-compatible
//! chat completion endpoint, with a single reqwest-backed implementation.

mod client;
mod message;

use async_trait::async_trait;
pub use client::{ChatCompletion, Choice, GatewayClient, GatewayConfig, ResponseMessage};
pub use message::{ChatMessage, CompletionOptions, Role};
use thiserror::Error;

/// Errors that can occur while talking to the completion endpoint.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The endpoint answered with a non-success status. Carries the status
    /// code and the raw error body.
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Trait for chat completion backends.
///
/// The session controller talks to the model exclusively through this seam,
/// which keeps it testable against scripted implementations.
#[async_trait]
pub trait ChatCompleter: Send + Sync {
    /// Send one ordered message list and return the raw completion.
    ///
    /// Exactly one request is issued; there is no retry, timeout tuning, or
    /// streaming. Use [`ChatCompletion::into_text`] to extract the first
    /// choice's content.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<ChatCompletion>;

    /// Returns the name of this backend for logging/debugging.
    fn name(&self) -> &str;
}
