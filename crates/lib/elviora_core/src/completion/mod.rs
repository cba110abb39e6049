// @zen-component: CMP-CompletionGateway
//
//! Completion gateway: the single outbound call to the LLM provider.
//!
//! - [`CompletionGateway`]: async seam used by the HTTP layer
//! - [`openrouter::OpenRouterGateway`]: OpenRouter-compatible implementation
//! - [`extract`]: ordered reply-extraction policy over provider response shapes

pub mod extract;
pub mod openrouter;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::prompt::ChatPayload;

/// Errors that can occur during a completion call. No variant is retried.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Completion provider returned status {status}")]
    ProviderFailed { status: u16, body: Value },

    #[error("Completion provider returned no usable text")]
    EmptyCompletion { raw: Value },

    #[error("Completion request failed: {0}")]
    Transport(String),
}

/// Sends an assembled payload to the provider and returns the reply text.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(&self, payload: &ChatPayload) -> Result<String, GatewayError>;
}
