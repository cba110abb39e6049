//! Wire types of the HTTP API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `POST /api/chat` body as documented. The handler reads the body
/// leniently, so this type is only the contract for clients.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Successful chat response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatReply {
    pub ok: bool,
    pub reply: String,
}

/// `GET /` readiness payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub status: String,
}

/// Error body: `{ ok: false, error, ...detail }`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
    /// Provider error body (`OPENROUTER_FAILED`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Provider response without usable text (`EMPTY_RESPONSE`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
    /// Stringified diagnostic (`SERVER_ERROR`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        Self {
            ok: false,
            error: error.to_string(),
            details: None,
            raw: None,
            message: None,
        }
    }
}
