//! Chat relay handler.
//!
//! `POST /api/chat`:
//! 1. Reads `message` from the JSON body and trims it
//! 2. Fails fast when no provider key is configured
//! 3. Pulls product context from the cache (may refresh)
//! 4. Assembles the prompt and calls the completion provider once

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde_json::Value;
use tracing::{debug, info};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::ChatReply;

/// `POST /api/chat`: relay one message to the completion provider.
pub async fn chat_handler(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<ChatReply>> {
    let raw = match body {
        Ok(Json(value)) => message_text(&value),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(AppError::PayloadTooLarge);
        }
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "unreadable chat body");
            String::new()
        }
    };

    let message = raw.trim();
    if message.is_empty() {
        return Err(AppError::EmptyMessage);
    }

    let gateway = state.gateway.as_ref().ok_or(AppError::MissingCredential)?;

    let products = state.products.products_context().await;
    let payload = state.prompt.build_payload(message, &products);

    info!(chars = message.chars().count(), model = %payload.model, "relaying chat message");
    let reply = gateway.complete(&payload).await?;

    Ok(Json(ChatReply { ok: true, reply }))
}

/// `message` as text. Numbers and booleans are accepted in their textual
/// form; anything else counts as missing.
fn message_text(body: &Value) -> String {
    match body.get("message") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn string_message_is_taken_as_is() {
        assert_eq!(message_text(&json!({ "message": "  hi " })), "  hi ");
    }

    #[test]
    fn scalar_message_is_stringified() {
        assert_eq!(message_text(&json!({ "message": 42 })), "42");
        assert_eq!(message_text(&json!({ "message": true })), "true");
    }

    #[test]
    fn missing_or_structured_message_is_empty() {
        assert_eq!(message_text(&json!({})), "");
        assert_eq!(message_text(&json!({ "message": null })), "");
        assert_eq!(message_text(&json!({ "message": ["a"] })), "");
        assert_eq!(message_text(&json!("hello")), "");
    }
}
