//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use elviora_core::completion::GatewayError;
use serde_json::Value;
use thiserror::Error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
///
/// The `error` codes on the wire are the ones the storefront widget already
/// understands.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("Completion provider API key is not configured")]
    MissingCredential,

    #[error("Completion provider failed with status {status}")]
    ProviderFailed { status: u16, details: Value },

    #[error("Completion provider returned no text")]
    EmptyCompletion { raw: Value },

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Wire code for the `error` field.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::EmptyMessage => "EMPTY_MESSAGE",
            AppError::MissingCredential => "NO_API_KEY",
            AppError::ProviderFailed { .. } => "OPENROUTER_FAILED",
            AppError::EmptyCompletion { .. } => "EMPTY_RESPONSE",
            AppError::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            AppError::Transport(_) | AppError::Internal(_) => "SERVER_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::EmptyMessage => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::MissingCredential
            | AppError::ProviderFailed { .. }
            | AppError::EmptyCompletion { .. }
            | AppError::Transport(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = ErrorResponse::new(self.code());
        match self {
            AppError::ProviderFailed { details, .. } => body.details = Some(details),
            AppError::EmptyCompletion { raw } => body.raw = Some(raw),
            AppError::Transport(m) | AppError::Internal(m) => body.message = Some(m),
            AppError::EmptyMessage | AppError::MissingCredential | AppError::PayloadTooLarge => {}
        }
        (status, Json(body)).into_response()
    }
}

impl From<GatewayError> for AppError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::ProviderFailed { status, body } => AppError::ProviderFailed {
                status,
                details: body,
            },
            GatewayError::EmptyCompletion { raw } => AppError::EmptyCompletion { raw },
            GatewayError::Transport(msg) => AppError::Transport(msg),
        }
    }
}
