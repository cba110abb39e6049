//! # elviora_api
//!
//! HTTP API library for the Elviora chat relay.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use std::any::Any;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use elviora_core::completion::CompletionGateway;
use elviora_core::products::cache::ProductContextCache;
use elviora_core::prompt::PromptAssembler;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::config::ApiConfig;
use crate::error::AppError;
use crate::handlers::{chat, health};

/// Route paths.
pub mod routes {
    pub const GET_HEALTH: &str = "/";
    pub const POST_API_CHAT: &str = "/api/chat";
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide product context.
    pub products: Arc<ProductContextCache>,
    /// Prompt builder for the configured model.
    pub prompt: PromptAssembler,
    /// `None` when no provider API key is configured.
    pub gateway: Option<Arc<dyn CompletionGateway>>,
    /// API configuration.
    pub config: ApiConfig,
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);
    let body_limit = state.config.body_limit;

    Router::new()
        .route(routes::GET_HEALTH, get(health::health_handler))
        .route(routes::POST_API_CHAT, post(chat::chat_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Allow-listed origins, `GET`/`POST`, no credentials.
///
/// `*` and unparseable entries are skipped; an empty result falls back to
/// [`config::DEFAULT_ALLOWED_ORIGINS`].
fn cors_layer(origins: &[String]) -> CorsLayer {
    let mut allowed = header_values(origins.iter().map(String::as_str));
    if allowed.is_empty() {
        warn!("no usable CORS origins configured, using storefront defaults");
        allowed = header_values(config::DEFAULT_ALLOWED_ORIGINS.iter().copied());
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(false)
}

fn header_values<'a>(origins: impl Iterator<Item = &'a str>) -> Vec<HeaderValue> {
    origins
        .filter_map(|o| {
            if o == "*" {
                warn!("ignoring wildcard CORS origin");
                return None;
            }
            match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(origin = %o, "ignoring invalid CORS origin");
                    None
                }
            }
        })
        .collect()
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    error!(%detail, "request handler panicked");
    AppError::Internal(detail).into_response()
}
