// @zen-component: PRD-ProductSource
//
//! Product catalog: fetching from the storefront and caching as prompt text.
//!
//! # Public API
//!
//! - [`ProductSource`]: fetch dependency of the cache
//! - [`HttpProductSource`]: storefront implementation over `reqwest`
//! - [`cache::ProductContextCache`]: single-slot TTL cache of normalized text
//! - [`normalize::products_text`]: raw product array → prompt lines

pub mod cache;
pub mod normalize;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::ProductsConfig;

/// Errors that can occur while fetching the product list.
///
/// None of these reach a caller of the cache; they are logged and absorbed.
#[derive(Debug, Error)]
pub enum ProductSourceError {
    #[error("Product request failed: {0}")]
    Transport(String),

    #[error("Product source returned status {0}")]
    Status(u16),

    #[error("Product response is not valid JSON: {0}")]
    Malformed(String),

    #[error("Product source did not acknowledge the request")]
    Rejected,
}

/// Fetch dependency of [`cache::ProductContextCache`].
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Returns the raw `products` value of an acknowledged response.
    ///
    /// The value is normally an array of product records but is not checked
    /// here; normalization decides what to do with anything else.
    async fn fetch_products(&self) -> Result<Value, ProductSourceError>;
}

/// Product source backed by the storefront's `get_products` endpoint.
///
/// Expects `{ "ok": true, "products": [...] }`.
pub struct HttpProductSource {
    client: Client,
    url: Url,
}

impl HttpProductSource {
    pub fn new(config: &ProductsConfig) -> Result<Self, ProductSourceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProductSourceError::Transport(format!("client build failed: {e}")))?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    async fn fetch_products(&self) -> Result<Value, ProductSourceError> {
        let resp = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| ProductSourceError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProductSourceError::Status(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ProductSourceError::Transport(e.to_string()))?;
        let data: Value =
            serde_json::from_str(&body).map_err(|e| ProductSourceError::Malformed(e.to_string()))?;

        if data.get("ok").and_then(Value::as_bool) != Some(true) {
            return Err(ProductSourceError::Rejected);
        }

        Ok(data
            .get("products")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new())))
    }
}
