// @zen-component: CMP-OpenRouterGateway
//
//! OpenRouter chat completions gateway.
//!
//! One `POST` per call, bearer auth, optional attribution headers, no retry.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use super::extract::extract_reply;
use super::{CompletionGateway, GatewayError};
use crate::config::CompletionConfig;
use crate::prompt::ChatPayload;

/// Gateway to an OpenRouter-compatible `/chat/completions` endpoint.
///
/// Holds the API key by construction; a deployment without a key has no
/// gateway at all.
pub struct OpenRouterGateway {
    client: Client,
    url: Url,
    api_key: String,
    referer: Option<String>,
    title: Option<String>,
}

impl OpenRouterGateway {
    /// Returns `Ok(None)` when no API key is configured.
    pub fn from_config(config: &CompletionConfig) -> Result<Option<Self>, GatewayError> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Transport(format!("client build failed: {e}")))?;
        Ok(Some(Self {
            client,
            url: config.url.clone(),
            api_key,
            referer: config.referer.clone(),
            title: config.title.clone(),
        }))
    }
}

#[async_trait]
impl CompletionGateway for OpenRouterGateway {
    async fn complete(&self, payload: &ChatPayload) -> Result<String, GatewayError> {
        let mut req = self
            .client
            .post(self.url.clone())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(payload);
        if let Some(referer) = &self.referer {
            req = req.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.title {
            req = req.header("X-Title", title);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if !status.is_success() {
            error!(status = status.as_u16(), body = %body, "completion provider error");
            let body = serde_json::from_str(&body).unwrap_or(Value::String(body));
            return Err(GatewayError::ProviderFailed {
                status: status.as_u16(),
                body,
            });
        }

        let data: Value =
            serde_json::from_str(&body).unwrap_or_else(|_| Value::Object(Default::default()));

        match extract_reply(&data) {
            Some((field, reply)) => {
                debug!(?field, chars = reply.chars().count(), "completion received");
                Ok(reply)
            }
            None => Err(GatewayError::EmptyCompletion { raw: data }),
        }
    }
}
