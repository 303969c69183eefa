//! HTTP client service
//!
//! Encapsulates HTTP communication with the Anthropic Messages API

use crate::config::settings::UpstreamConfig;
use crate::models::anthropic::{ErrorResponse, MessagesRequest, MessagesResponse};
use crate::utils::error::{AppError, AppResult, UPSTREAM_FALLBACK_MESSAGE};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

/// Upstream completion service
///
/// One call per invocation, no retries.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a Messages API request authenticated with `api_key`
    async fn complete(&self, request: &MessagesRequest, api_key: &str) -> AppResult<MessagesResponse>;
}

/// Anthropic API client
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: Client,
    base_url: String,
    api_version: String,
}

impl AnthropicClient {
    /// Create a new client instance
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("chatrelay/", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_version: config.api_version.clone(),
        })
    }

    /// Build the request URL
    pub fn messages_url(&self) -> String {
        format!("{}/messages", self.base_url.trim_end_matches('/'))
    }
}

/// Classify a transport failure
fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout(err.to_string())
    } else {
        AppError::Network(err)
    }
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    async fn complete(&self, request: &MessagesRequest, api_key: &str) -> AppResult<MessagesResponse> {
        debug!("Sending Anthropic messages request");

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.api_version)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;

        if status.is_success() {
            let messages_response: MessagesResponse = serde_json::from_slice(&body)
                .map_err(|e| AppError::MalformedUpstream(format!("Failed to parse Anthropic response: {}", e)))?;

            debug!("Anthropic request completed successfully");
            Ok(messages_response)
        } else {
            let message = serde_json::from_slice::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.message().map(str::to_string))
                .unwrap_or_else(|| UPSTREAM_FALLBACK_MESSAGE.to_string());

            error!(
                "Claude API error: {} - {}",
                status,
                String::from_utf8_lossy(&body)
            );

            Err(AppError::Upstream {
                status: status.as_u16(),
                message,
            })
        }
    }
}
