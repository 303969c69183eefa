//! Chat endpoint data models
//!
//! Inbound and outbound bodies of the relay endpoint

use super::anthropic::Usage;
use serde::{Deserialize, Serialize};

/// Inbound chat request
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// User's message
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatRequest {
    /// Decode a request body, which must be a JSON object
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(serde::de::Error::custom("request body must be a JSON object"));
        }

        serde_json::from_value(value)
    }

    /// The message, unless it is missing or blank
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// Successful chat response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Assistant reply
    pub response: String,
    /// Upstream token usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// Error body of every failed request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error
    pub error: String,
    /// Underlying failure detail (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
