//! Error handling module
//!
//! Defines error types and handling logic used by the relay endpoint

use crate::models::ErrorBody;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Message returned for every unexpected server-side failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error. Please try again.";

/// Message returned when the upstream error body carries none
pub const UPSTREAM_FALLBACK_MESSAGE: &str = "Failed to get response from Claude";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Request used a method other than POST
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Request body exceeded the configured limit
    #[error("Request body too large")]
    PayloadTooLarge,

    /// Request body is not valid JSON for a chat request
    #[error("Invalid JSON body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    /// Message field absent or blank
    #[error("Message is required")]
    MissingMessage,

    /// No API key configured
    #[error("API key not configured. Please add ANTHROPIC_API_KEY to the environment variables.")]
    MissingApiKey,

    /// Upstream answered with a non-success status
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Upstream request did not finish before the deadline
    #[error("Upstream request timed out: {0}")]
    Timeout(String),

    /// Transport failure talking to upstream
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream success body could not be used
    #[error("Malformed upstream response: {0}")]
    MalformedUpstream(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::InvalidBody(_) | AppError::MissingMessage => StatusCode::BAD_REQUEST,
            AppError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::MissingApiKey
            | AppError::Network(_)
            | AppError::MalformedUpstream(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the response body
    pub fn to_body(&self) -> ErrorBody {
        match self {
            AppError::MethodNotAllowed
            | AppError::PayloadTooLarge
            | AppError::MissingMessage
            | AppError::MissingApiKey => ErrorBody {
                error: self.to_string(),
                details: None,
            },
            AppError::InvalidBody(e) => ErrorBody {
                error: "Invalid JSON body".to_string(),
                details: Some(e.to_string()),
            },
            AppError::Upstream { message, .. } => ErrorBody {
                error: message.clone(),
                details: None,
            },
            AppError::Timeout(detail) => ErrorBody {
                error: "Upstream request timed out. Please try again.".to_string(),
                details: Some(detail.clone()),
            },
            AppError::Network(e) => ErrorBody {
                error: INTERNAL_ERROR_MESSAGE.to_string(),
                details: Some(e.to_string()),
            },
            AppError::MalformedUpstream(detail) | AppError::Internal(detail) => ErrorBody {
                error: INTERNAL_ERROR_MESSAGE.to_string(),
                details: Some(detail.clone()),
            },
        }
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Application error: {} - Status code: {}", self, status);
        } else {
            tracing::warn!("Client error: {} - Status code: {}", self, status);
        }

        (status, Json(self.to_body())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
