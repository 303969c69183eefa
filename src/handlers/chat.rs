//! Chat relay handler
//!
//! Forwards one user message to the Anthropic Messages API with the configured
//! persona and relays the reply.

use crate::handlers::AppState;
use crate::models::{ChatRequest, ChatResponse, MessagesRequest};
use crate::utils::error::{AppError, AppResult};
use crate::utils::logging::create_request_log_summary;
use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use http_body_util::LengthLimitError;
use std::sync::Arc;
use tracing::{debug, error};

/// Handle chat relay requests
///
/// POST /chat (also mounted at /.netlify/functions/chat)
pub async fn handle_chat(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> AppResult<Response> {
    if request.method() != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    let body = axum::body::to_bytes(request.into_body(), state.settings.request.max_request_size)
        .await
        .map_err(|e| {
            let inner = e.into_inner();
            if inner.is::<LengthLimitError>() {
                AppError::PayloadTooLarge
            } else {
                AppError::Internal(format!("Failed to read request body: {}", inner))
            }
        })?;

    let chat_request = ChatRequest::from_slice(&body).map_err(AppError::InvalidBody)?;
    let message = chat_request.message().ok_or(AppError::MissingMessage)?;

    let upstream = &state.settings.upstream;
    let api_key = upstream.api_key().ok_or_else(|| {
        error!("ANTHROPIC_API_KEY not configured");
        AppError::MissingApiKey
    })?;

    let messages_request = MessagesRequest::single_turn(
        upstream.model.as_str(),
        upstream.max_tokens,
        state.settings.persona.system_prompt.as_str(),
        message,
    );

    if let Ok(summary_json) = serde_json::to_string_pretty(&create_request_log_summary(&messages_request)) {
        debug!("Upstream request:\n{}", summary_json);
    }

    let messages_response = state.client.complete(&messages_request, api_key).await?;

    let text = messages_response
        .first_text()
        .ok_or_else(|| AppError::MalformedUpstream("Anthropic response contained no text content".to_string()))?
        .to_string();

    debug!(
        "Relayed reply of {} chars (stop reason: {})",
        text.chars().count(),
        messages_response.stop_reason.as_deref().unwrap_or("unknown")
    );

    let chat_response = ChatResponse {
        response: text,
        usage: messages_response.usage,
    };

    Ok((
        StatusCode::OK,
        [(header::CACHE_CONTROL, "no-cache")],
        Json(chat_response),
    )
        .into_response())
}
