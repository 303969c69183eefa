//! Logging utilities
//!
//! Log-safe summaries of upstream requests

use crate::models::MessagesRequest;

/// Set to true to include the full system prompt and message in debug logs
/// Default is false to reduce log verbosity
pub const VERBOSE_REQUEST_LOGGING: bool = false;

/// Truncate a string with a note about original length
pub fn truncate_content(s: &str, max_chars: usize) -> String {
    let total = s.chars().count();
    if total > max_chars {
        let head: String = s.chars().take(max_chars).collect();
        format!("{}... ({} chars truncated)", head, total - max_chars)
    } else {
        s.to_string()
    }
}

/// Create a filtered summary of an upstream request for logging
/// Keeps original structure but truncates verbose content
pub fn create_request_log_summary(request: &MessagesRequest) -> serde_json::Value {
    if VERBOSE_REQUEST_LOGGING {
        return serde_json::to_value(request).unwrap_or(serde_json::json!({"error": "serialize failed"}));
    }

    let messages: Vec<serde_json::Value> = request
        .messages
        .iter()
        .map(|msg| {
            serde_json::json!({
                "role": msg.role,
                "content": truncate_content(&msg.content, 200),
            })
        })
        .collect();

    serde_json::json!({
        "model": request.model,
        "max_tokens": request.max_tokens,
        "system": truncate_content(&request.system, 100),
        "messages": messages,
    })
}
