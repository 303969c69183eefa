//! Data model unit tests

use chatrelay::models::anthropic::*;
use chatrelay::models::{ChatRequest, ChatResponse, ErrorBody};
use serde_json::json;

#[test]
fn test_chat_request_message_extraction() {
    let request: ChatRequest = serde_json::from_value(json!({"message": "Where is my bag?"})).unwrap();
    assert_eq!(request.message(), Some("Where is my bag?"));

    let extra_fields: ChatRequest =
        serde_json::from_value(json!({"message": "hi", "history": []})).unwrap();
    assert_eq!(extra_fields.message(), Some("hi"));

    let missing: ChatRequest = serde_json::from_value(json!({})).unwrap();
    assert_eq!(missing.message(), None);
}

#[test]
fn test_chat_request_rejects_non_string_message() {
    assert!(serde_json::from_value::<ChatRequest>(json!({"message": 42})).is_err());
    assert!(serde_json::from_value::<ChatRequest>(json!({"message": ["hi"]})).is_err());
}

#[test]
fn test_messages_request_key_order() {
    let request = MessagesRequest::single_turn("claude-sonnet-4-20250514", 4096, "sys", "hello");
    let value = serde_json::to_value(&request).unwrap();

    assert_eq!(
        value,
        json!({
            "model": "claude-sonnet-4-20250514",
            "max_tokens": 4096,
            "system": "sys",
            "messages": [{"role": "user", "content": "hello"}]
        })
    );
}

#[test]
fn test_messages_response_parsing() {
    let response: MessagesResponse = serde_json::from_value(json!({
        "id": "msg_013Zva2CMHLNnXjNJJKqJ2EF",
        "type": "message",
        "role": "assistant",
        "model": "claude-sonnet-4-20250514",
        "content": [{"type": "text", "text": "Kia ora! How can I help?"}],
        "stop_reason": "end_turn",
        "stop_sequence": null,
        "usage": {"input_tokens": 12, "output_tokens": 9, "service_tier": "standard"}
    }))
    .unwrap();

    assert_eq!(response.first_text(), Some("Kia ora! How can I help?"));
    assert_eq!(response.stop_reason.as_deref(), Some("end_turn"));

    let usage = response.usage.unwrap();
    assert_eq!(usage.input_tokens, 12);
    assert_eq!(usage.output_tokens, 9);
    assert_eq!(usage.extra["service_tier"], "standard");
}

#[test]
fn test_messages_response_without_content_is_invalid() {
    assert!(serde_json::from_value::<MessagesResponse>(json!({"usage": {}})).is_err());
}

#[test]
fn test_upstream_error_parsing() {
    let error: ErrorResponse = serde_json::from_value(json!({
        "type": "error",
        "error": {"type": "overloaded_error", "message": "Overloaded"}
    }))
    .unwrap();

    assert_eq!(error.message(), Some("Overloaded"));
    assert_eq!(
        error.error.unwrap().error_type.as_deref(),
        Some("overloaded_error")
    );
}

#[test]
fn test_chat_response_serialization() {
    let response = ChatResponse {
        response: "Hello".to_string(),
        usage: Some(Usage {
            input_tokens: 5,
            output_tokens: 3,
            extra: Default::default(),
        }),
    };

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({"response": "Hello", "usage": {"input_tokens": 5, "output_tokens": 3}})
    );
}

#[test]
fn test_error_body_omits_empty_details() {
    let body = ErrorBody {
        error: "Message is required".to_string(),
        details: None,
    };
    assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"error":"Message is required"}"#);
}

#[test]
fn test_partial_usage_is_tolerated() {
    let response: MessagesResponse = serde_json::from_value(json!({
        "content": [{"type": "text", "text": "Hi"}],
        "usage": {"input_tokens": 5}
    }))
    .unwrap();

    let usage = response.usage.unwrap();
    assert_eq!(usage.input_tokens, 5);
    assert_eq!(usage.output_tokens, 0);
}
