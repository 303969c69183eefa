//! Error handling module unit tests

use axum::http::StatusCode;
use axum::response::IntoResponse;
use chatrelay::utils::error::*;
use serde_json::{json, Value};

async fn render(error: AppError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[test]
fn test_app_error_status_codes() {
    let test_cases = vec![
        (AppError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED),
        (AppError::PayloadTooLarge, StatusCode::PAYLOAD_TOO_LARGE),
        (AppError::MissingMessage, StatusCode::BAD_REQUEST),
        (AppError::MissingApiKey, StatusCode::INTERNAL_SERVER_ERROR),
        (AppError::Timeout("deadline".to_string()), StatusCode::GATEWAY_TIMEOUT),
        (AppError::MalformedUpstream("test".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        (AppError::Internal("test".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        (
            AppError::Upstream { status: 429, message: "slow down".to_string() },
            StatusCode::TOO_MANY_REQUESTS,
        ),
    ];

    for (error, expected_status) in test_cases {
        assert_eq!(error.status_code(), expected_status);
    }
}

#[tokio::test]
async fn test_client_error_bodies() {
    assert_eq!(
        render(AppError::MethodNotAllowed).await,
        (StatusCode::METHOD_NOT_ALLOWED, json!({"error": "Method not allowed"}))
    );
    assert_eq!(
        render(AppError::MissingMessage).await,
        (StatusCode::BAD_REQUEST, json!({"error": "Message is required"}))
    );
}

#[tokio::test]
async fn test_upstream_error_body_has_no_details() {
    let (status, body) = render(AppError::Upstream {
        status: 529,
        message: "overloaded".to_string(),
    })
    .await;

    assert_eq!(status.as_u16(), 529);
    assert_eq!(body, json!({"error": "overloaded"}));
}

#[tokio::test]
async fn test_server_failures_use_generic_message() {
    let (status, body) = render(AppError::MalformedUpstream("missing content".to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
    assert_eq!(body["details"], "missing content");
}

#[test]
fn test_error_display_is_public_message() {
    assert_eq!(AppError::MissingMessage.to_string(), "Message is required");
    assert!(AppError::MissingApiKey
        .to_string()
        .starts_with("API key not configured."));
}
