//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod chat;
pub mod health;

use crate::config::Settings;
use crate::middleware::logging::request_logging_middleware;
use crate::services::{AnthropicClient, CompletionClient};
use anyhow::Result;
use axum::{
    http::{header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue},
    middleware,
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub client: Arc<dyn CompletionClient>,
}

/// Create application router backed by the Anthropic API
pub fn create_router(settings: Settings) -> Result<Router> {
    let client = AnthropicClient::new(&settings.upstream)?;

    Ok(create_router_with_client(settings, Arc::new(client)))
}

/// Create application router with a caller-supplied completion client
pub fn create_router_with_client(settings: Settings, client: Arc<dyn CompletionClient>) -> Router {
    health::start_uptime_clock();
    let app_state = Arc::new(AppState { settings, client });

    // Every response, including errors, is readable cross-origin
    let middleware_stack = ServiceBuilder::new()
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ));

    Router::new()
        .route("/chat", any(chat::handle_chat))
        .route("/.netlify/functions/chat", any(chat::handle_chat))
        .route("/health", get(health::health_check))
        .with_state(app_state)
        .layer(middleware_stack)
}
