//! Health check handlers
//!
//! Provides application health status check endpoints

use crate::handlers::AppState;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};
use std::time::Instant;
use tracing::debug;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version information
    pub version: String,
    /// Timestamp
    pub timestamp: String,
    /// Details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HealthDetails>,
}

/// Check result
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthDetails {
    /// Whether an API key is present
    pub upstream_configured: bool,
    /// Model requests are relayed to
    pub model: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// Basic health check
///
/// GET /health
/// Reports process status without contacting the upstream API
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing health check");

    let response = HealthResponse {
        status: "healthy".to_string(),
        service: crate::NAME.to_string(),
        version: crate::VERSION.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: Some(HealthDetails {
            upstream_configured: state.settings.upstream.api_key().is_some(),
            model: state.settings.upstream.model.clone(),
            uptime_seconds: get_uptime_seconds(),
        }),
    };

    Json(response)
}

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Record the process start time (first call wins)
pub(crate) fn start_uptime_clock() {
    START_TIME.get_or_init(Instant::now);
}

/// Get service uptime in seconds
fn get_uptime_seconds() -> u64 {
    START_TIME.get_or_init(Instant::now).elapsed().as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::services::AnthropicClient;

    fn create_test_state(api_key: Option<&str>) -> Arc<AppState> {
        let mut settings = Settings::default();
        settings.upstream.api_key = api_key.map(str::to_string);
        let client = AnthropicClient::new(&settings.upstream).unwrap();

        Arc::new(AppState {
            settings,
            client: Arc::new(client),
        })
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = health_check(State(create_test_state(Some("sk-ant-test")))).await.0;

        assert_eq!(response.status, "healthy");
        assert_eq!(response.service, "chatrelay");
        let details = response.details.unwrap();
        assert!(details.upstream_configured);
        assert_eq!(details.model, "claude-sonnet-4-20250514");
    }

    #[tokio::test]
    async fn test_health_reports_missing_key() {
        let response = health_check(State(create_test_state(None))).await.0;
        assert!(!response.details.unwrap().upstream_configured);
    }

    #[test]
    fn test_uptime_calculation() {
        let uptime1 = get_uptime_seconds();
        std::thread::sleep(std::time::Duration::from_millis(100));
        let uptime2 = get_uptime_seconds();

        // The second call's uptime should be greater than or equal to the first
        assert!(uptime2 >= uptime1);
    }
}
