//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use super::persona::PersonaConfig;
use anyhow::{Context, Result};
use std::fmt;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Anthropic API configuration
    pub upstream: UpstreamConfig,
    /// System prompt configuration
    pub persona: PersonaConfig,
    /// Request configuration
    pub request: RequestConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Anthropic API configuration
#[derive(Clone)]
pub struct UpstreamConfig {
    /// API key, checked on every request rather than at startup
    pub api_key: Option<String>,
    /// API base URL
    pub base_url: String,
    /// Value of the `anthropic-version` header
    pub api_version: String,
    /// Model identifier
    pub model: String,
    /// Maximum output tokens
    pub max_tokens: u32,
    /// Upstream request deadline (None waits indefinitely)
    pub timeout: Option<Duration>,
}

impl UpstreamConfig {
    /// The API key, if one is configured and non-empty
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_key", &self.api_key().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Maximum request size in bytes
    pub max_request_size: usize,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8888,
            },
            upstream: UpstreamConfig {
                api_key: None,
                base_url: "https://api.anthropic.com/v1".to_string(),
                api_version: "2023-06-01".to_string(),
                model: "claude-sonnet-4-20250514".to_string(),
                max_tokens: 4096,
                timeout: Some(Duration::from_secs(26)),
            },
            persona: PersonaConfig::default(),
            request: RequestConfig {
                max_request_size: 65536,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
            },
        }
    }
}

impl Settings {
    /// Create a new configuration instance from the process environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or_default = |key: &str, default: &str| {
            lookup(key).unwrap_or_else(|| default.to_string())
        };

        let timeout_secs: u64 = get_or_default("UPSTREAM_TIMEOUT", "26")
            .parse()
            .context("Invalid upstream timeout value")?;

        let settings = Self {
            server: ServerConfig {
                host: get_or_default("SERVER_HOST", "0.0.0.0"),
                port: get_or_default("SERVER_PORT", "8888")
                    .parse()
                    .context("Invalid port number")?,
            },
            upstream: UpstreamConfig {
                api_key: lookup("ANTHROPIC_API_KEY").map(|key| key.trim().to_string()),
                base_url: get_or_default("ANTHROPIC_BASE_URL", "https://api.anthropic.com/v1"),
                api_version: get_or_default("ANTHROPIC_VERSION", "2023-06-01"),
                model: get_or_default("ANTHROPIC_MODEL", "claude-sonnet-4-20250514"),
                max_tokens: get_or_default("MAX_TOKENS", "4096")
                    .parse()
                    .context("Invalid max tokens value")?,
                timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            },
            persona: PersonaConfig::resolve(lookup("SYSTEM_PROMPT"), lookup("SYSTEM_PROMPT_FILE"))?,
            request: RequestConfig {
                max_request_size: get_or_default("MAX_REQUEST_SIZE", "65536")
                    .parse()
                    .context("Invalid maximum request size")?,
            },
            logging: LoggingConfig {
                level: get_or_default("RUST_LOG", "info"),
                format: get_or_default("LOG_FORMAT", "text"),
            },
        };

        // Validate configuration
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    pub fn validate(&self) -> Result<()> {
        // Validate port range
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        if let Some(key) = self.upstream.api_key() {
            if key.contains(char::is_whitespace) {
                anyhow::bail!("Anthropic API key cannot contain whitespace characters");
            }
        }

        // Validate URL format
        if !self.upstream.base_url.starts_with("http") {
            anyhow::bail!("Invalid Anthropic base URL format, should start with 'http'");
        }

        if self.upstream.model.trim().is_empty() {
            anyhow::bail!("Model identifier cannot be empty");
        }

        if self.upstream.max_tokens == 0 {
            anyhow::bail!("Max tokens cannot be 0");
        }

        // Validate request size limit
        if self.request.max_request_size == 0 {
            anyhow::bail!("Maximum request size cannot be 0");
        }

        // Validate log level
        if let Err(e) = EnvFilter::try_new(&self.logging.level) {
            anyhow::bail!("Invalid log filter {}: {}", self.logging.level, e);
        }

        // Validate log format
        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }
}
