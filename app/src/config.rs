//! Configuration management for EventEase.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Binaries call `dotenvy::dotenv()` first so a local `.env` file is honored.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Booking operation configuration
    pub booking: BookingConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Generative content configuration
    pub assistant: AssistantConfig,
    /// Load the demo catalog at startup
    pub seed_demo_data: bool,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
    /// Browser origins allowed by CORS; empty allows any origin
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
            cors_allowed_origins: Vec::new(),
        }
    }
}

/// Booking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Deadline for a single create/cancel operation, in milliseconds
    pub operation_timeout_ms: u64,
    /// How long a completed idempotency key is remembered, in seconds
    pub idempotency_ttl: u64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            operation_timeout_ms: 5_000,
            idempotency_ttl: 86_400, // 24 hours
        }
    }
}

impl BookingConfig {
    /// Operation deadline as a `Duration`
    #[must_use]
    pub const fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Session TTL in seconds (default: 7 days)
    pub session_ttl: u64,
    /// Argon2 memory cost in KiB
    pub hash_memory_kib: u32,
    /// Argon2 iterations
    pub hash_iterations: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl: 604_800, // 7 days
            hash_memory_kib: 19_456,
            hash_iterations: 2,
        }
    }
}

/// Generative content configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// API key; `None` runs the assistant in fallback-only mode
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// API root URL
    pub api_url: String,
    /// Model for descriptions and chat
    pub text_model: String,
    /// Model for posters
    pub image_model: String,
    /// Per-call timeout in seconds
    pub timeout: u64,
}

impl std::fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: eventease_assistant::client::DEFAULT_API_URL.to_string(),
            text_model: eventease_assistant::client::DEFAULT_TEXT_MODEL.to_string(),
            image_model: eventease_assistant::client::DEFAULT_IMAGE_MODEL.to_string(),
            timeout: 20,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or(defaults.server.host),
                port: parse_env("PORT").unwrap_or(defaults.server.port),
                shutdown_timeout: parse_env("SHUTDOWN_TIMEOUT")
                    .unwrap_or(defaults.server.shutdown_timeout),
                cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .map(|origins| split_list(&origins))
                    .unwrap_or(defaults.server.cors_allowed_origins),
            },
            booking: BookingConfig {
                operation_timeout_ms: parse_env("BOOKING_TIMEOUT_MS")
                    .unwrap_or(defaults.booking.operation_timeout_ms),
                idempotency_ttl: parse_env("BOOKING_IDEMPOTENCY_TTL")
                    .unwrap_or(defaults.booking.idempotency_ttl),
            },
            auth: AuthConfig {
                session_ttl: parse_env("AUTH_SESSION_TTL").unwrap_or(defaults.auth.session_ttl),
                hash_memory_kib: parse_env("AUTH_HASH_MEMORY_KIB")
                    .unwrap_or(defaults.auth.hash_memory_kib),
                hash_iterations: parse_env("AUTH_HASH_ITERATIONS")
                    .unwrap_or(defaults.auth.hash_iterations),
            },
            assistant: AssistantConfig {
                api_key: env::var("GEMINI_API_KEY")
                    .or_else(|_| env::var("API_KEY"))
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
                api_url: env::var("GEMINI_API_URL").unwrap_or(defaults.assistant.api_url),
                text_model: env::var("GEMINI_TEXT_MODEL").unwrap_or(defaults.assistant.text_model),
                image_model: env::var("GEMINI_IMAGE_MODEL")
                    .unwrap_or(defaults.assistant.image_model),
                timeout: parse_env("GEMINI_TIMEOUT").unwrap_or(defaults.assistant.timeout),
            },
            seed_demo_data: parse_env("SEED_DEMO_DATA").unwrap_or(defaults.seed_demo_data),
        }
    }

    /// Socket address string for the HTTP listener
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.trim().parse().ok())
}
