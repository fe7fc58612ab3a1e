//! Error types for the generative content client

use thiserror::Error;

/// Errors that can occur when talking to the generative content API
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Neither `GEMINI_API_KEY` nor `API_KEY` is set
    #[error("Missing GEMINI_API_KEY or API_KEY environment variable")]
    MissingApiKey,

    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response parsing failed
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Rate limited - too many requests
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Unauthorized - invalid API key
    #[error("Unauthorized - invalid API key")]
    Unauthorized,

    /// API returned an error
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// The response carried no usable text or image
    #[error("Empty response from {0}")]
    EmptyResponse(&'static str),

    /// The call did not finish in time
    #[error("Generation timed out after {0}ms")]
    Timeout(u64),
}
