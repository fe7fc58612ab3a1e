//! # EventEase Assistant
//!
//! Generative content for EventEase: event descriptions, event posters and
//! the chatbot that answers questions about the catalog.
//!
//! Generation is best-effort. The [`Assistant`] wrapper never fails: when the
//! backing [`ContentGenerator`] errors, times out, or is not configured, it
//! returns a fixed fallback so booking flows are never blocked.
//!
//! ## Example
//!
//! ```no_run
//! use eventease_assistant::{Assistant, GeminiClient};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     // Reads GEMINI_API_KEY (or API_KEY); without a key the assistant only returns fallbacks
//!     let assistant = match GeminiClient::from_env() {
//!         Ok(client) => Assistant::new(Arc::new(client), Duration::from_secs(20)),
//!         Err(_) => Assistant::disabled(),
//!     };
//!
//!     let text = assistant.describe_event("Startup Pitch Night", "Business").await;
//!     println!("{text}");
//! }
//! ```

pub mod client;
pub mod error;
pub mod messages;
pub mod prompts;
pub mod service;
pub mod types;

// Re-export main types for convenience
pub use client::GeminiClient;
pub use error::AssistantError;
pub use messages::{GenerateContentRequest, GenerateContentResponse, PredictRequest, PredictResponse};
pub use service::{
    Assistant, ContentGenerator, FALLBACK_CHAT_REPLY, FALLBACK_DESCRIPTION, FALLBACK_IMAGE_URL,
};
pub use types::{ChatRole, ChatTurn, Content, Part};
