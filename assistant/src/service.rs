//! Best-effort content generation.
//!
//! [`ContentGenerator`] is the fallible seam the HTTP client implements.
//! [`Assistant`] wraps one with a timeout and turns every failure into a
//! fixed fallback string, so callers never see an error.

use crate::error::AssistantError;
use crate::types::ChatTurn;
use eventease_core::{BoxFuture, Event};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Returned when a description cannot be generated.
pub const FALLBACK_DESCRIPTION: &str =
    "There was an error generating the description. Please try again.";

/// Returned when a poster cannot be generated.
pub const FALLBACK_IMAGE_URL: &str = "https://picsum.photos/seed/error/400/250";

/// Returned when the chatbot cannot answer.
pub const FALLBACK_CHAT_REPLY: &str =
    "I'm having a little trouble right now. Please try again later.";

/// A source of generated content.
pub trait ContentGenerator: Send + Sync {
    /// 2-3 sentence description for an event.
    fn describe_event<'a>(
        &'a self,
        title: &'a str,
        category: &'a str,
    ) -> BoxFuture<'a, Result<String, AssistantError>>;

    /// Poster image for a prompt, as a URL or data URL.
    fn generate_image<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, AssistantError>>;

    /// Chatbot answer grounded in `catalog`, continuing `history`.
    fn answer_query<'a>(
        &'a self,
        question: &'a str,
        catalog: &'a [Event],
        history: &'a [ChatTurn],
    ) -> BoxFuture<'a, Result<String, AssistantError>>;
}

/// Generator wrapper that never fails.
#[derive(Clone)]
pub struct Assistant {
    generator: Option<Arc<dyn ContentGenerator>>,
    timeout: Duration,
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("enabled", &self.is_enabled())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Assistant {
    /// Wraps a generator; calls longer than `timeout` fall back.
    #[must_use]
    pub fn new(generator: Arc<dyn ContentGenerator>, timeout: Duration) -> Self {
        Self {
            generator: Some(generator),
            timeout,
        }
    }

    /// An assistant with no backend. Every call returns its fallback.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            generator: None,
            timeout: Duration::ZERO,
        }
    }

    /// Whether a backend is configured
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Event description, or [`FALLBACK_DESCRIPTION`].
    pub async fn describe_event(&self, title: &str, category: &str) -> String {
        let Some(generator) = &self.generator else {
            return fallback("describe_event", FALLBACK_DESCRIPTION);
        };
        self.run(
            "describe_event",
            generator.describe_event(title, category),
            FALLBACK_DESCRIPTION,
        )
        .await
    }

    /// Poster URL, or [`FALLBACK_IMAGE_URL`].
    pub async fn generate_image(&self, prompt: &str) -> String {
        let Some(generator) = &self.generator else {
            return fallback("generate_image", FALLBACK_IMAGE_URL);
        };
        self.run(
            "generate_image",
            generator.generate_image(prompt),
            FALLBACK_IMAGE_URL,
        )
        .await
    }

    /// Chatbot reply, or [`FALLBACK_CHAT_REPLY`].
    pub async fn answer_query(
        &self,
        question: &str,
        catalog: &[Event],
        history: &[ChatTurn],
    ) -> String {
        let Some(generator) = &self.generator else {
            return fallback("answer_query", FALLBACK_CHAT_REPLY);
        };
        self.run(
            "answer_query",
            generator.answer_query(question, catalog, history),
            FALLBACK_CHAT_REPLY,
        )
        .await
    }

    async fn run<F>(&self, operation: &'static str, call: F, fallback_text: &str) -> String
    where
        F: Future<Output = Result<String, AssistantError>>,
    {
        let outcome = match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(AssistantError::Timeout(
                u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            )),
        };

        match outcome {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(operation, error = %error, "Content generation failed, using fallback");
                fallback(operation, fallback_text)
            }
        }
    }
}

fn fallback(operation: &'static str, text: &str) -> String {
    metrics::counter!("eventease_assistant_fallbacks_total", "operation" => operation).increment(1);
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted(Result<&'static str, ()>);

    impl Scripted {
        fn reply(&self) -> Result<String, AssistantError> {
            self.0
                .map(str::to_string)
                .map_err(|()| AssistantError::RateLimited)
        }
    }

    impl ContentGenerator for Scripted {
        fn describe_event<'a>(
            &'a self,
            _title: &'a str,
            _category: &'a str,
        ) -> BoxFuture<'a, Result<String, AssistantError>> {
            Box::pin(async move { self.reply() })
        }

        fn generate_image<'a>(&'a self, _prompt: &'a str) -> BoxFuture<'a, Result<String, AssistantError>> {
            Box::pin(async move { self.reply() })
        }

        fn answer_query<'a>(
            &'a self,
            _question: &'a str,
            _catalog: &'a [Event],
            _history: &'a [ChatTurn],
        ) -> BoxFuture<'a, Result<String, AssistantError>> {
            Box::pin(async move { self.reply() })
        }
    }

    struct Stalled;

    impl ContentGenerator for Stalled {
        fn describe_event<'a>(
            &'a self,
            _title: &'a str,
            _category: &'a str,
        ) -> BoxFuture<'a, Result<String, AssistantError>> {
            Box::pin(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok("too late".to_string())
            })
        }

        fn generate_image<'a>(&'a self, _prompt: &'a str) -> BoxFuture<'a, Result<String, AssistantError>> {
            Box::pin(futures::future::pending())
        }

        fn answer_query<'a>(
            &'a self,
            _question: &'a str,
            _catalog: &'a [Event],
            _history: &'a [ChatTurn],
        ) -> BoxFuture<'a, Result<String, AssistantError>> {
            Box::pin(futures::future::pending())
        }
    }

    fn assistant(generator: impl ContentGenerator + 'static) -> Assistant {
        Assistant::new(Arc::new(generator), Duration::from_millis(50))
    }

    #[tokio::test]
    async fn test_success_passes_text_through() {
        let assistant = assistant(Scripted(Ok("A great night.")));
        assert_eq!(assistant.describe_event("t", "c").await, "A great night.");
        assert_eq!(assistant.answer_query("q", &[], &[]).await, "A great night.");
    }

    #[tokio::test]
    async fn test_failure_uses_operation_fallback() {
        let assistant = assistant(Scripted(Err(())));
        assert_eq!(assistant.describe_event("t", "c").await, FALLBACK_DESCRIPTION);
        assert_eq!(assistant.generate_image("p").await, FALLBACK_IMAGE_URL);
        assert_eq!(
            assistant.answer_query("q", &[], &[ChatTurn::user("hi")]).await,
            FALLBACK_CHAT_REPLY
        );
    }

    #[tokio::test]
    async fn test_timeout_uses_fallback() {
        let assistant = assistant(Stalled);
        assert_eq!(assistant.describe_event("t", "c").await, FALLBACK_DESCRIPTION);
        assert_eq!(assistant.generate_image("p").await, FALLBACK_IMAGE_URL);
        assert_eq!(assistant.answer_query("q", &[], &[]).await, FALLBACK_CHAT_REPLY);
    }

    #[tokio::test]
    async fn test_disabled_assistant_always_falls_back() {
        let assistant = Assistant::disabled();
        assert!(!assistant.is_enabled());
        assert_eq!(assistant.describe_event("t", "c").await, FALLBACK_DESCRIPTION);
        assert_eq!(assistant.generate_image("p").await, FALLBACK_IMAGE_URL);
        assert_eq!(assistant.answer_query("q", &[], &[]).await, FALLBACK_CHAT_REPLY);
    }
}
