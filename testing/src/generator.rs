//! Content generator double.

use eventease_assistant::{AssistantError, ChatTurn, ContentGenerator};
use eventease_core::{BoxFuture, Event};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Generator returning canned text, or failing on demand.
///
/// Counts calls so tests can assert the backend was (or was not) reached.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    /// Every call succeeds with `reply`
    #[must_use]
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Every call fails as if rate limited
    #[must_use]
    pub fn failing() -> Self {
        Self::default()
    }

    /// Number of calls received so far
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn respond(&self) -> Result<String, AssistantError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().ok_or(AssistantError::RateLimited)
    }
}

impl ContentGenerator for ScriptedGenerator {
    fn describe_event<'a>(
        &'a self,
        _title: &'a str,
        _category: &'a str,
    ) -> BoxFuture<'a, Result<String, AssistantError>> {
        Box::pin(futures::future::ready(self.respond()))
    }

    fn generate_image<'a>(&'a self, _prompt: &'a str) -> BoxFuture<'a, Result<String, AssistantError>> {
        Box::pin(futures::future::ready(self.respond()))
    }

    fn answer_query<'a>(
        &'a self,
        _question: &'a str,
        _catalog: &'a [Event],
        _history: &'a [ChatTurn],
    ) -> BoxFuture<'a, Result<String, AssistantError>> {
        Box::pin(futures::future::ready(self.respond()))
    }
}
