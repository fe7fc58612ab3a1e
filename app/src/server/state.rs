//! Shared state for HTTP handlers.

use crate::services::Services;
use eventease_assistant::Assistant;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Application state, cloned (cheaply, via `Arc`) into every request.
#[derive(Clone)]
pub struct AppState {
    /// Domain services
    pub services: Services,
    /// Generative content with fallbacks
    pub assistant: Arc<Assistant>,
    /// Prometheus render handle, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("services", &self.services)
            .field("assistant", &self.assistant)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl AppState {
    /// Create the state.
    #[must_use]
    pub fn new(services: Services, assistant: Assistant) -> Self {
        Self {
            services,
            assistant: Arc::new(assistant),
            metrics: None,
        }
    }

    /// Builder: serve `/metrics` from `handle`
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
