//! EventEase HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Optional: generative content
//! export GEMINI_API_KEY=...
//!
//! SEED_DEMO_DATA=true cargo run --bin server
//! ```

use eventease::{Config, Services, metrics, seed, server};
use eventease_assistant::{Assistant, GeminiClient};
use eventease_core::environment::SystemClock;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,eventease=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting EventEase server");

    let config = Config::from_env();
    tracing::info!(
        address = %config.bind_address(),
        booking_timeout_ms = config.booking.operation_timeout_ms,
        assistant = config.assistant.api_key.is_some(),
        seed = config.seed_demo_data,
        "Configuration loaded"
    );

    let prometheus = metrics::install_prometheus()?;

    let services = Services::in_memory(&config, Arc::new(SystemClock));
    if config.seed_demo_data {
        let demo = seed::load_demo_data(&services).await?;
        tracing::info!(events = demo.events.len(), "Demo catalog loaded");
    }

    let assistant = build_assistant(&config);
    let state = server::AppState::new(services, assistant).with_metrics(prometheus);

    server::serve(&config, state).await?;
    Ok(())
}

fn build_assistant(config: &Config) -> Assistant {
    let settings = &config.assistant;
    let Some(api_key) = settings.api_key.clone() else {
        tracing::warn!("No GEMINI_API_KEY or API_KEY set; assistant answers with fallbacks only");
        return Assistant::disabled();
    };

    let client = GeminiClient::new(api_key)
        .with_api_url(&settings.api_url)
        .with_text_model(&settings.text_model)
        .with_image_model(&settings.image_model);
    tracing::info!(text_model = %settings.text_model, image_model = %settings.image_model, "Assistant enabled");
    Assistant::new(Arc::new(client), Duration::from_secs(settings.timeout))
}
