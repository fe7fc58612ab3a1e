//! HTTP server: state, router, health checks, CORS and the serve loop.

pub mod cors;
pub mod health;
pub mod routes;
pub mod state;

pub use cors::cors_layer;
pub use routes::build_router;
pub use state::AppState;

use crate::config::Config;
use std::time::Duration;
use thiserror::Error;
use tokio::signal;

/// Failures that stop the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listener could not be bound
    #[error("failed to bind {address}: {source}")]
    Bind {
        /// Address from the configuration
        address: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The accept loop failed
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),

    /// In-flight requests outlived the shutdown timeout
    #[error("graceful shutdown exceeded {0:?}")]
    ShutdownTimeout(Duration),
}

/// Serve `state` until Ctrl+C or SIGTERM, then drain in-flight requests
/// for at most `config.server.shutdown_timeout` seconds.
///
/// # Errors
///
/// Returns [`ServerError`] if binding or serving fails, or draining times out.
pub async fn serve(config: &Config, state: AppState) -> Result<(), ServerError> {
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;

    let router = build_router(state).layer(cors_layer(&config.server.cors_allowed_origins));
    tracing::info!(%address, "HTTP server listening");

    let (drain_tx, drain_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = drain_tx.send(());
    });

    let drain_limit = Duration::from_secs(config.server.shutdown_timeout);
    let mut server = std::pin::pin!(server.into_future());

    tokio::select! {
        result = &mut server => result?,
        () = async {
            let _ = drain_rx.await;
            tokio::time::sleep(drain_limit).await;
        } => {
            tracing::warn!(?drain_limit, "Graceful shutdown timed out");
            return Err(ServerError::ShutdownTimeout(drain_limit));
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!(%error, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
