//! Router configuration.

use super::health::{health_check, metrics, readiness_check};
use super::state::AppState;
use crate::api::{admin, assistant, auth, bookings, events};
use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

/// Build the complete router.
///
/// ```text
/// /health, /ready, /metrics              no authentication
/// /api/auth/*, /api/navigate/:page       public (navigate reads an optional session)
/// /api/events (GET), /api/assistant/chat public
/// everything else                        bearer session; role gate in the services
/// ```
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Accounts
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/navigate/:page", get(auth::navigate))
        // Catalog
        .route("/events", get(events::search_events).post(events::create_event))
        .route("/events/categories", get(events::categories))
        .route(
            "/events/:id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/events/:id/attendees", get(events::attendees))
        .route("/organizer/events", get(events::organizer_events))
        // Bookings
        .route("/events/:id/bookings", post(bookings::create_booking))
        .route("/bookings", get(bookings::my_bookings))
        .route("/bookings/:id", delete(bookings::cancel_booking))
        // Administration
        .route("/admin/organizers/pending", get(admin::pending_organizers))
        .route("/admin/organizers/:id/approve", post(admin::approve_organizer))
        .route("/admin/organizers/:id", delete(admin::deny_organizer))
        .route("/admin/analytics", get(admin::analytics))
        // Generative content
        .route("/assistant/chat", post(assistant::chat))
        .route("/assistant/describe", post(assistant::describe))
        .route("/assistant/image", post(assistant::image));

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
