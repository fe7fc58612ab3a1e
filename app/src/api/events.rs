//! Event endpoints:
//! - GET /api/events - Search (`q`, `category`)
//! - GET /api/events/categories - Category filter values
//! - GET /api/events/:id - Event details
//! - POST /api/events - Create (approved organizer)
//! - PUT /api/events/:id - Edit (owner)
//! - DELETE /api/events/:id - Delete with its bookings (owner or admin)
//! - GET /api/events/:id/attendees - Bookings of an event (owner or admin)
//! - GET /api/organizer/events - Events of the current organizer

use super::error::AppError;
use crate::auth::SessionUser;
use crate::server::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use eventease_core::{Booking, Event, EventDraft, EventId, EventUpdate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Search filters.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Substring of title or description
    pub q: Option<String>,
    /// Exact category, `All` for any
    pub category: Option<String>,
}

/// Outcome of deleting an event.
#[derive(Debug, Serialize)]
pub struct DeleteEventResponse {
    /// Deleted event
    pub event_id: EventId,
    /// Bookings removed with it
    pub deleted_bookings: usize,
}

/// Search the catalog, newest first.
///
/// # Errors
///
/// 500 `STORAGE` on backend failure.
pub async fn search_events(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Event>>, AppError> {
    let events = state
        .services
        .events
        .search_events(query.q.as_deref(), query.category.as_deref())
        .await?;
    Ok(Json(events))
}

/// Category filter values, `All` first.
///
/// # Errors
///
/// 500 `STORAGE` on backend failure.
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.services.events.categories().await?))
}

/// Event details.
///
/// # Errors
///
/// 404 `NOT_FOUND` if the event does not exist.
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Event>, AppError> {
    let event = state.services.events.get_event(EventId::from_uuid(id)).await?;
    Ok(Json(event))
}

/// Create an event.
///
/// ```bash
/// curl -X POST http://localhost:8080/api/events \
///   -H "Authorization: Bearer <token>" \
///   -H "Content-Type: application/json" \
///   -d '{
///     "title": "Jazz Night",
///     "category": "Music",
///     "location": "Blue Note",
///     "starts_at": "2025-03-01T20:00:00Z",
///     "ticket_price": 4500,
///     "seats_available": 80
///   }'
/// ```
///
/// # Errors
///
/// - 403 `UNAUTHORIZED` unless the caller is an approved organizer
/// - 422 `VALIDATION` for blank required fields
pub async fn create_event(
    State(state): State<AppState>,
    session: SessionUser,
    Json(draft): Json<EventDraft>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let event = state.services.events.create_event(&session.user, draft).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Edit an event.
///
/// # Errors
///
/// - 404 `NOT_FOUND` if the event does not exist
/// - 403 `UNAUTHORIZED` unless the caller owns it
/// - 422 `VALIDATION` for an invalid edit
pub async fn update_event(
    State(state): State<AppState>,
    session: SessionUser,
    Path(id): Path<Uuid>,
    Json(update): Json<EventUpdate>,
) -> Result<Json<Event>, AppError> {
    let event = state
        .services
        .events
        .update_event(&session.user, EventId::from_uuid(id), update)
        .await?;
    Ok(Json(event))
}

/// Delete an event and its bookings.
///
/// # Errors
///
/// - 404 `NOT_FOUND` if the event does not exist
/// - 403 `UNAUTHORIZED` unless the caller owns it or is an admin
pub async fn delete_event(
    State(state): State<AppState>,
    session: SessionUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteEventResponse>, AppError> {
    let event_id = EventId::from_uuid(id);
    let deleted_bookings = state
        .services
        .events
        .delete_event(&session.user, event_id)
        .await?;
    Ok(Json(DeleteEventResponse {
        event_id,
        deleted_bookings,
    }))
}

/// Bookings of an event.
///
/// # Errors
///
/// - 404 `NOT_FOUND` if the event does not exist
/// - 403 `UNAUTHORIZED` unless the caller owns it or is an admin
pub async fn attendees(
    State(state): State<AppState>,
    session: SessionUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = state
        .services
        .events
        .attendees(&session.user, EventId::from_uuid(id))
        .await?;
    Ok(Json(bookings))
}

/// Events created by the caller.
///
/// # Errors
///
/// 403 `UNAUTHORIZED` unless the caller is an approved organizer.
pub async fn organizer_events(
    State(state): State<AppState>,
    session: SessionUser,
) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(state.services.events.organizer_events(&session.user).await?))
}
