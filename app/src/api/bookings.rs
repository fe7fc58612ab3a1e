//! Booking endpoints:
//! - POST /api/events/:id/bookings - Book one seat (`Idempotency-Key` optional)
//! - GET /api/bookings - Bookings of the caller
//! - DELETE /api/bookings/:id - Cancel (attendee or admin)

use super::error::AppError;
use super::idempotency::IdempotencyHeader;
use crate::auth::SessionUser;
use crate::server::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use eventease_core::{Booking, BookingId, EventId};
use uuid::Uuid;

/// Book a seat.
///
/// ```bash
/// curl -X POST http://localhost:8080/api/events/<event_id>/bookings \
///   -H "Authorization: Bearer <token>" \
///   -H "Idempotency-Key: 550e8400-e29b-41d4-a716-446655440000"
/// ```
///
/// # Errors
///
/// - 409 `NO_SEATS` if the event is sold out
/// - 404 `NOT_FOUND` if the event does not exist
/// - 409 `DUPLICATE_REQUEST` while the same key is in flight
/// - 408 `TIMEOUT`
pub async fn create_booking(
    State(state): State<AppState>,
    session: SessionUser,
    IdempotencyHeader(key): IdempotencyHeader,
    Path(event_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let booking = state
        .services
        .bookings
        .create_booking(EventId::from_uuid(event_id), &session.user, key.as_ref())
        .await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Bookings of the caller, in booking order.
///
/// # Errors
///
/// 401 `UNAUTHENTICATED` without a live session.
pub async fn my_bookings(
    State(state): State<AppState>,
    session: SessionUser,
) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(state.services.bookings.list_by_user(session.user.id).await?))
}

/// Cancel a booking and credit its seat back.
///
/// # Errors
///
/// - 404 `NOT_FOUND` if the booking does not exist
/// - 403 `UNAUTHORIZED` unless the caller is its attendee or an admin
pub async fn cancel_booking(
    State(state): State<AppState>,
    session: SessionUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let booking = state
        .services
        .bookings
        .cancel_booking_for(&session.user, BookingId::from_uuid(id))
        .await?;
    Ok(Json(booking))
}
