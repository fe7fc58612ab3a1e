//! `Idempotency-Key` header support for booking creation.
//!
//! ```text
//! POST /api/events/{id}/bookings
//! Idempotency-Key: 550e8400-e29b-41d4-a716-446655440000
//! Authorization: Bearer <token>
//! ```
//!
//! - First request: books a seat and remembers the booking
//! - Retry with the same key: returns the remembered booking, no new seat
//! - Retry while the first is still running: 409 `DUPLICATE_REQUEST`
//!
//! Keys are scoped by user and must be 16 to 128 characters.

use super::error::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use eventease_core::IdempotencyKey;

/// Header name
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Optional idempotency key of a request.
#[derive(Debug, Clone)]
pub struct IdempotencyHeader(pub Option<IdempotencyKey>);

#[async_trait]
impl<S> FromRequestParts<S> for IdempotencyHeader
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(IDEMPOTENCY_KEY_HEADER) else {
            return Ok(Self(None));
        };

        let raw = value
            .to_str()
            .map_err(|_| AppError::validation("Invalid Idempotency-Key header value"))?;

        Ok(Self(Some(IdempotencyKey::parse(raw.trim())?)))
    }
}
