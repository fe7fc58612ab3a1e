//! Authentication extractors.
//!
//! - [`BearerToken`]: raw token from `Authorization: Bearer <token>`
//! - [`SessionUser`]: the account behind a live session
//!
//! ```rust,ignore
//! async fn my_bookings(
//!     State(state): State<AppState>,
//!     session: SessionUser,
//! ) -> Result<Json<Vec<Booking>>, AppError> {
//!     Ok(Json(state.services.bookings.list_by_user(session.user.id).await?))
//! }
//! ```
//!
//! Handlers that also serve anonymous callers take `Option<SessionUser>`.

use crate::api::error::AppError;
use crate::server::state::AppState;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use eventease_core::User;

/// Bearer token extracted from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthenticated("Missing authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or_else(|| {
                AppError::unauthenticated("Invalid authorization format. Expected 'Bearer <token>'")
            })?;

        if token.is_empty() {
            return Err(AppError::unauthenticated("Empty bearer token"));
        }

        Ok(Self(token.to_string()))
    }
}

/// Authenticated account.
///
/// Rejects with 401 when the token is unknown, expired, or belongs to an
/// account that no longer exists (a denied organizer).
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// Current account record
    pub user: User,
    /// Token the request authenticated with
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;

        let user_id = state
            .services
            .sessions
            .resolve(&token)
            .ok_or_else(|| AppError::unauthenticated("Session expired or unknown"))?;

        let Some(user) = state.services.auth.user(user_id).await? else {
            state.services.sessions.close(&token);
            return Err(AppError::unauthenticated("Account no longer exists"));
        };

        Ok(Self { user, token })
    }
}
