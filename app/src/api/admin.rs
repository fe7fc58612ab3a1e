//! Admin endpoints:
//! - GET /api/admin/organizers/pending - Organizers awaiting review
//! - POST /api/admin/organizers/:id/approve - Approve
//! - DELETE /api/admin/organizers/:id - Deny (removes the account)
//! - GET /api/admin/analytics - Dashboard figures

use super::error::AppError;
use crate::auth::SessionUser;
use crate::server::state::AppState;
use crate::services::{AnalyticsSummary, Denial};
use axum::{
    Json,
    extract::{Path, State},
};
use eventease_core::{User, UserId};
use uuid::Uuid;

/// # Errors
///
/// 403 `UNAUTHORIZED` unless the caller is an admin.
pub async fn pending_organizers(
    State(state): State<AppState>,
    session: SessionUser,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.services.admin.pending_organizers(&session.user).await?))
}

/// # Errors
///
/// - 403 `UNAUTHORIZED` unless the caller is an admin
/// - 404 `NOT_FOUND` for an unknown user
/// - 422 `VALIDATION` if the user is not an organizer
pub async fn approve_organizer(
    State(state): State<AppState>,
    session: SessionUser,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = state
        .services
        .admin
        .approve_organizer(&session.user, UserId::from_uuid(id))
        .await?;
    Ok(Json(user))
}

/// Deny a pending organizer. Its sessions are closed.
///
/// # Errors
///
/// - 403 `UNAUTHORIZED` unless the caller is an admin
/// - 404 `NOT_FOUND` for an unknown user
/// - 422 `VALIDATION` unless the user is a pending organizer
pub async fn deny_organizer(
    State(state): State<AppState>,
    session: SessionUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Denial>, AppError> {
    let user_id = UserId::from_uuid(id);
    let denial = state.services.admin.deny_organizer(&session.user, user_id).await?;
    state.services.sessions.close_all_for(user_id);
    Ok(Json(denial))
}

/// # Errors
///
/// 403 `UNAUTHORIZED` unless the caller is an admin.
pub async fn analytics(
    State(state): State<AppState>,
    session: SessionUser,
) -> Result<Json<AnalyticsSummary>, AppError> {
    Ok(Json(state.services.admin.analytics(&session.user).await?))
}
