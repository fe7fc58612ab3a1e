//! Account endpoints:
//! - POST /api/auth/register - Create an account and open a session
//! - POST /api/auth/login - Open a session
//! - POST /api/auth/logout - End the current session
//! - GET /api/me - Current account and what it may access
//! - GET /api/navigate/:page - Resolve a page request through the role gate

use super::error::AppError;
use crate::auth::SessionUser;
use crate::server::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use eventease_core::access::{
    DashboardTarget, Page, can_access_admin, can_manage_events, resolve_page, route_after_login,
};
use eventease_core::{Registration, User};
use serde::{Deserialize, Serialize};

/// Login credentials.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Account email
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// An opened session and where to send the user.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    /// Session expiry
    pub expires_at: DateTime<Utc>,
    /// The account
    pub user: User,
    /// Landing page after login
    pub dashboard: DashboardTarget,
}

/// Current account with its gate decisions.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    /// The account
    pub user: User,
    /// Landing page
    pub dashboard: DashboardTarget,
    /// May create and manage events
    pub can_manage_events: bool,
    /// May open the admin dashboard
    pub can_access_admin: bool,
}

/// Page the caller is allowed to see.
#[derive(Debug, Serialize)]
pub struct NavigateResponse {
    /// Page asked for
    pub requested: Page,
    /// Page to show
    pub page: Page,
}

fn open_session(state: &AppState, user: User) -> SessionResponse {
    let session = state.services.sessions.open(user.id);
    SessionResponse {
        token: session.token,
        expires_at: session.expires_at,
        dashboard: route_after_login(&user),
        user,
    }
}

/// Register an account.
///
/// ```bash
/// curl -X POST http://localhost:8080/api/auth/register \
///   -H "Content-Type: application/json" \
///   -d '{"name":"Dana","email":"dana@example.com","password":"password","role":"organizer"}'
/// ```
///
/// # Errors
///
/// - 409 `EMAIL_TAKEN`
/// - 403 `UNAUTHORIZED` for an admin sign-up
/// - 422 `VALIDATION`
pub async fn register(
    State(state): State<AppState>,
    Json(registration): Json<Registration>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let user = state.services.auth.register(registration).await?;
    Ok((StatusCode::CREATED, Json(open_session(&state, user))))
}

/// Log in.
///
/// # Errors
///
/// 401 `INVALID_CREDENTIALS` for an unknown email or a wrong password.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let user = state
        .services
        .auth
        .login(&request.email, &request.password)
        .await?;
    Ok(Json(open_session(&state, user)))
}

/// Log out. Rejected with 401 `UNAUTHENTICATED` without a live session.
pub async fn logout(State(state): State<AppState>, session: SessionUser) -> StatusCode {
    state.services.sessions.close(&session.token);
    tracing::info!(user_id = %session.user.id, "User logged out");
    StatusCode::NO_CONTENT
}

/// Current account. Rejected with 401 `UNAUTHENTICATED` without a live session.
pub async fn me(session: SessionUser) -> Json<MeResponse> {
    let user = session.user;
    Json(MeResponse {
        dashboard: route_after_login(&user),
        can_manage_events: can_manage_events(&user),
        can_access_admin: can_access_admin(&user),
        user,
    })
}

/// Resolve a page request. Never fails for a known page: forbidden
/// dashboards resolve to a page the caller may see.
pub async fn navigate(
    session: Option<SessionUser>,
    Path(requested): Path<Page>,
) -> Json<NavigateResponse> {
    let page = resolve_page(session.as_ref().map(|s| &s.user), requested);
    Json(NavigateResponse { requested, page })
}
