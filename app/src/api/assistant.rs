//! Generative content endpoints. They always answer 200 with either
//! generated content or a fixed fallback.
//! - POST /api/assistant/chat - Chatbot over the live catalog (public)
//! - POST /api/assistant/describe - Event description (approved organizer)
//! - POST /api/assistant/image - Event poster (approved organizer)

use super::error::AppError;
use crate::auth::SessionUser;
use crate::server::state::AppState;
use axum::{Json, extract::State};
use eventease_assistant::ChatTurn;
use eventease_core::access::require_event_manager;
use serde::{Deserialize, Serialize};

/// Chat message with the prior conversation.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// New question
    pub message: String,
    /// Earlier turns, oldest first
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

/// Chatbot answer.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Reply text
    pub reply: String,
}

/// Description request.
#[derive(Debug, Deserialize)]
pub struct DescribeRequest {
    /// Event title
    pub title: String,
    /// Event category
    pub category: String,
}

/// Generated description.
#[derive(Debug, Serialize)]
pub struct DescribeResponse {
    /// Description text
    pub description: String,
}

/// Poster request.
#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    /// What the poster should show
    pub prompt: String,
}

/// Generated poster.
#[derive(Debug, Serialize)]
pub struct ImageResponse {
    /// Data URL or fallback image URL
    pub image_url: String,
}

/// # Errors
///
/// - 422 `VALIDATION` for an empty message
/// - 500 `STORAGE` if the catalog cannot be read
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::validation("message must not be empty"));
    }

    let catalog = state.services.events.list_events().await?;
    let reply = state
        .assistant
        .answer_query(message, &catalog, &request.history)
        .await;
    Ok(Json(ChatResponse { reply }))
}

/// # Errors
///
/// 403 `UNAUTHORIZED` unless the caller is an approved organizer.
pub async fn describe(
    State(state): State<AppState>,
    session: SessionUser,
    Json(request): Json<DescribeRequest>,
) -> Result<Json<DescribeResponse>, AppError> {
    require_event_manager(&session.user)?;
    let description = state
        .assistant
        .describe_event(&request.title, &request.category)
        .await;
    Ok(Json(DescribeResponse { description }))
}

/// # Errors
///
/// 403 `UNAUTHORIZED` unless the caller is an approved organizer.
pub async fn image(
    State(state): State<AppState>,
    session: SessionUser,
    Json(request): Json<ImageRequest>,
) -> Result<Json<ImageResponse>, AppError> {
    require_event_manager(&session.user)?;
    let image_url = state.assistant.generate_image(&request.prompt).await;
    Ok(Json(ImageResponse { image_url }))
}
