//! Chat endpoint

use axum::extract::State;
use axum::Json;
use tracing::info;

use super::AppState;
use crate::api::error::ApiError;
use crate::api::types::ChatRequest;
use crate::api::types::ChatResponse;
use crate::auth::OptionalUser;

/// Answer a reader question (POST /api/chat)
pub async fn chat(
    State(state): State<AppState>,
    user: OptionalUser,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    info!(
        "POST /api/chat (signed in: {})",
        user.user_id().is_some()
    );

    let response = state
        .chat
        .answer(
            request.message.as_deref(),
            request.context.as_deref(),
            user.user_id(),
        )
        .await?;

    Ok(Json(ChatResponse { response }))
}
