//! Personalization endpoint

use axum::extract::State;
use axum::Json;

use super::AppState;
use crate::api::types::PersonalizationConfig;
use crate::auth::OptionalUser;

/// Reading preferences for the caller (GET /api/personalize)
pub async fn personalize(
    State(state): State<AppState>,
    user: OptionalUser,
) -> Json<PersonalizationConfig> {
    Json(state.personalization.resolve(user.user_id()).await)
}
