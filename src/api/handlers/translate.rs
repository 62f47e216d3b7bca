//! Translation endpoint

use axum::extract::State;
use axum::Json;
use tracing::info;

use super::AppState;
use crate::api::error::ApiError;
use crate::api::types::TranslateRequest;
use crate::api::types::TranslateResponse;

/// Translate a passage (POST /api/translate)
pub async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    info!("POST /api/translate ({})", request.language);

    let translated_text = state
        .translation
        .translate(&request.text, &request.language, request.module.as_deref())
        .await?;

    Ok(Json(TranslateResponse { translated_text }))
}
