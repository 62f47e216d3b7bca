//! Account endpoints

use axum::extract::State;
use axum::Json;
use tracing::info;

use super::AppState;
use crate::api::error::ApiError;
use crate::api::types::AuthResponse;
use crate::api::types::SigninRequest;
use crate::api::types::SignupRequest;

/// Register with the background questionnaire (POST /auth/signup)
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    info!("POST /auth/signup");
    Ok(Json(state.auth.signup(request).await?))
}

/// Sign in with email and password (POST /auth/signin)
pub async fn signin(
    State(state): State<AppState>,
    Json(request): Json<SigninRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    info!("POST /auth/signin");
    Ok(Json(state.auth.signin(request).await?))
}
