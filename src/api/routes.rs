//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Create the application router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Reader-facing features
        .route("/api/chat", post(handlers::chat))
        .route("/api/translate", post(handlers::translate))
        .route("/api/personalize", get(handlers::personalize))
        // Accounts
        .route("/auth/signup", post(handlers::signup))
        .route("/auth/signin", post(handlers::signin))
        .with_state(state)
}
