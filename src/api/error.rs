//! Error responses

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;
use tracing::error;
use tracing::warn;

use crate::TextbookRagError;

/// Handler error rendered as `{"detail": "..."}`
#[derive(Debug)]
pub struct ApiError(pub TextbookRagError);

impl From<TextbookRagError> for ApiError {
    fn from(err: TextbookRagError) -> Self {
        Self(err)
    }
}

/// HTTP status for a crate error
pub fn status_for(err: &TextbookRagError) -> StatusCode {
    match err {
        TextbookRagError::ConfigError(_) | TextbookRagError::DatabaseUnavailable => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        TextbookRagError::InvalidInput(_) | TextbookRagError::DuplicateEmail => {
            StatusCode::BAD_REQUEST
        }
        TextbookRagError::Unauthorized => StatusCode::UNAUTHORIZED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            error!("Request failed ({}): {}", status, self.0);
        } else {
            warn!("Request rejected ({}): {}", status, self.0);
        }

        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&TextbookRagError::DatabaseUnavailable),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(&TextbookRagError::ConfigError("x".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(status_for(&TextbookRagError::DuplicateEmail), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&TextbookRagError::InvalidInput("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_for(&TextbookRagError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_for(&TextbookRagError::LlmError("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_body_carries_detail() {
        let response = ApiError(TextbookRagError::DuplicateEmail).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"detail": "Email already registered"}));
    }
}
