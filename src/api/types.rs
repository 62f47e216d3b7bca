//! API request and response types

use serde::Deserialize;
use serde::Serialize;

pub use crate::auth::AuthResponse;
pub use crate::auth::AuthUser;
pub use crate::auth::SigninRequest;
pub use crate::auth::SignupRequest;
pub use crate::personalization::PersonalizationConfig;

/// Service banner for `GET /`
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Chat request; at least one of the fields must be non-empty
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    /// Text the reader selected on the page
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub module: Option<String>,
}

fn default_language() -> String {
    "ur".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_language_defaults_to_urdu() {
        let request: TranslateRequest = serde_json::from_str(r#"{"text": "Hello"}"#).unwrap();
        assert_eq!(request.language, "ur");
        assert!(request.module.is_none());
    }

    #[test]
    fn test_chat_request_fields_optional() {
        let request: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(request.message.is_none());
        assert!(request.context.is_none());
    }
}
