//! Generation provider failures

use reqwest::StatusCode;

/// Why a single `generateContent` call failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LlmError {
    #[error("Resource exhausted: {0}")]
    RateLimited(String),

    #[error("Model not found: {0}")]
    NotFound(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl LlmError {
    /// Classify a non-success HTTP response
    pub fn from_status(status: StatusCode, body: String) -> Self {
        if status == StatusCode::TOO_MANY_REQUESTS || body.contains("RESOURCE_EXHAUSTED") {
            Self::RateLimited(body)
        } else if status == StatusCode::NOT_FOUND {
            Self::NotFound(body)
        } else {
            Self::Api {
                status: status.as_u16(),
                message: body,
            }
        }
    }

    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited(_))
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<LlmError> for crate::TextbookRagError {
    fn from(err: LlmError) -> Self {
        Self::LlmError(err.to_string())
    }
}
