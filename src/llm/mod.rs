//! Text generation through Gemini
//!
//! [`LlmService`] walks a primary model and a ladder of fallbacks until one
//! produces text. The HTTP transport sits behind [`ModelBackend`].

mod error;
mod gemini;
pub mod prompts;
mod service;

use async_trait::async_trait;

pub use error::LlmError;
pub use gemini::GeminiClient;
pub use gemini::ModelInfo;
pub use service::LlmService;

/// Report a failed generation as a server-side failure
///
/// A missing API key only surfaces when a request needs the model, so it is
/// reported like any other generation failure.
pub fn generation_failure(err: crate::TextbookRagError) -> crate::TextbookRagError {
    match err {
        crate::TextbookRagError::ConfigError(msg) => crate::TextbookRagError::LlmError(msg),
        other => other,
    }
}

/// One `generateContent` call against a named model
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn generate_content(&self, model: &str, prompt: &str) -> Result<String, LlmError>;
}
