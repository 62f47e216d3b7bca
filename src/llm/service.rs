//! Model ladder: primary model first, then fallbacks with rate-limit backoff

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use tracing::info;
use tracing::warn;

use super::prompts::build_translation_prompt;
use super::GeminiClient;
use super::LlmError;
use super::ModelBackend;
use crate::config::AppConfig;
use crate::config::LlmConfig;
use crate::errors::Result;
use crate::errors::TextbookRagError;

/// Generation service shared by chat and translation
pub struct LlmService {
    backend: Option<Arc<dyn ModelBackend>>,
    primary_model: String,
    fallback_models: Vec<String>,
    max_attempts: u32,
    retry_delay: Duration,
}

impl LlmService {
    /// Create a new LLM service
    ///
    /// A missing API key is not an error here; every call will fail with a
    /// configuration error instead.
    ///
    /// # Errors
    /// - HTTP client build errors
    pub fn new(config: &AppConfig) -> Result<Self> {
        let backend: Option<Arc<dyn ModelBackend>> = match config.llm_key() {
            Some(key) => Some(Arc::new(GeminiClient::new(
                config.llm_endpoint(),
                key.to_string(),
                config.http_timeout(),
            )?)),
            None => {
                warn!("GEMINI_API_KEY not set. Chat and translation will be unavailable.");
                None
            }
        };

        Ok(Self::with_backend(backend, &config.llm))
    }

    /// Create from an existing backend
    #[must_use]
    pub fn with_backend(backend: Option<Arc<dyn ModelBackend>>, config: &LlmConfig) -> Self {
        Self {
            backend,
            primary_model: config.primary_model.clone(),
            fallback_models: config.fallback_models.clone(),
            max_attempts: config.max_attempts.max(1),
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Generate text for `prompt`
    ///
    /// # Errors
    /// - `ConfigError` when no API key is configured
    /// - `LlmError` when the primary and every fallback model failed
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let backend = self.backend.as_ref().ok_or_else(|| {
            TextbookRagError::ConfigError("GEMINI_API_KEY not configured".to_string())
        })?;

        let mut last_error = match call(backend.as_ref(), &self.primary_model, prompt).await {
            Ok(text) => {
                info!("Generated response with {}", self.primary_model);
                return Ok(text);
            }
            Err(e) => {
                warn!("Primary model {} failed: {}", self.primary_model, e);
                e
            }
        };

        for model in &self.fallback_models {
            let mut attempt = 1;
            loop {
                match call(backend.as_ref(), model, prompt).await {
                    Ok(text) => {
                        info!("Generated response with fallback model {}", model);
                        return Ok(text);
                    }
                    Err(e) if e.is_rate_limited() && attempt < self.max_attempts => {
                        let delay = self.retry_delay * attempt;
                        warn!(
                            "Rate limited on {} (attempt {}), retrying in {:?}",
                            model, attempt, delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    Err(e) => {
                        warn!("Model {} failed: {}", model, e);
                        last_error = e;
                        break;
                    }
                }
            }
        }

        Err(TextbookRagError::LlmError(format!(
            "All Gemini models failed. Last error: {last_error}"
        )))
    }

    /// Translate `text` into the language named by `language` (`"ur"` or other)
    ///
    /// # Errors
    /// Same as [`LlmService::generate`].
    pub async fn translate(&self, text: &str, language: &str) -> Result<String> {
        debug!("Translating {} chars to {}", text.len(), language);
        self.generate(&build_translation_prompt(text, language)).await
    }
}

async fn call(
    backend: &dyn ModelBackend,
    model: &str,
    prompt: &str,
) -> std::result::Result<String, LlmError> {
    match backend.generate_content(model, prompt).await {
        Ok(text) if text.is_empty() => Err(LlmError::EmptyResponse),
        other => other,
    }
}
