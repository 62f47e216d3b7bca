//! Cached translation
//!
//! Translations are looked up by exact `(original_text, language)` before
//! calling the model, and written back afterwards. The cache is best effort:
//! its failures are logged and never reach the caller.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use tracing::warn;

use crate::llm::generation_failure;
use crate::llm::LlmService;
use crate::Result;

/// Persistent translation cache
#[async_trait]
pub trait TranslationCache: Send + Sync {
    /// Exact-match lookup; with duplicate rows any one of them may be returned
    async fn lookup(&self, original_text: &str, language: &str) -> Result<Option<String>>;

    /// Append a row; existing rows for the same key are left in place
    async fn store(
        &self,
        original_text: &str,
        translated_text: &str,
        language: &str,
        module: Option<&str>,
    ) -> Result<()>;
}

pub struct TranslationService {
    cache: Option<Arc<dyn TranslationCache>>,
    llm: Arc<LlmService>,
}

impl TranslationService {
    pub fn new(cache: Option<Arc<dyn TranslationCache>>, llm: Arc<LlmService>) -> Self {
        Self { cache, llm }
    }

    /// Translate `text`, serving from the cache when possible
    ///
    /// # Errors
    /// - Generation failures from [`LlmService::translate`]
    pub async fn translate(&self, text: &str, language: &str, module: Option<&str>) -> Result<String> {
        if let Some(cache) = &self.cache {
            match cache.lookup(text, language).await {
                Ok(Some(cached)) => {
                    debug!("Translation cache hit ({})", language);
                    return Ok(cached);
                }
                Ok(None) => debug!("Translation cache miss ({})", language),
                Err(e) => warn!("Error getting cached translation: {}", e),
            }
        }

        let translated = self
            .llm
            .translate(text, language)
            .await
            .map_err(generation_failure)?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.store(text, &translated, language, module).await {
                warn!("Error caching translation: {}", e);
            }
        }

        Ok(translated)
    }
}
