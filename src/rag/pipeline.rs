//! Chat pipeline: Embed -> Retrieve -> Assemble -> Generate -> Record

use std::sync::Arc;

use tracing::debug;
use tracing::info;
use tracing::warn;

use super::context::assemble_context;
use super::prompts::build_full_prompt;
use super::prompts::build_system_prompt;
use crate::database::ChatHistoryStore;
use crate::embeddings::EmbeddingService;
use crate::errors::Result;
use crate::errors::TextbookRagError;
use crate::llm::generation_failure;
use crate::llm::LlmService;
use crate::models::SearchHit;
use crate::vector::VectorStore;
use crate::vector::RETRIEVAL_LIMIT;

/// Answers reader questions grounded in the textbook
pub struct ChatOrchestrator {
    embeddings: Arc<EmbeddingService>,
    store: Option<Arc<dyn VectorStore>>,
    llm: Arc<LlmService>,
    history: Option<Arc<dyn ChatHistoryStore>>,
}

impl ChatOrchestrator {
    /// Create from existing services
    ///
    /// Without a vector store every answer uses the fallback context; without a
    /// history store nothing is recorded.
    #[must_use]
    pub fn new(
        embeddings: Arc<EmbeddingService>,
        store: Option<Arc<dyn VectorStore>>,
        llm: Arc<LlmService>,
        history: Option<Arc<dyn ChatHistoryStore>>,
    ) -> Self {
        Self {
            embeddings,
            store,
            llm,
            history,
        }
    }

    /// Answer `message` (or, failing that, the selected text)
    ///
    /// # Errors
    /// - `InvalidInput` when neither a message nor selected text is given
    /// - `LlmError` when generation fails
    pub async fn answer(
        &self,
        message: Option<&str>,
        selected_context: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<String> {
        let selected_context = selected_context.filter(|c| !c.is_empty());
        let query = message
            .filter(|m| !m.is_empty())
            .or(selected_context)
            .ok_or_else(|| {
                TextbookRagError::InvalidInput("Either message or context is required".to_string())
            })?;

        info!("Processing chat query ({} chars)", query.len());

        debug!("Step 1: Retrieving passages");
        let hits = self.retrieve(query).await;
        debug!("Retrieved {} passages", hits.len());

        debug!("Step 2: Assembling context");
        let context = assemble_context(&hits, selected_context);

        debug!("Step 3: Generating answer");
        let prompt = build_full_prompt(&build_system_prompt(&context), query);
        let response = self.llm.generate(&prompt).await.map_err(generation_failure)?;

        if let (Some(user_id), Some(history)) = (user_id, &self.history) {
            debug!("Step 4: Recording chat history");
            if let Err(e) = history
                .save_chat_history(user_id, query, &response, selected_context)
                .await
            {
                warn!("Could not save chat history: {}", e);
            }
        }

        Ok(response)
    }

    async fn retrieve(&self, query: &str) -> Vec<SearchHit> {
        let Some(store) = &self.store else {
            debug!("No vector store configured, using fallback context");
            return Vec::new();
        };

        let embedding = self.embeddings.embed(query).await;
        if embedding.is_empty() {
            warn!("No embeddings available, using fallback context");
            return Vec::new();
        }

        store.search(&embedding, RETRIEVAL_LIMIT).await
    }
}
