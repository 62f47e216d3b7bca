//! Embedding service with deterministic fallback

use tracing::debug;
use tracing::warn;

use super::client::EmbeddingClient;
use super::fallback::fallback_embedding;
use super::EmbeddingConfig;
use crate::errors::Result;

/// Turns text into a fixed-length vector, never failing
pub struct EmbeddingService {
    client: Option<EmbeddingClient>,
    dimension: usize,
}

impl EmbeddingService {
    /// Create a new embedding service
    pub fn new(config: &crate::config::AppConfig) -> Result<Self> {
        Self::from_config(EmbeddingConfig::from_app_config(config))
    }

    /// Create from custom config
    pub fn from_config(config: EmbeddingConfig) -> Result<Self> {
        let client = match config.api_key {
            Some(api_key) => Some(EmbeddingClient::new(
                config.model,
                config.endpoint,
                api_key,
                config.timeout,
            )?),
            None => {
                warn!("GEMINI_API_KEY not set. Embeddings will use the hash-based fallback.");
                None
            }
        };

        Ok(Self {
            client,
            dimension: config.dimension,
        })
    }

    /// Service that only ever produces fallback embeddings
    #[must_use]
    pub fn fallback_only(dimension: usize) -> Self {
        Self {
            client: None,
            dimension,
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Embed `text`, substituting the fallback on any provider failure
    pub async fn embed(&self, text: &str) -> Vec<f32> {
        if let Some(client) = &self.client {
            match client.embed(text).await {
                Ok(embedding) => return embedding,
                Err(e) => warn!("Error getting embeddings with Gemini: {}", e),
            }
        }

        debug!("Using fallback embedding ({} dimensions)", self.dimension);
        fallback_embedding(text, self.dimension)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::method;
    use wiremock::Mock;
    use wiremock::MockServer;
    use wiremock::ResponseTemplate;

    use super::*;
    use crate::models::EMBEDDING_DIM;

    fn config_for(endpoint: String) -> EmbeddingConfig {
        EmbeddingConfig {
            model: "models/text-embedding-004".to_string(),
            dimension: EMBEDDING_DIM,
            endpoint,
            api_key: Some("key".to_string()),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_without_key_uses_fallback() {
        let service = EmbeddingService::fallback_only(EMBEDDING_DIM);
        let embedding = service.embed("What is ROS 2?").await;
        assert_eq!(embedding, fallback_embedding("What is ROS 2?", EMBEDDING_DIM));
    }

    #[tokio::test]
    async fn test_provider_failure_uses_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let service = EmbeddingService::from_config(config_for(server.uri())).unwrap();
        let embedding = service.embed("Gazebo").await;
        assert_eq!(embedding.len(), EMBEDDING_DIM);
        assert_eq!(embedding, fallback_embedding("Gazebo", EMBEDDING_DIM));
    }

    #[tokio::test]
    async fn test_unreachable_provider_uses_fallback() {
        // Port 9 (discard) is not expected to accept HTTP
        let service =
            EmbeddingService::from_config(config_for("http://127.0.0.1:9".to_string())).unwrap();
        assert_eq!(service.embed("Isaac").await.len(), EMBEDDING_DIM);
    }

    #[tokio::test]
    async fn test_provider_success_is_returned_as_is() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "embedding": { "values": [1.0, 2.0] }
            })))
            .mount(&server)
            .await;

        let service = EmbeddingService::from_config(config_for(server.uri())).unwrap();
        assert_eq!(service.embed("anything").await, vec![1.0, 2.0]);
    }
}
