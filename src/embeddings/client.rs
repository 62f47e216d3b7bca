//! Gemini embedding API client

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::errors::Result;
use crate::errors::TextbookRagError;

const TASK_TYPE: &str = "RETRIEVAL_DOCUMENT";
const TITLE: &str = "Embedding of book content";

/// Client for the `embedContent` endpoint
pub struct EmbeddingClient {
    model: String,
    endpoint: String,
    api_key: String,
    client: Client,
}

impl EmbeddingClient {
    /// Create a new embedding client
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(
        model: String,
        endpoint: String,
        api_key: String,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TextbookRagError::HttpError(e.to_string()))?;

        Ok(Self {
            model,
            endpoint,
            api_key,
            client,
        })
    }

    /// Generate an embedding for a single text
    ///
    /// The provider vector is returned as-is; its length is not checked.
    ///
    /// # Errors
    /// - Network errors (timeouts, connection failures)
    /// - Non-success status codes (quota, authentication, unknown model)
    /// - Malformed or empty responses
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct EmbedRequest<'a> {
            model: &'a str,
            content: Content<'a>,
            task_type: &'a str,
            title: &'a str,
        }

        #[derive(Serialize)]
        struct Content<'a> {
            parts: [Part<'a>; 1],
        }

        #[derive(Serialize)]
        struct Part<'a> {
            text: &'a str,
        }

        #[derive(Deserialize)]
        struct EmbedResponse {
            embedding: Option<EmbeddingValues>,
        }

        #[derive(Deserialize)]
        struct EmbeddingValues {
            values: Vec<f32>,
        }

        let url = format!("{}/v1beta/{}:embedContent", self.endpoint, self.model);
        debug!("Calling Gemini embeddings API: {}", url);

        let request = EmbedRequest {
            model: &self.model,
            content: Content {
                parts: [Part { text }],
            },
            task_type: TASK_TYPE,
            title: TITLE,
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TextbookRagError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TextbookRagError::EmbeddingError(format!(
                "Gemini API error ({status}): {error_text}"
            )));
        }

        let result: EmbedResponse = response.json().await.map_err(|e| {
            TextbookRagError::EmbeddingError(format!("Failed to parse response: {e}"))
        })?;

        result
            .embedding
            .map(|e| e.values)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| TextbookRagError::EmbeddingError("No embedding in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::body_partial_json;
    use wiremock::matchers::header;
    use wiremock::matchers::method;
    use wiremock::matchers::path;
    use wiremock::Mock;
    use wiremock::MockServer;
    use wiremock::ResponseTemplate;

    use super::*;

    fn client_for(server: &MockServer) -> EmbeddingClient {
        EmbeddingClient::new(
            "models/text-embedding-004".to_string(),
            server.uri(),
            "test-key".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_embed_returns_provider_vector() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/text-embedding-004:embedContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "taskType": "RETRIEVAL_DOCUMENT",
                "content": { "parts": [{ "text": "What is ROS 2?" }] }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "embedding": { "values": [0.1, 0.2, 0.3] }
            })))
            .mount(&server)
            .await;

        let embedding = client_for(&server).embed("What is ROS 2?").await.unwrap();
        assert_eq!(embedding, vec![0.1, 0.2, 0.3]);
    }

    #[tokio::test]
    async fn test_embed_surfaces_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota"))
            .mount(&server)
            .await;

        let err = client_for(&server).embed("text").await.unwrap_err();
        assert!(matches!(err, TextbookRagError::EmbeddingError(msg) if msg.contains("429")));
    }

    #[tokio::test]
    async fn test_embed_rejects_empty_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        assert!(client_for(&server).embed("text").await.is_err());
    }
}
