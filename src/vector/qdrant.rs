//! Qdrant REST client

use async_trait::async_trait;
use reqwest::Client;
use reqwest::RequestBuilder;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::debug;
use tracing::info;
use tracing::warn;

use super::VectorStore;
use crate::config::AppConfig;
use crate::models::ChunkPayload;
use crate::models::SearchHit;
use crate::Result;
use crate::TextbookRagError;

const PLACEHOLDER_URL: &str = "https://your-cluster.qdrant.io";

/// Qdrant-backed vector store for a single collection
pub struct QdrantStore {
    base_url: String,
    api_key: Option<String>,
    collection: String,
    dimension: usize,
    client: Client,
    collection_ready: OnceCell<()>,
}

impl QdrantStore {
    /// Build a store from application config
    ///
    /// # Errors
    /// - Missing or placeholder `QDRANT_URL`
    /// - Unparseable URL
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            &config.vector_store.url,
            config.qdrant_api_key().map(ToString::to_string),
            config.vector_store.collection.clone(),
            config.embedding_dimension(),
            config.http_timeout(),
        )
    }

    pub fn new(
        url: &str,
        api_key: Option<String>,
        collection: String,
        dimension: usize,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let base_url = normalize_qdrant_url(url);
        if base_url.is_empty() || base_url == PLACEHOLDER_URL {
            return Err(TextbookRagError::ConfigError(
                "QDRANT_URL not configured".to_string(),
            ));
        }
        url::Url::parse(&base_url)
            .map_err(|e| TextbookRagError::ConfigError(format!("Invalid QDRANT_URL: {e}")))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TextbookRagError::HttpError(e.to_string()))?;

        Ok(Self {
            base_url,
            api_key,
            collection,
            dimension,
            client,
            collection_ready: OnceCell::new(),
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let url = format!("{}/collections/{}{}", self.base_url, self.collection, path);
        let builder = self.client.request(method, url);
        match &self.api_key {
            Some(key) => builder.header("api-key", key),
            None => builder,
        }
    }

    /// Create the collection on first use; attempted once per process
    async fn ensure_collection(&self) {
        self.collection_ready
            .get_or_init(|| async {
                if let Err(e) = self.create_collection_if_missing().await {
                    warn!("Error ensuring collection {}: {}", self.collection, e);
                }
            })
            .await;
    }

    async fn create_collection_if_missing(&self) -> Result<()> {
        let response = self
            .request(reqwest::Method::GET, "")
            .send()
            .await
            .map_err(|e| TextbookRagError::VectorStoreError(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                debug!("Qdrant collection {} exists", self.collection);
                Ok(())
            }
            StatusCode::NOT_FOUND => {
                let body = json!({
                    "vectors": { "size": self.dimension, "distance": "Cosine" }
                });
                let created = self
                    .request(reqwest::Method::PUT, "")
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| TextbookRagError::VectorStoreError(e.to_string()))?;
                check_status(created).await?;
                info!("Created Qdrant collection: {}", self.collection);
                Ok(())
            }
            _ => check_status(response).await.map(|_| ()),
        }
    }

    async fn try_search(&self, vector: &[f32], limit: usize) -> Result<Vec<SearchHit>> {
        #[derive(Deserialize)]
        struct SearchResponse {
            result: Vec<ScoredPoint>,
        }

        #[derive(Deserialize)]
        struct ScoredPoint {
            id: Value,
            score: f32,
            #[serde(default)]
            payload: Option<serde_json::Map<String, Value>>,
        }

        let body = json!({
            "vector": vector,
            "limit": limit,
            "with_payload": true,
        });

        let response = self
            .request(reqwest::Method::POST, "/points/search")
            .json(&body)
            .send()
            .await
            .map_err(|e| TextbookRagError::VectorStoreError(e.to_string()))?;
        let response = check_status(response).await?;

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| TextbookRagError::VectorStoreError(format!("Failed to parse response: {e}")))?;

        let hits = parsed
            .result
            .into_iter()
            .take(limit)
            .map(|point| {
                let payload = point.payload.unwrap_or_default();
                let field = |name: &str| payload.get(name).and_then(Value::as_str).map(ToString::to_string);
                SearchHit {
                    text: field("text").unwrap_or_default(),
                    score: point.score,
                    id: point_id_to_string(&point.id),
                    module: field("module"),
                    section: field("section"),
                }
            })
            .collect();

        Ok(hits)
    }
}

#[async_trait]
impl VectorStore for QdrantStore {
    async fn search(&self, vector: &[f32], limit: usize) -> Vec<SearchHit> {
        self.ensure_collection().await;

        match self.try_search(vector, limit).await {
            Ok(hits) => {
                debug!("Qdrant returned {} hits", hits.len());
                hits
            }
            Err(e) => {
                warn!("Error searching vectors: {}", e);
                Vec::new()
            }
        }
    }

    async fn upsert(&self, id: &str, vector: Vec<f32>, payload: &ChunkPayload) -> Result<()> {
        self.ensure_collection().await;

        let body = json!({
            "points": [{ "id": id, "vector": vector, "payload": payload }]
        });

        let response = self
            .request(reqwest::Method::PUT, "/points?wait=true")
            .json(&body)
            .send()
            .await
            .map_err(|e| TextbookRagError::VectorStoreError(e.to_string()))?;
        check_status(response).await?;

        debug!("Upserted point {} into {}", id, self.collection);
        Ok(())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(TextbookRagError::VectorStoreError(format!(
        "Qdrant API error ({status}): {error_text}"
    )))
}

/// Qdrant ids are UUID strings or unsigned integers
fn point_id_to_string(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Repair common mistakes in a pasted Qdrant URL
///
/// Strips whitespace and quotes, fixes an `hhttps` prefix, and forces TLS for
/// hosted (`*qdrant*`) clusters.
pub fn normalize_qdrant_url(raw: &str) -> String {
    let mut url = raw
        .trim()
        .trim_matches(|c| c == '\'' || c == '"')
        .trim()
        .to_string();

    if let Some(rest) = url.strip_prefix("hhttps") {
        url = format!("https{rest}");
    }
    if url.contains("qdrant") {
        if let Some(rest) = url.strip_prefix("http://") {
            url = format!("https://{rest}");
        }
    }

    url.trim_end_matches('/').to_string()
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

    fn store_for(url: &str) -> QdrantStore {
        QdrantStore::new(
            url,
            Some("qd-key".to_string()),
            "book_content".to_string(),
            768,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    async fn mount_existing_collection(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/collections/book_content"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {}})))
            .mount(server)
            .await;
    }

    #[test]
    fn test_url_normalization() {
        assert_eq!(
            normalize_qdrant_url(" 'hhttps://abc.qdrant.io/' "),
            "https://abc.qdrant.io"
        );
        assert_eq!(
            normalize_qdrant_url("http://abc.cloud.qdrant.io:6333"),
            "https://abc.cloud.qdrant.io:6333"
        );
        assert_eq!(
            normalize_qdrant_url("http://localhost:6333"),
            "http://localhost:6333"
        );
    }

    #[test]
    fn test_placeholder_url_is_config_error() {
        let err = QdrantStore::new(
            PLACEHOLDER_URL,
            None,
            "book_content".to_string(),
            768,
            Duration::from_secs(1),
        )
        .err()
        .unwrap();
        assert!(matches!(err, TextbookRagError::ConfigError(_)));

        let err = QdrantStore::new("", None, "c".to_string(), 768, Duration::from_secs(1))
            .err()
            .unwrap();
        assert!(matches!(err, TextbookRagError::ConfigError(_)));
    }

    #[tokio::test]
    async fn test_search_unreachable_store_returns_empty() {
        let store = store_for("http://127.0.0.1:9");
        let hits = store.search(&[0.0; 768], 5).await;
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_search_server_error_returns_empty() {
        let server = MockServer::start().await;
        mount_existing_collection(&server).await;
        Mock::given(method("POST"))
            .and(path("/collections/book_content/points/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(store_for(&server.uri()).search(&[0.1; 768], 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_maps_payload_and_truncates() {
        let server = MockServer::start().await;
        mount_existing_collection(&server).await;
        Mock::given(method("POST"))
            .and(path("/collections/book_content/points/search"))
            .and(header("api-key", "qd-key"))
            .and(body_partial_json(json!({"limit": 2, "with_payload": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "result": [
                    {"id": "a1", "score": 0.93, "payload": {"text": "ROS 2 is middleware", "module": "module1", "section": "introduction"}},
                    {"id": 7, "score": 0.81, "payload": {"text": "Gazebo simulates physics"}},
                    {"id": "c3", "score": 0.40, "payload": {"text": "extra"}}
                ]
            })))
            .mount(&server)
            .await;

        let hits = store_for(&server.uri()).search(&[0.1; 768], 2).await;
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].text, "ROS 2 is middleware");
        assert_eq!(hits[0].module.as_deref(), Some("module1"));
        assert_eq!(hits[0].section.as_deref(), Some("introduction"));
        assert_eq!(hits[1].id, "7");
        assert!(hits[1].module.is_none());
        assert!(hits[0].score > hits[1].score);
    }

    #[tokio::test]
    async fn test_missing_collection_is_created_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections/book_content"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/collections/book_content"))
            .and(body_partial_json(json!({"vectors": {"size": 768, "distance": "Cosine"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": true})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/collections/book_content/points/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": []})))
            .mount(&server)
            .await;

        let store = store_for(&server.uri());
        assert!(store.search(&[0.1; 768], 5).await.is_empty());
        assert!(store.search(&[0.1; 768], 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_collection_lookup_error_is_reported_and_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections/book_content"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/collections/book_content/points/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": []})))
            .mount(&server)
            .await;

        let store = store_for(&server.uri());
        let err = store.create_collection_if_missing().await.unwrap_err();
        assert!(err.to_string().contains("500"));

        // A failed ensure is not retried on later searches
        let store = store_for(&server.uri());
        assert!(store.search(&[0.1; 768], 5).await.is_empty());
        assert!(store.search(&[0.1; 768], 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_upsert_writes_point_and_propagates_errors() {
        let server = MockServer::start().await;
        mount_existing_collection(&server).await;
        Mock::given(method("PUT"))
            .and(path("/collections/book_content/points"))
            .and(body_partial_json(json!({
                "points": [{"id": "p1", "payload": {"text": "t", "module": "m", "section": "s"}}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {}})))
            .mount(&server)
            .await;

        let store = store_for(&server.uri());
        let payload = ChunkPayload {
            text: "t".to_string(),
            module: "m".to_string(),
            section: "s".to_string(),
        };
        store.upsert("p1", vec![0.5; 768], &payload).await.unwrap();

        let unreachable = store_for("http://127.0.0.1:9");
        assert!(unreachable.upsert("p1", vec![0.5; 768], &payload).await.is_err());
    }
}
