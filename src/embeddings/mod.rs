//! Embeddings generation module
//!
//! Text is embedded with Gemini's `text-embedding-004` model when an API key is
//! configured. Whenever the provider is missing or failing, a deterministic
//! hash-based vector of the same dimension is produced instead, so search
//! always receives a usable query vector.
//!
//! # Examples
//!
//! ```rust,no_run
//! use textbook_rag::config::AppConfig;
//! use textbook_rag::embeddings::EmbeddingService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let service = EmbeddingService::new(&config)?;
//!
//!     let embedding = service.embed("What is ROS 2?").await;
//!     println!("Generated embedding with {} dimensions", embedding.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod fallback;
pub mod generator;

pub use client::EmbeddingClient;
pub use fallback::fallback_embedding;
pub use generator::EmbeddingService;

/// Configuration for embedding generation
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub model: String,
    pub dimension: usize,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout: std::time::Duration,
}

impl EmbeddingConfig {
    /// Embeddings share the Gemini endpoint and key with generation
    pub fn from_app_config(config: &crate::config::AppConfig) -> Self {
        Self {
            model: config.embedding_model().to_string(),
            dimension: config.embedding_dimension(),
            endpoint: config.llm_endpoint().trim_end_matches('/').to_string(),
            api_key: config.llm_key().map(ToString::to_string),
            timeout: config.http_timeout(),
        }
    }
}
