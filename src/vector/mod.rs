//! Vector store adapter
//!
//! One named collection of `(vector, text, module, section)` records with
//! nearest-neighbour search and upsert-by-id. Search never fails: an
//! unreachable or broken store simply produces no hits.

pub mod qdrant;

use async_trait::async_trait;

pub use qdrant::normalize_qdrant_url;
pub use qdrant::QdrantStore;

use crate::models::ChunkPayload;
use crate::models::SearchHit;
use crate::Result;

/// Default number of passages retrieved per chat query
pub const RETRIEVAL_LIMIT: usize = 5;

#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Best matches first, at most `limit`; empty on any failure
    async fn search(&self, vector: &[f32], limit: usize) -> Vec<SearchHit>;

    /// Write or overwrite the record stored under `id`
    async fn upsert(&self, id: &str, vector: Vec<f32>, payload: &ChunkPayload) -> Result<()>;
}
