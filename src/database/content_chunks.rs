use chrono::Utc;
use uuid::Uuid;

use super::Database;
use crate::models::ChunkPayload;
use crate::models::ContentChunk;
use crate::Result;

impl Database {
    /// Record a seeded passage and the vector id it was indexed under
    pub async fn insert_content_chunk(
        &self,
        payload: &ChunkPayload,
        embedding_id: &str,
    ) -> Result<ContentChunk> {
        let chunk = ContentChunk {
            id: Uuid::new_v4(),
            content: payload.text.clone(),
            module: Some(payload.module.clone()),
            section: Some(payload.section.clone()),
            embedding_id: Some(embedding_id.to_string()),
            created_at: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO content_chunks (id, content, module, section, embedding_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(chunk.id)
        .bind(&chunk.content)
        .bind(&chunk.module)
        .bind(&chunk.section)
        .bind(&chunk.embedding_id)
        .bind(chunk.created_at)
        .execute(&self.pool)
        .await?;

        Ok(chunk)
    }
}
