use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::ChatHistoryStore;
use super::Database;
use crate::models::ChatHistoryEntry;
use crate::Result;

#[async_trait]
impl ChatHistoryStore for Database {
    async fn save_chat_history(
        &self,
        user_id: &str,
        message: &str,
        response: &str,
        context: Option<&str>,
    ) -> Result<ChatHistoryEntry> {
        let entry = ChatHistoryEntry {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            message: message.to_string(),
            response: response.to_string(),
            context: context.map(ToString::to_string),
            timestamp: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO chat_history (id, user_id, message, response, context, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(entry.id)
        .bind(&entry.user_id)
        .bind(&entry.message)
        .bind(&entry.response)
        .bind(&entry.context)
        .bind(entry.timestamp)
        .execute(&self.pool)
        .await?;

        Ok(entry)
    }
}
