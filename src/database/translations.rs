use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::Database;
use crate::translation::TranslationCache;
use crate::Result;

#[async_trait]
impl TranslationCache for Database {
    async fn lookup(&self, original_text: &str, language: &str) -> Result<Option<String>> {
        // Duplicate rows are possible; whichever the planner returns first wins
        let translated = sqlx::query_scalar(
            r"
            SELECT translated_text FROM translations
            WHERE md5(original_text) = md5($1) AND original_text = $1 AND language = $2
            LIMIT 1
            ",
        )
        .bind(original_text)
        .bind(language)
        .fetch_optional(&self.pool)
        .await?;

        Ok(translated)
    }

    async fn store(
        &self,
        original_text: &str,
        translated_text: &str,
        language: &str,
        module: Option<&str>,
    ) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO translations (id, original_text, translated_text, language, module, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(Uuid::new_v4())
        .bind(original_text)
        .bind(translated_text)
        .bind(language)
        .bind(module)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
