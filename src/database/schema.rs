use super::Database;
use crate::Result;

impl Database {
    /// Initialize database schema
    ///
    /// Idempotent: every statement is `IF NOT EXISTS`.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_profiles (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                name TEXT,
                software_background TEXT,
                hardware_background TEXT,
                experience_level TEXT NOT NULL DEFAULT 'beginner',
                preferred_language TEXT NOT NULL DEFAULT 'en',
                created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS chat_history (
                id UUID PRIMARY KEY,
                user_id TEXT NOT NULL,
                message TEXT NOT NULL,
                response TEXT NOT NULL,
                context TEXT,
                timestamp TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // No unique constraint on (original_text, language): repeated misses append rows
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS translations (
                id UUID PRIMARY KEY,
                original_text TEXT NOT NULL,
                translated_text TEXT NOT NULL,
                language VARCHAR(10) NOT NULL,
                module VARCHAR(50),
                created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS content_chunks (
                id UUID PRIMARY KEY,
                content TEXT NOT NULL,
                module VARCHAR(50),
                section VARCHAR(100),
                embedding_id TEXT,
                created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_chat_history_user_id ON chat_history (user_id)",
        )
        .execute(&self.pool)
        .await?;

        // Hashed key keeps long passages under the btree row-size limit
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_translations_lookup ON translations (md5(original_text), language)",
        )
        .execute(&self.pool)
        .await?;

        tracing::info!("Database schema initialized");
        Ok(())
    }
}
