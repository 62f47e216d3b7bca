use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::ChatHistoryEntry;
use crate::models::NewUserProfile;
use crate::models::UserProfile;
use crate::translation::TranslationCache;
use crate::Result;
use crate::TextbookRagError;

mod chat_history;
mod content_chunks;
pub mod memory;
mod schema;
mod translations;
mod user_profiles;

pub use memory::MemoryStore;

/// Lookup and creation of reader accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserProfile>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<UserProfile>>;

    /// Insert a new account; an existing email yields `DuplicateEmail`
    async fn create(&self, profile: NewUserProfile) -> Result<UserProfile>;
}

/// Append-only chat audit log
#[async_trait]
pub trait ChatHistoryStore: Send + Sync {
    async fn save_chat_history(
        &self,
        user_id: &str,
        message: &str,
        response: &str,
        context: Option<&str>,
    ) -> Result<ChatHistoryEntry>;
}

/// Persistence seams handed to the services
///
/// Every handle is optional; a missing one disables the feature that needs it.
#[derive(Clone, Default)]
pub struct Persistence {
    pub users: Option<Arc<dyn UserRepository>>,
    pub history: Option<Arc<dyn ChatHistoryStore>>,
    pub translations: Option<Arc<dyn TranslationCache>>,
}

impl Persistence {
    pub fn from_database(database: Arc<Database>) -> Self {
        Self {
            users: Some(database.clone()),
            history: Some(database.clone()),
            translations: Some(database),
        }
    }

    pub fn from_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            users: Some(store.clone()),
            history: Some(store.clone()),
            translations: Some(store),
        }
    }
}

/// Database connection pool wrapper
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new database instance from configuration
    pub async fn from_config(config: &crate::config::AppConfig) -> Result<Self> {
        let url = config.database_url().ok_or_else(|| {
            TextbookRagError::ConfigError(
                "DATABASE_URL not configured. Please set it in the environment or config.toml"
                    .to_string(),
            )
        })?;

        let pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections())
            .min_connections(config.min_connections())
            .acquire_timeout(std::time::Duration::from_secs(config.connection_timeout()));

        let pool = pool_options.connect(url).await?;

        tracing::info!(
            "Database pool configured: max_connections={}, min_connections={}",
            config.max_connections(),
            config.min_connections()
        );

        Ok(Self::new(pool))
    }

    /// Get a reference to the database pool for raw queries
    #[must_use]
    pub const fn pool(&self) -> &sqlx::PgPool {
        &self.pool
    }
}

/// Map a unique-constraint violation on insert to a domain error
fn map_unique_violation(err: sqlx::Error, on_conflict: TextbookRagError) -> TextbookRagError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => on_conflict,
        _ => TextbookRagError::Database(err),
    }
}
