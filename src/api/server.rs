//! HTTP server implementation

use std::sync::Arc;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing::warn;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::auth::JwtKeys;
use crate::config::AppConfig;
use crate::database::Database;
use crate::database::MemoryStore;
use crate::database::Persistence;
use crate::embeddings::EmbeddingService;
use crate::llm::LlmService;
use crate::vector::QdrantStore;
use crate::vector::VectorStore;
use crate::Result;

/// Where accounts, chat history and translations live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    /// Postgres when `DATABASE_URL` is configured, otherwise nothing
    Database,
    /// Process-local maps, lost on exit
    Memory,
}

/// Router with tracing, compression and optional permissive CORS
pub fn build_app(state: AppState, enable_cors: bool) -> Router {
    let mut app = routes::api_routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    if enable_cors {
        info!("✅ CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Construct every collaborator from configuration
///
/// Missing Postgres or Qdrant settings degrade the matching features instead
/// of failing startup.
pub async fn build_state(config: &AppConfig, storage: StorageMode) -> Result<AppState> {
    let persistence = match storage {
        StorageMode::Memory => {
            warn!("Using in-memory storage; accounts and history are lost on exit");
            Persistence::from_memory(Arc::new(MemoryStore::new()))
        }
        StorageMode::Database => connect_database(config).await,
    };

    let vector_store: Option<Arc<dyn VectorStore>> = match QdrantStore::from_config(config) {
        Ok(store) => {
            info!("Vector store collection: {}", store.collection());
            Some(Arc::new(store))
        }
        Err(e) => {
            warn!("Vector store unavailable, chat will use the fallback context: {}", e);
            None
        }
    };

    Ok(AppState::new(
        Arc::new(EmbeddingService::new(config)?),
        vector_store,
        Arc::new(LlmService::new(config)?),
        persistence,
        Arc::new(JwtKeys::from_config(config)),
    ))
}

async fn connect_database(config: &AppConfig) -> Persistence {
    if config.database_url().is_none() {
        warn!("DATABASE_URL not set. Accounts, history and translation cache are disabled.");
        return Persistence::default();
    }

    let database = match Database::from_config(config).await {
        Ok(database) => database,
        Err(e) => {
            warn!("Could not connect to database: {}", e);
            return Persistence::default();
        }
    };

    if let Err(e) = database.init_schema().await {
        warn!("Could not create database tables: {}", e);
        return Persistence::default();
    }

    info!("✅ Database ready");
    Persistence::from_database(Arc::new(database))
}

/// Start the API server
pub async fn serve_api(
    config: &AppConfig,
    host: String,
    port: u16,
    enable_cors: bool,
    storage: StorageMode,
) -> Result<()> {
    info!("🚀 Starting Physical AI Textbook API server...");

    let state = build_state(config, storage).await?;
    let app = build_app(state, enable_cors);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /                 - Service banner");
    info!("  GET  /health           - Health check");
    info!("  POST /api/chat         - Ask the textbook");
    info!("  POST /api/translate    - Translate a passage");
    info!("  GET  /api/personalize  - Reading preferences");
    info!("  POST /auth/signup      - Create an account");
    info!("  POST /auth/signin      - Sign in");

    axum::serve(listener, app).await?;

    Ok(())
}
