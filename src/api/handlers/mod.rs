/// API request handlers
use std::sync::Arc;

use axum::extract::FromRef;
use axum::Json;

use crate::api::types::HealthResponse;
use crate::api::types::RootResponse;
use crate::auth::AuthService;
use crate::auth::JwtKeys;
use crate::database::Persistence;
use crate::embeddings::EmbeddingService;
use crate::llm::LlmService;
use crate::personalization::PersonalizationResolver;
use crate::rag::ChatOrchestrator;
use crate::translation::TranslationService;
use crate::vector::VectorStore;

pub mod auth;
pub mod chat;
pub mod personalize;
pub mod translate;

pub use auth::*;
pub use chat::*;
pub use personalize::*;
pub use translate::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatOrchestrator>,
    pub translation: Arc<TranslationService>,
    pub personalization: Arc<PersonalizationResolver>,
    pub auth: Arc<AuthService>,
    pub jwt_keys: Arc<JwtKeys>,
}

impl AppState {
    /// Wire the services from already-constructed collaborators
    pub fn new(
        embeddings: Arc<EmbeddingService>,
        vector_store: Option<Arc<dyn VectorStore>>,
        llm: Arc<LlmService>,
        persistence: Persistence,
        jwt_keys: Arc<JwtKeys>,
    ) -> Self {
        Self::with_auth(
            embeddings,
            vector_store,
            llm,
            persistence.clone(),
            jwt_keys.clone(),
            AuthService::new(persistence.users, jwt_keys),
        )
    }

    /// Same as [`AppState::new`] with a preconfigured auth service
    pub fn with_auth(
        embeddings: Arc<EmbeddingService>,
        vector_store: Option<Arc<dyn VectorStore>>,
        llm: Arc<LlmService>,
        persistence: Persistence,
        jwt_keys: Arc<JwtKeys>,
        auth: AuthService,
    ) -> Self {
        Self {
            chat: Arc::new(ChatOrchestrator::new(
                embeddings,
                vector_store,
                llm.clone(),
                persistence.history,
            )),
            translation: Arc::new(TranslationService::new(persistence.translations, llm)),
            personalization: Arc::new(PersonalizationResolver::new(persistence.users)),
            auth: Arc::new(auth),
            jwt_keys,
        }
    }
}

impl FromRef<AppState> for Arc<JwtKeys> {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_keys.clone()
    }
}

/// Service banner
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Physical AI Textbook API".to_string(),
        status: "running".to_string(),
    })
}

/// Health check handler
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
