//! Email/password accounts with bearer tokens

use std::convert::Infallible;
use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRef;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use bcrypt::DEFAULT_COST;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;

use crate::config::AppConfig;
use crate::database::UserRepository;
use crate::models::ExperienceLevel;
use crate::models::NewUserProfile;
use crate::models::UserProfile;
use crate::Result;
use crate::TextbookRagError;

pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    Ok(bcrypt::hash(password, cost)?)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    Ok(bcrypt::verify(password, hash)?)
}

/// Token claims; `id` is the reader's `user_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub email: String,
    pub exp: usize,
}

/// HS256 signing and verification keys
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_days: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::days(ttl_days),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.auth.secret, config.auth.token_ttl_days)
    }

    /// Sign a token for `profile`
    pub fn issue(&self, profile: &UserProfile) -> Result<String> {
        let exp = (Utc::now() + self.ttl).timestamp().max(0) as usize;
        let claims = Claims {
            id: profile.user_id.clone(),
            email: profile.email.clone(),
            exp,
        };
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding,
        )?)
    }

    /// Claims of a valid token; expired, tampered or malformed tokens give `None`
    pub fn verify(&self, token: &str) -> Option<Claims> {
        match jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256)) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!("Rejected bearer token: {}", e);
                None
            }
        }
    }
}

/// Bearer identity that never rejects the request
///
/// Missing, malformed and invalid tokens all read as anonymous.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<Claims>);

impl OptionalUser {
    pub fn user_id(&self) -> Option<&str> {
        self.0.as_ref().map(|claims| claims.id.as_str())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalUser
where
    Arc<JwtKeys>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let keys = Arc::<JwtKeys>::from_ref(state);
        let claims = match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
            Ok(TypedHeader(Authorization(bearer))) => keys.verify(bearer.token()),
            Err(_) => None,
        };
        Ok(Self(claims))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub software_background: Option<String>,
    pub hardware_background: Option<String>,
    pub experience_level: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub experience_level: ExperienceLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: AuthUser,
}

/// Signup and signin against the user repository
pub struct AuthService {
    users: Option<Arc<dyn UserRepository>>,
    keys: Arc<JwtKeys>,
    hash_cost: u32,
}

impl AuthService {
    pub fn new(users: Option<Arc<dyn UserRepository>>, keys: Arc<JwtKeys>) -> Self {
        Self {
            users,
            keys,
            hash_cost: DEFAULT_COST,
        }
    }

    /// Override the bcrypt cost factor
    #[must_use]
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    fn users(&self) -> Result<&Arc<dyn UserRepository>> {
        self.users.as_ref().ok_or(TextbookRagError::DatabaseUnavailable)
    }

    /// Register a reader and sign them in
    ///
    /// # Errors
    /// - `DatabaseUnavailable` when no user store is configured
    /// - `DuplicateEmail` when the email is taken
    pub async fn signup(&self, request: SignupRequest) -> Result<AuthResponse> {
        let users = self.users()?;

        if users.find_by_email(&request.email).await?.is_some() {
            return Err(TextbookRagError::DuplicateEmail);
        }

        let password_hash = hash_blocking(request.password, self.hash_cost).await?;
        let profile = users
            .create(NewUserProfile {
                email: request.email,
                password_hash,
                name: request.name,
                software_background: request.software_background,
                hardware_background: request.hardware_background,
                experience_level: ExperienceLevel::parse_or_default(
                    request.experience_level.as_deref(),
                ),
            })
            .await?;

        info!("Registered reader {}", profile.user_id);
        self.respond(&profile)
    }

    /// Authenticate an existing reader
    ///
    /// # Errors
    /// - `DatabaseUnavailable` when no user store is configured
    /// - `Unauthorized` for an unknown email or a wrong password
    pub async fn signin(&self, request: SigninRequest) -> Result<AuthResponse> {
        let users = self.users()?;

        let profile = users
            .find_by_email(&request.email)
            .await?
            .ok_or(TextbookRagError::Unauthorized)?;

        if profile.password_hash.is_empty()
            || !verify_blocking(request.password, profile.password_hash.clone()).await?
        {
            return Err(TextbookRagError::Unauthorized);
        }

        debug!("Reader {} signed in", profile.user_id);
        self.respond(&profile)
    }

    fn respond(&self, profile: &UserProfile) -> Result<AuthResponse> {
        Ok(AuthResponse {
            access_token: self.keys.issue(profile)?,
            token_type: "bearer".to_string(),
            user: AuthUser {
                id: profile.id.clone(),
                email: profile.email.clone(),
                name: profile.name.clone(),
                experience_level: profile.experience_level,
            },
        })
    }
}

async fn hash_blocking(password: String, cost: u32) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| TextbookRagError::Custom(format!("Password hashing task failed: {e}")))?
}

async fn verify_blocking(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| TextbookRagError::Custom(format!("Password check task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    /// Lowest cost bcrypt accepts
    const TEST_COST: u32 = 4;

    fn service(store: &Arc<MemoryStore>) -> AuthService {
        AuthService::new(
            Some(store.clone() as Arc<dyn UserRepository>),
            Arc::new(JwtKeys::new("test-secret", 7)),
        )
        .with_hash_cost(TEST_COST)
    }

    fn signup_request(email: &str, level: Option<&str>) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: "hunter22".to_string(),
            name: Some("Ada".to_string()),
            software_background: Some("Python".to_string()),
            hardware_background: None,
            experience_level: level.map(ToString::to_string),
        }
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("secret", TEST_COST).unwrap();
        assert!(verify_password("secret", &hash).unwrap());
        assert!(!verify_password("Secret", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_signup_issues_verifiable_token() {
        let store = Arc::new(MemoryStore::new());
        let auth = service(&store);

        let response = auth.signup(signup_request("ada@example.com", Some("advanced"))).await.unwrap();

        assert_eq!(response.token_type, "bearer");
        assert_eq!(response.user.email, "ada@example.com");
        assert_eq!(response.user.experience_level, ExperienceLevel::Advanced);

        let claims = auth.keys.verify(&response.access_token).unwrap();
        assert_eq!(claims.id, response.user.id);
        assert_eq!(claims.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_signup_unknown_level_defaults_to_beginner() {
        let store = Arc::new(MemoryStore::new());
        let response = service(&store)
            .signup(signup_request("b@example.com", Some("wizard")))
            .await
            .unwrap();
        assert_eq!(response.user.experience_level, ExperienceLevel::Beginner);
    }

    #[tokio::test]
    async fn test_duplicate_signup_rejected_and_single_row_kept() {
        let store = Arc::new(MemoryStore::new());
        let auth = service(&store);

        auth.signup(signup_request("dup@example.com", None)).await.unwrap();
        let err = auth.signup(signup_request("dup@example.com", None)).await.unwrap_err();

        assert!(matches!(err, TextbookRagError::DuplicateEmail));
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn test_signin_checks_password() {
        let store = Arc::new(MemoryStore::new());
        let auth = service(&store);
        auth.signup(signup_request("c@example.com", None)).await.unwrap();

        let ok = auth
            .signin(SigninRequest {
                email: "c@example.com".to_string(),
                password: "hunter22".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(ok.user.email, "c@example.com");

        for (email, password) in [("c@example.com", "wrong"), ("nobody@example.com", "hunter22")] {
            let err = auth
                .signin(SigninRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                })
                .await
                .unwrap_err();
            assert!(matches!(err, TextbookRagError::Unauthorized));
        }
    }

    #[tokio::test]
    async fn test_without_store_is_unavailable() {
        let auth = AuthService::new(None, Arc::new(JwtKeys::new("s", 7)));
        let err = auth.signup(signup_request("x@example.com", None)).await.unwrap_err();
        assert!(matches!(err, TextbookRagError::DatabaseUnavailable));
    }

    #[test]
    fn test_verify_rejects_bad_tokens() {
        let keys = JwtKeys::new("secret-a", 7);
        let profile = NewUserProfile {
            email: "e@example.com".to_string(),
            password_hash: String::new(),
            name: None,
            software_background: None,
            hardware_background: None,
            experience_level: ExperienceLevel::Beginner,
        }
        .into_profile();

        let token = keys.issue(&profile).unwrap();
        assert!(keys.verify(&token).is_some());
        assert!(JwtKeys::new("secret-b", 7).verify(&token).is_none());
        assert!(keys.verify("not-a-token").is_none());

        // Expired well past the default leeway
        let expired = JwtKeys::new("secret-a", -1).issue(&profile).unwrap();
        assert!(keys.verify(&expired).is_none());
    }
}
