use async_trait::async_trait;

use super::map_unique_violation;
use super::Database;
use super::UserRepository;
use crate::models::NewUserProfile;
use crate::models::UserProfile;
use crate::Result;
use crate::TextbookRagError;

#[async_trait]
impl UserRepository for Database {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserProfile>> {
        let profile = sqlx::query_as("SELECT * FROM user_profiles WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserProfile>> {
        let profile = sqlx::query_as("SELECT * FROM user_profiles WHERE user_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }

    async fn create(&self, profile: NewUserProfile) -> Result<UserProfile> {
        let profile = profile.into_profile();

        sqlx::query(
            r"
            INSERT INTO user_profiles (
                id, user_id, email, password_hash, name,
                software_background, hardware_background,
                experience_level, preferred_language, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(&profile.id)
        .bind(&profile.user_id)
        .bind(&profile.email)
        .bind(&profile.password_hash)
        .bind(&profile.name)
        .bind(&profile.software_background)
        .bind(&profile.hardware_background)
        .bind(profile.experience_level.as_str())
        .bind(profile.preferred_language.as_str())
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, TextbookRagError::DuplicateEmail))?;

        tracing::debug!("Created user profile {}", profile.id);
        Ok(profile)
    }
}
