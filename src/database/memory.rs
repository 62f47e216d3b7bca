//! In-process store used by `serve --memory-store` and by tests
//!
//! Mirrors the Postgres behaviour: unique emails, append-only history, and a
//! translation table that happily keeps duplicate rows.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::ChatHistoryStore;
use super::UserRepository;
use crate::models::ChatHistoryEntry;
use crate::models::NewUserProfile;
use crate::models::TranslationEntry;
use crate::models::UserProfile;
use crate::translation::TranslationCache;
use crate::Result;
use crate::TextbookRagError;

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: DashMap<String, UserProfile>,
    /// email -> user id
    emails: DashMap<String, String>,
    history: RwLock<Vec<ChatHistoryEntry>>,
    translations: RwLock<Vec<TranslationEntry>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub async fn chat_history(&self) -> Vec<ChatHistoryEntry> {
        self.history.read().await.clone()
    }

    pub async fn translation_rows(&self) -> Vec<TranslationEntry> {
        self.translations.read().await.clone()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserProfile>> {
        Ok(self
            .emails
            .get(email)
            .and_then(|id| self.users.get(id.value()).map(|u| u.clone())))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserProfile>> {
        Ok(self.users.get(id).map(|u| u.clone()))
    }

    async fn create(&self, profile: NewUserProfile) -> Result<UserProfile> {
        let profile = profile.into_profile();

        match self.emails.entry(profile.email.clone()) {
            Entry::Occupied(_) => Err(TextbookRagError::DuplicateEmail),
            Entry::Vacant(slot) => {
                slot.insert(profile.id.clone());
                self.users.insert(profile.id.clone(), profile.clone());
                Ok(profile)
            }
        }
    }
}

#[async_trait]
impl ChatHistoryStore for MemoryStore {
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
        self.history.write().await.push(entry.clone());
        Ok(entry)
    }
}

#[async_trait]
impl TranslationCache for MemoryStore {
    async fn lookup(&self, original_text: &str, language: &str) -> Result<Option<String>> {
        Ok(self
            .translations
            .read()
            .await
            .iter()
            .find(|t| t.original_text == original_text && t.language == language)
            .map(|t| t.translated_text.clone()))
    }

    async fn store(
        &self,
        original_text: &str,
        translated_text: &str,
        language: &str,
        module: Option<&str>,
    ) -> Result<()> {
        self.translations.write().await.push(TranslationEntry {
            id: Uuid::new_v4(),
            original_text: original_text.to_string(),
            translated_text: translated_text.to_string(),
            language: language.to_string(),
            module: module.map(ToString::to_string),
            created_at: Utc::now(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExperienceLevel;

    fn new_user(email: &str) -> NewUserProfile {
        NewUserProfile {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            name: None,
            software_background: None,
            hardware_background: None,
            experience_level: ExperienceLevel::Intermediate,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected_without_new_row() {
        let store = MemoryStore::new();
        store.create(new_user("ada@example.com")).await.unwrap();

        let err = store.create(new_user("ada@example.com")).await.unwrap_err();
        assert!(matches!(err, TextbookRagError::DuplicateEmail));
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn test_lookup_by_email_and_id() {
        let store = MemoryStore::new();
        let created = store.create(new_user("ada@example.com")).await.unwrap();

        let by_email = store.find_by_email("ada@example.com").await.unwrap().unwrap();
        let by_id = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(by_email.id, by_id.id);
        assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_translation_cache_roundtrip_and_miss() {
        let store = MemoryStore::new();
        store
            .store("Hello", "ہیلو", "ur", Some("module1"))
            .await
            .unwrap();

        assert_eq!(
            store.lookup("Hello", "ur").await.unwrap().as_deref(),
            Some("ہیلو")
        );
        assert!(store.lookup("Hello", "en").await.unwrap().is_none());
        assert!(store.lookup("hello", "ur").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_translation_store_appends_duplicates() {
        let store = MemoryStore::new();
        store.store("Hi", "one", "ur", None).await.unwrap();
        store.store("Hi", "two", "ur", None).await.unwrap();

        assert_eq!(store.translation_rows().await.len(), 2);
        assert!(store.lookup("Hi", "ur").await.unwrap().is_some());
    }
}
