use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Dimension of every embedding and of the vector-store collection
pub const EMBEDDING_DIM: usize = 768;

/// Error returned when a stored enum column holds an unknown value
#[derive(Debug, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

/// Reader experience level collected at signup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parse leniently: anything unrecognised is a beginner
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for ExperienceLevel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(ParseEnumError {
                kind: "experience_level",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ExperienceLevel {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preferred reading language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ur,
}

impl Language {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ur => "ur",
        }
    }
}

impl FromStr for Language {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "ur" => Ok(Self::Ur),
            other => Err(ParseEnumError {
                kind: "language",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Language {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Registered reader
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub id: String,
    pub user_id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: Option<String>,
    pub software_background: Option<String>,
    pub hardware_background: Option<String>,
    #[sqlx(try_from = "String")]
    pub experience_level: ExperienceLevel,
    #[sqlx(try_from = "String")]
    pub preferred_language: Language,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied at signup
#[derive(Debug, Clone)]
pub struct NewUserProfile {
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub software_background: Option<String>,
    pub hardware_background: Option<String>,
    pub experience_level: ExperienceLevel,
}

impl NewUserProfile {
    /// Materialize the row; `id` and `user_id` share one fresh UUID
    pub fn into_profile(self) -> UserProfile {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        UserProfile {
            user_id: id.clone(),
            id,
            email: self.email,
            password_hash: self.password_hash,
            name: self.name,
            software_background: self.software_background,
            hardware_background: self.hardware_background,
            experience_level: self.experience_level,
            preferred_language: Language::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Append-only record of one chat exchange
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatHistoryEntry {
    pub id: Uuid,
    pub user_id: String,
    pub message: String,
    pub response: String,
    pub context: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Cached translation row; (original_text, language) is the logical key
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TranslationEntry {
    pub id: Uuid,
    pub original_text: String,
    pub translated_text: String,
    pub language: String,
    pub module: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Textbook passage mirrored into the relational store when seeding
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContentChunk {
    pub id: Uuid,
    pub content: String,
    pub module: Option<String>,
    pub section: Option<String>,
    pub embedding_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload stored next to each vector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkPayload {
    pub text: String,
    pub module: String,
    pub section: String,
}

/// A single nearest-neighbour hit, best first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub text: String,
    pub score: f32,
    pub id: String,
    pub module: Option<String>,
    pub section: Option<String>,
}
