//! Reading preferences derived from a reader's experience level

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::warn;

use crate::database::UserRepository;
use crate::models::ExperienceLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeComplexity {
    Simple,
    Standard,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplanationDepth {
    Basic,
    Detailed,
    Comprehensive,
}

/// How the front end should render chapters for a reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalizationConfig {
    pub show_advanced_topics: bool,
    pub show_code_examples: bool,
    pub code_complexity: CodeComplexity,
    pub explanation_depth: ExplanationDepth,
}

impl Default for PersonalizationConfig {
    /// Settings for anonymous or unknown readers
    fn default() -> Self {
        Self {
            show_advanced_topics: true,
            show_code_examples: true,
            code_complexity: CodeComplexity::Standard,
            explanation_depth: ExplanationDepth::Detailed,
        }
    }
}

#[must_use]
pub const fn config_for_level(level: ExperienceLevel) -> PersonalizationConfig {
    match level {
        ExperienceLevel::Beginner => PersonalizationConfig {
            show_advanced_topics: false,
            show_code_examples: true,
            code_complexity: CodeComplexity::Simple,
            explanation_depth: ExplanationDepth::Detailed,
        },
        ExperienceLevel::Intermediate => PersonalizationConfig {
            show_advanced_topics: true,
            show_code_examples: true,
            code_complexity: CodeComplexity::Standard,
            explanation_depth: ExplanationDepth::Detailed,
        },
        ExperienceLevel::Advanced => PersonalizationConfig {
            show_advanced_topics: true,
            show_code_examples: true,
            code_complexity: CodeComplexity::Advanced,
            explanation_depth: ExplanationDepth::Comprehensive,
        },
    }
}

pub struct PersonalizationResolver {
    users: Option<Arc<dyn UserRepository>>,
}

impl PersonalizationResolver {
    pub fn new(users: Option<Arc<dyn UserRepository>>) -> Self {
        Self { users }
    }

    /// Settings for `user_id`; anything short of a stored profile yields the default
    pub async fn resolve(&self, user_id: Option<&str>) -> PersonalizationConfig {
        let (Some(user_id), Some(users)) = (user_id, &self.users) else {
            return PersonalizationConfig::default();
        };

        match users.find_by_id(user_id).await {
            Ok(Some(profile)) => {
                debug!("Personalizing for {} reader", profile.experience_level);
                config_for_level(profile.experience_level)
            }
            Ok(None) => PersonalizationConfig::default(),
            Err(e) => {
                warn!("Error getting personalization: {}", e);
                PersonalizationConfig::default()
            }
        }
    }
}
