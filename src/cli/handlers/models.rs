//! Gemini model listing

use crate::cli::output::print_info;
use crate::cli::output::print_models;
use crate::llm::GeminiClient;
use crate::AppConfig;
use crate::Result;
use crate::TextbookRagError;

/// List the models the configured key can call and flag the configured ladder
pub async fn handle_models_command(config: &AppConfig) -> Result<()> {
    let key = config.llm_key().ok_or_else(|| {
        TextbookRagError::ConfigError("GEMINI_API_KEY not set".to_string())
    })?;

    print_info("🔍 Listing available Gemini models...");
    let client = GeminiClient::new(config.llm_endpoint(), key.to_string(), config.http_timeout())?;
    let models = client.list_models().await?;

    let configured: Vec<&str> = std::iter::once(config.llm.primary_model.as_str())
        .chain(config.llm.fallback_models.iter().map(String::as_str))
        .collect();
    print_models(&models, &configured);
    Ok(())
}
