//! Translation prompt

/// Human-readable name of the translation target
///
/// Only Urdu is a real target; every other code translates to English.
pub fn target_language_name(language: &str) -> &'static str {
    if language == "ur" {
        "Urdu"
    } else {
        "English"
    }
}

/// Build the translation prompt for `text`
#[must_use]
pub fn build_translation_prompt(text: &str, language: &str) -> String {
    format!(
        "Translate the following text to {}. Preserve formatting, code blocks, and technical terms. Only return the translation:\n\n{}",
        target_language_name(language),
        text
    )
}
