//! Unit tests for error handling
//!
//! Tests error types, conversions, and error message formatting.

#[cfg(test)]
mod tests {
    use std::io;

    use crate::errors::TextbookRagError;

    // ====== Error Type Tests ======

    #[test]
    fn test_custom_error() {
        let error = TextbookRagError::Custom("Test error message".to_string());
        assert_eq!(format!("{error}"), "Test error message");
    }

    #[test]
    fn test_config_error() {
        let error = TextbookRagError::ConfigError("GEMINI_API_KEY not configured".to_string());
        assert!(matches!(error, TextbookRagError::ConfigError(_)));
        assert!(format!("{error}").contains("Configuration"));
    }

    #[test]
    fn test_llm_error_message_is_descriptive() {
        let error = TextbookRagError::LlmError("All Gemini models failed".to_string());
        assert_eq!(
            format!("{error}"),
            "Gemini API error: All Gemini models failed"
        );
    }

    #[test]
    fn test_auth_error_messages() {
        assert_eq!(
            TextbookRagError::DuplicateEmail.to_string(),
            "Email already registered"
        );
        assert_eq!(
            TextbookRagError::Unauthorized.to_string(),
            "Invalid email or password"
        );
    }

    // ====== Error Conversion Tests ======

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err: TextbookRagError = io_err.into();

        assert!(matches!(err, TextbookRagError::Io(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let err: TextbookRagError = json_err.into();

        assert!(matches!(err, TextbookRagError::Serialization(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: TextbookRagError = toml_err.into();

        assert!(matches!(err, TextbookRagError::TomlParsing(_)));
    }

    #[test]
    fn test_question_mark_propagation() {
        fn parse() -> crate::Result<serde_json::Value> {
            Ok(serde_json::from_str("not json")?)
        }

        assert!(matches!(parse(), Err(TextbookRagError::Serialization(_))));
    }
}
