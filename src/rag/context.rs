//! Context assembly from retrieved passages

use super::prompts::FALLBACK_CONTEXT;
use crate::models::SearchHit;

/// Join hit texts in rank order, falling back to the book description
///
/// Text the reader selected on the page always leads the context.
#[must_use]
pub fn assemble_context(hits: &[SearchHit], selected_context: Option<&str>) -> String {
    let retrieved = hits
        .iter()
        .map(|hit| hit.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    let context = if retrieved.is_empty() {
        FALLBACK_CONTEXT.to_string()
    } else {
        retrieved
    };

    match selected_context {
        Some(selected) if !selected.is_empty() => format!("{selected}\n\n{context}"),
        _ => context,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(text: &str) -> SearchHit {
        SearchHit {
            text: text.to_string(),
            score: 0.5,
            id: "id".to_string(),
            module: None,
            section: None,
        }
    }

    #[test]
    fn test_hits_joined_in_order() {
        let context = assemble_context(&[hit("first"), hit("second")], None);
        assert_eq!(context, "first\n\nsecond");
    }

    #[test]
    fn test_empty_hits_use_fallback() {
        assert_eq!(assemble_context(&[], None), FALLBACK_CONTEXT);
        // Hits with blank text are no better than none
        assert_eq!(assemble_context(&[hit("")], None), FALLBACK_CONTEXT);
    }

    #[test]
    fn test_selected_text_leads() {
        assert_eq!(
            assemble_context(&[], Some("selected paragraph")),
            format!("selected paragraph\n\n{FALLBACK_CONTEXT}")
        );
        assert_eq!(assemble_context(&[hit("a")], Some("")), "a");
    }
}
