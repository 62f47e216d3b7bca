//! Tutor prompts

/// Context used when retrieval produced nothing
pub const FALLBACK_CONTEXT: &str = "This is a textbook about Physical AI & Humanoid Robotics covering ROS 2, Gazebo, NVIDIA Isaac, and Vision-Language-Action systems.";

/// System prompt framing the model as a tutor grounded in `context`
#[must_use]
pub fn build_system_prompt(context: &str) -> String {
    format!(
        "You are an AI assistant helping students learn about Physical AI & Humanoid Robotics. \
Use the following context from the textbook to answer questions accurately. \
If the context doesn't contain the answer, you can use your general knowledge but indicate when you're doing so.\n\n\
Context from textbook:\n{context}\n\n\
Answer the question based on the context provided. Be helpful, clear, and educational."
    )
}

/// Final prompt sent to the model
#[must_use]
pub fn build_full_prompt(system_prompt: &str, question: &str) -> String {
    format!(
        "{system_prompt}\n\nUser question: {question}\n\nAnswer based on the context provided above."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_embeds_context() {
        let prompt = build_system_prompt("ROS 2 uses DDS.");
        assert!(prompt.starts_with("You are an AI assistant helping students"));
        assert!(prompt.contains("\n\nContext from textbook:\nROS 2 uses DDS.\n\n"));
        assert!(prompt.ends_with("Be helpful, clear, and educational."));
    }

    #[test]
    fn test_full_prompt_layout() {
        assert_eq!(
            build_full_prompt("SYS", "What is ROS 2?"),
            "SYS\n\nUser question: What is ROS 2?\n\nAnswer based on the context provided above."
        );
    }
}
