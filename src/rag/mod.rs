//! Retrieval-augmented chat over the textbook
//!
//! - Query embedding and nearest-passage retrieval
//! - Context assembly with a fixed fallback description
//! - Tutor prompt and generation through the model ladder
//! - Chat history for signed-in readers
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use textbook_rag::config::AppConfig;
//! use textbook_rag::embeddings::EmbeddingService;
//! use textbook_rag::llm::LlmService;
//! use textbook_rag::rag::ChatOrchestrator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let chat = ChatOrchestrator::new(
//!         Arc::new(EmbeddingService::new(&config)?),
//!         None,
//!         Arc::new(LlmService::new(&config)?),
//!         None,
//!     );
//!
//!     let answer = chat.answer(Some("What is ROS 2?"), None, None).await?;
//!     println!("{answer}");
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod pipeline;
pub mod prompts;

pub use context::assemble_context;
pub use pipeline::ChatOrchestrator;
