//! CLI command handlers module
//!
//! This module is organized by functional domains:
//! - init: Database initialization
//! - seed: Vector store seeding
//! - serve: API server
//! - info: Information display (config)
//! - models: Gemini model listing

pub mod info;
pub mod init;
pub mod models;
pub mod seed;
pub mod serve;

// Re-export all public handlers
pub use info::*;
pub use init::*;
pub use models::*;
pub use seed::*;
pub use serve::*;
