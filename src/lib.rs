//! Backend for the Physical AI & Humanoid Robotics textbook
//!
//! Retrieval-augmented chat over the book, cached translation, reader
//! accounts and experience-based personalization, served over HTTP.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod embeddings;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod models;
pub mod personalization;
pub mod rag;
pub mod seed;
pub mod translation;
pub mod vector;

#[cfg(test)]
mod errors_tests;

pub use config::AppConfig;
pub use errors::*;
