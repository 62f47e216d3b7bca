//! Logging configuration for the textbook backend

use std::path::Path;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{
    self,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

use crate::config::LoggingConfig;
use crate::Result;
use crate::TextbookRagError;

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "textbook-rag.log";

/// Initialize logging with configuration
pub fn init_logging_with_config(config: Option<&crate::config::AppConfig>) -> Result<()> {
    let (env_filter, level) = if let Some(config) = config {
        let level = config.logging.level.clone();
        (level_filter(&level), level)
    } else {
        // Fallback to environment variable or default
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,textbook_rag=debug"));
        (filter, "info".to_string())
    };

    init_registry(env_filter, &level)
}

/// Initialize logging with custom log level
pub fn init_logging_with_level(level: &str) -> Result<()> {
    init_registry(level_filter(level), level)
}

/// Turn on `RUST_BACKTRACE` when `[logging] backtrace` asks for it
///
/// An explicit `RUST_BACKTRACE` in the environment always wins.
pub fn apply_backtrace(config: &LoggingConfig) {
    if wants_backtrace(config, std::env::var_os("RUST_BACKTRACE").is_some()) {
        std::env::set_var("RUST_BACKTRACE", "1");
    }
}

const fn wants_backtrace(config: &LoggingConfig, env_set: bool) -> bool {
    config.backtrace && !env_set
}

/// Initialize simple logging for testing
pub fn init_simple_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_max_level(tracing::Level::INFO)
        .try_init()
        .map_err(|e| TextbookRagError::Custom(format!("Logging already initialized: {e}")))?;

    tracing::info!("Simple logging initialized");
    Ok(())
}

fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!("{level},textbook_rag={level}"))
}

fn init_registry(env_filter: EnvFilter, level: &str) -> Result<()> {
    let logs_dir = Path::new(LOG_DIR);
    if !logs_dir.exists() {
        std::fs::create_dir_all(logs_dir)?;
    }

    let file_appender = tracing_appender::rolling::daily(LOG_DIR, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking)
        .with_ansi(false); // No colors in file

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| TextbookRagError::Custom(format!("Logging already initialized: {e}")))?;

    tracing::info!(
        "Logging initialized with level: {} - console and file output enabled",
        level
    );
    tracing::info!("Log files will be saved to: {}/{}.YYYY-MM-DD", LOG_DIR, LOG_FILE);

    // The worker must outlive every log call for the rest of the process
    std::mem::forget(guard);

    Ok(())
}
