//! API server handlers

use crate::api::serve_api;
use crate::api::StorageMode;
use crate::AppConfig;
use crate::Result;

pub async fn handle_serve_api(
    config: &AppConfig,
    host: Option<String>,
    port: Option<u16>,
    no_cors: bool,
    memory_store: bool,
) -> Result<()> {
    // CLI arguments take priority over config
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let cors = config.server.enable_cors && !no_cors;
    let storage = if memory_store {
        StorageMode::Memory
    } else {
        StorageMode::Database
    };

    println!("🚀 Starting Physical AI Textbook API");
    println!("====================================\n");
    println!("📍 Host: {host}");
    println!("🔌 Port: {port}");
    println!("🌐 CORS: {}", if cors { "Enabled" } else { "Disabled" });
    println!(
        "🗄️  Storage: {}",
        match storage {
            StorageMode::Memory => "In-memory",
            StorageMode::Database => "Postgres",
        }
    );
    println!();

    serve_api(config, host, port, cors, storage).await
}
