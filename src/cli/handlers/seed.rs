//! Vector seeding handler

use tracing::warn;

use crate::cli::output::print_info;
use crate::cli::output::print_seed_report;
use crate::cli::output::print_success;
use crate::cli::output::print_warning;
use crate::database::Database;
use crate::embeddings::EmbeddingService;
use crate::seed::seed_vectors;
use crate::seed::BOOK_CHUNKS;
use crate::vector::QdrantStore;
use crate::AppConfig;
use crate::Result;

/// Embed the built-in passages, upsert them, and mirror them into Postgres
pub async fn handle_seed_command(config: &AppConfig, skip_db: bool) -> Result<()> {
    print_info("🌱 Starting vector seeding...");

    let embeddings = EmbeddingService::new(config)?;
    let store = QdrantStore::from_config(config)?;

    let written = seed_vectors(&embeddings, &store, &BOOK_CHUNKS).await?;
    print_seed_report(&written);

    if skip_db || config.database_url().is_none() {
        print_info("Skipping content_chunks mirror");
    } else {
        let database = Database::from_config(config).await?;
        database.init_schema().await?;

        let mut mirrored = 0;
        for chunk in &written {
            match database.insert_content_chunk(&chunk.payload, &chunk.id).await {
                Ok(_) => mirrored += 1,
                Err(e) => warn!("Could not record content chunk {}: {}", chunk.id, e),
            }
        }
        if mirrored < written.len() {
            print_warning(&format!(
                "Recorded {mirrored} of {} passages in content_chunks",
                written.len()
            ));
        } else {
            print_success(&format!("Recorded {mirrored} passages in content_chunks"));
        }
    }

    print_success("Vector seeding complete!");
    Ok(())
}
