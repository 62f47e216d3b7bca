//! Database initialization handler

use crate::cli::output::print_info;
use crate::cli::output::print_success;
use crate::cli::output::print_warning;
use crate::database::Database;
use crate::AppConfig;
use crate::Result;

/// Handle database initialization command
pub async fn handle_init_command(config: &AppConfig, force: bool) -> Result<()> {
    if !force {
        print_warning("This will create the user_profiles, chat_history, translations and content_chunks tables.");
        print_warning("This operation is safe - it uses CREATE IF NOT EXISTS.");
        println!("\nUse --force to proceed.");
        return Ok(());
    }

    print_info("🗄️  Initializing textbook database...");
    let database = Database::from_config(config).await?;
    database.init_schema().await?;

    print_success("Tables and indexes created");
    println!();
    print_info("To load the textbook passages into the vector store, run:");
    println!("   textbook-rag seed");

    Ok(())
}
