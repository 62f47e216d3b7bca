use clap::Parser;
use textbook_rag::cli::handlers;
use textbook_rag::cli::Cli;
use textbook_rag::cli::Commands;
use textbook_rag::config::AppConfig;
use textbook_rag::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    textbook_rag::logging::apply_backtrace(&config.logging);
    if cli.verbose {
        textbook_rag::logging::init_logging_with_level("debug")?;
    } else {
        textbook_rag::logging::init_logging_with_config(Some(&config))?;
    }
    info!("Configuration loaded successfully");

    // Execute the requested command
    match cli.command {
        Commands::Serve {
            host,
            port,
            no_cors,
            memory_store,
        } => handlers::handle_serve_api(&config, host, port, no_cors, memory_store).await,
        Commands::Init { force } => handlers::handle_init_command(&config, force).await,
        Commands::Seed { skip_db } => handlers::handle_seed_command(&config, skip_db).await,
        Commands::Config => handlers::handle_config_command(&config).await,
        Commands::Models => handlers::handle_models_command(&config).await,
    }
}
