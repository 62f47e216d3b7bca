//! CLI command definitions and argument parsing

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "textbook-rag")]
#[command(about = "Backend for the Physical AI & Humanoid Robotics textbook")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to (defaults to config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (defaults to config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Disable CORS
        #[arg(long)]
        no_cors: bool,
        /// Keep accounts, history and translations in memory instead of Postgres
        #[arg(long)]
        memory_store: bool,
    },
    /// Create database tables and indexes
    Init {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Load the built-in textbook passages into the vector store
    Seed {
        /// Do not mirror passages into the content_chunks table
        #[arg(long)]
        skip_db: bool,
    },
    /// Show current configuration
    Config,
    /// List Gemini models reachable with the configured key
    Models,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "textbook-rag",
            "-v",
            "serve",
            "--port",
            "9000",
            "--no-cors",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Serve {
                host,
                port,
                no_cors,
                memory_store,
            } => {
                assert!(host.is_none());
                assert_eq!(port, Some(9000));
                assert!(no_cors);
                assert!(!memory_store);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_init_and_seed() {
        let cli = Cli::try_parse_from(["textbook-rag", "init", "--force"]).unwrap();
        assert!(matches!(cli.command, Commands::Init { force: true }));

        let cli = Cli::try_parse_from(["textbook-rag", "seed", "--skip-db"]).unwrap();
        assert!(matches!(cli.command, Commands::Seed { skip_db: true }));
    }

    #[test]
    fn test_models() {
        let cli = Cli::try_parse_from(["textbook-rag", "models"]).unwrap();
        assert!(matches!(cli.command, Commands::Models));
    }
}
