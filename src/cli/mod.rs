//! CLI adapter for Folio
//!
//! Provides the command-line interface over `core/`: ingest a PDF into
//! chunks, build a persisted vector index, and query it.
//!
//! # Architecture
//!
//! ```text
//! +------------------+      +------------------+
//! |      cli/        | ---> |     core/        |
//! | (clap adapter)   |      |  (domain logic)  |
//! +------------------+      +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// Folio - PDF chunking and vector index builder
///
/// Extracts text from a PDF page by page, normalizes whitespace, splits
/// each page into overlapping character chunks and indexes them for
/// similarity search.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "PDF chunking and vector index builder", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Log progress to stderr (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract, normalize and chunk a PDF, then print a preview
    Ingest(commands::IngestArgs),

    /// Chunk a PDF, embed the chunks and persist a vector index
    #[command(name = "build-index")]
    BuildIndex(commands::BuildIndexArgs),

    /// Query a persisted index
    Search(commands::SearchArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Show version and index information
    #[command(name = "get-info")]
    GetInfo(commands::InfoArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  folio completions bash > ~/.local/share/bash-completion/completions/folio
    ///   zsh:   folio completions zsh > ~/.zfunc/_folio
    ///   fish:  folio completions fish > ~/.config/fish/completions/folio.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    let xdg = XdgDirs::new();
    xdg.log_paths();

    // Load configuration
    let config = Config::load_with_xdg(&xdg)?;
    config.log_config();

    // Create services
    let services = Arc::new(Services::new(config));

    // Execute command
    match cli.command {
        Commands::Ingest(args) => commands::ingest::execute(args, &services, cli.format).await,
        Commands::BuildIndex(args) => {
            commands::build_index::execute(args, &services, cli.format).await
        }
        Commands::Search(args) => commands::search::execute(args, &services, cli.format).await,
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format).await,
        Commands::GetInfo(args) => commands::info::execute(args, &services, cli.format).await,
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
