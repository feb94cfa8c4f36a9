//! Config command - show current configuration

use crate::cli::output::{print_header, print_output};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::services::Services;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Also show where the configuration file is looked up
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,
    #[serde(flatten)]
    pub config: Config,
}

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config_file = args
        .all
        .then(|| XdgDirs::new().config_file().display().to_string());

    let response = ConfigResponse {
        config_file,
        config: services.config.as_ref().clone(),
    };

    print_output(&response, format, print_human)?;

    Ok(())
}

fn print_human(response: &ConfigResponse) {
    let config = &response.config;

    print_header("Configuration:");
    if let Some(file) = &response.config_file {
        println!("  config_file: {file}");
    }
    println!("  indexing:");
    println!("    chunk_size: {}", config.indexing.chunk_size);
    println!("    overlap: {}", config.indexing.overlap);
    println!("    preview: {}", config.indexing.preview);
    println!("  storage:");
    println!("    persist_dir: {}", config.storage.persist_dir.display());
    println!("    data_dir: {}", config.storage.data_dir.display());
    println!("  embedding:");
    println!("    provider: {}", config.embedding.provider);
    println!("    model: {}", config.embedding.model);
    println!("    dimensions: {}", config.embedding.dimensions);
    println!("    base_url: {}", config.embedding.base_url);
    println!("    api_key_env: {}", config.embedding.api_key_env);
    println!("    batch_size: {}", config.embedding.batch_size);
    println!("    timeout_secs: {}", config.embedding.timeout_secs);
    println!("  search:");
    println!("    default_k: {}", config.search.default_k);
    println!("    max_k: {}", config.search.max_k);
}
