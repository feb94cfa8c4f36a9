//! Info command - show version and index information

use crate::cli::output::{colors, format_bytes, format_relative_time, print_output};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::storage::IndexMetadata;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the info command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Show detailed information about the persisted index
    #[arg(long, short = 'd')]
    pub detailed: bool,

    /// Directory the index was persisted to
    #[arg(long)]
    pub persist_dir: Option<PathBuf>,
}

/// Persisted index summary
#[derive(Debug, Serialize)]
pub struct IndexInfo {
    pub source: String,
    pub nodes: usize,
    pub pages: usize,
    pub chunk_size: usize,
    pub overlap: usize,
    pub provider: String,
    pub model: String,
    pub dimensions: usize,
    pub created_at: String,
    pub size_bytes: u64,
}

impl IndexInfo {
    fn new(metadata: IndexMetadata, size_bytes: u64) -> Self {
        Self {
            source: metadata.source,
            nodes: metadata.node_count,
            pages: metadata.pages,
            chunk_size: metadata.chunk_size,
            overlap: metadata.overlap,
            provider: metadata.embedding.provider.to_string(),
            model: metadata.embedding.model,
            dimensions: metadata.embedding.dimensions,
            created_at: metadata.created_at.to_rfc3339(),
            size_bytes,
        }
    }
}

/// Info response
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub name: String,
    pub version: String,
    pub config_dir: String,
    pub persist_dir: String,
    pub index_exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<IndexInfo>,
}

/// Execute the info command
pub async fn execute(
    args: InfoArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let xdg = XdgDirs::new();
    let store = services.store(args.persist_dir.as_deref());
    let index_exists = store.exists();

    let (index, created_ago) = if args.detailed && index_exists {
        let metadata = store.metadata()?;
        let ago = format_relative_time(&metadata.created_at);
        (Some(IndexInfo::new(metadata, store.size_bytes())), Some(ago))
    } else {
        (None, None)
    };

    let info = InfoResponse {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        config_dir: xdg.config_dir.display().to_string(),
        persist_dir: store.persist_dir().display().to_string(),
        index_exists,
        index,
    };

    print_output(&info, format, |info| {
        println!("{} {}", info.name, info.version);
        println!("Config: {}", info.config_dir);
        println!(
            "Index: {} ({})",
            colors::file_path(&info.persist_dir),
            if info.index_exists { "present" } else { "not built" }
        );
        if let Some(index) = &info.index {
            println!("  Source: {}", index.source);
            println!(
                "  Nodes: {} from {} pages (chunk_size={}, overlap={})",
                colors::number(&index.nodes.to_string()),
                index.pages,
                index.chunk_size,
                index.overlap
            );
            println!(
                "  Embedding: {} / {} ({} dims)",
                index.provider, index.model, index.dimensions
            );
            println!("  Size: {}", colors::number(&format_bytes(index.size_bytes)));
            if let Some(ago) = &created_ago {
                println!("  Built: {}", colors::dim(ago));
            }
        }
    })?;

    Ok(())
}
