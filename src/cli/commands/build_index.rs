//! Build-index command - chunk a PDF, embed it and persist the index

use crate::cli::commands::chunk_params;
use crate::cli::output::{colors, format_duration, print_output};
use crate::cli::OutputFormat;
use crate::core::config::EmbeddingProvider;
use crate::core::embedding::check_credentials;
use crate::core::index::build_index_from_pdf;
use crate::core::ingest::resolve_document;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the build-index command
#[derive(Args, Debug)]
pub struct BuildIndexArgs {
    /// PDF to index (default: first PDF in the data directory)
    #[arg(long, short = 'p')]
    pub path: Option<PathBuf>,

    /// Characters per chunk
    #[arg(long, allow_negative_numbers = true)]
    pub chunk_size: Option<i64>,

    /// Overlap between consecutive chunks on a page
    #[arg(long, allow_negative_numbers = true)]
    pub overlap: Option<i64>,

    /// Directory to persist the index to
    #[arg(long)]
    pub persist_dir: Option<PathBuf>,

    /// Embedding provider (openai, hashing)
    #[arg(long)]
    pub provider: Option<EmbeddingProvider>,

    /// Embedding model name
    #[arg(long)]
    pub model: Option<String>,
}

/// Build result response
#[derive(Debug, Serialize)]
pub struct BuildIndexResponse {
    pub file: String,
    pub pages: usize,
    pub chunks: usize,
    pub nodes: usize,
    pub dimensions: usize,
    pub provider: String,
    pub model: String,
    pub persist_dir: String,
    pub duration_secs: f64,
}

/// Execute the build-index command
pub async fn execute(
    args: BuildIndexArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let embedding = services.embedding_config(args.provider, args.model.as_deref());

    // Fail on a missing API key before any other work
    check_credentials(&embedding)?;

    let (chunk_size, overlap) = chunk_params(services, args.chunk_size, args.overlap);
    let pipeline = services.create_pipeline(chunk_size, overlap)?;

    let path = resolve_document(args.path.as_deref(), &services.config.storage.data_dir)?;
    let store = services.store(args.persist_dir.as_deref());

    if format == OutputFormat::Human {
        eprintln!(
            "Indexing {} with {}...",
            colors::file_path(&path.display().to_string()),
            colors::label(&embedding.model)
        );
    }

    let (_index, stats) =
        build_index_from_pdf(&pipeline, &path, store.persist_dir(), &embedding).await?;

    let response = BuildIndexResponse {
        file: stats.source,
        pages: stats.pages,
        chunks: stats.chunks_created,
        nodes: stats.nodes_stored,
        dimensions: stats.dimensions,
        provider: embedding.provider.to_string(),
        model: embedding.model.clone(),
        persist_dir: stats.persist_dir.display().to_string(),
        duration_secs: stats.duration_ms as f64 / 1000.0,
    };

    print_output(&response, format, |r| {
        println!(
            "{} {} nodes from {} pages in {}",
            colors::success("Indexed"),
            colors::number(&r.nodes.to_string()),
            colors::number(&r.pages.to_string()),
            colors::number(&format_duration(r.duration_secs))
        );
        println!("Persisted to {}", colors::file_path(&r.persist_dir));
    })?;

    Ok(())
}
