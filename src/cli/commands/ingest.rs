//! Ingest command - chunk a PDF and preview the result

use crate::cli::commands::chunk_params;
use crate::cli::output::{colors, print_output, truncate_chars, PREVIEW_CHARS};
use crate::cli::OutputFormat;
use crate::core::ingest::resolve_document;
use crate::core::services::Services;
use crate::core::types::ChunkRecord;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the ingest command
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// PDF to ingest (default: first PDF in the data directory)
    #[arg(long, short = 'p')]
    pub path: Option<PathBuf>,

    /// Characters per chunk
    #[arg(long, allow_negative_numbers = true)]
    pub chunk_size: Option<i64>,

    /// Overlap between consecutive chunks on a page
    #[arg(long, allow_negative_numbers = true)]
    pub overlap: Option<i64>,

    /// Number of chunks to print
    #[arg(long)]
    pub preview: Option<usize>,
}

/// Chunk preview item
#[derive(Debug, Serialize)]
pub struct ChunkPreview {
    pub chunk_id: String,
    pub page: usize,
    pub characters: usize,
    pub text: String,
}

impl From<&ChunkRecord> for ChunkPreview {
    fn from(chunk: &ChunkRecord) -> Self {
        Self {
            chunk_id: chunk.chunk_id.clone(),
            page: chunk.page,
            characters: chunk.text.chars().count(),
            text: truncate_chars(&chunk.text, PREVIEW_CHARS),
        }
    }
}

/// Ingest result response
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub file: String,
    pub pages: usize,
    pub empty_pages: usize,
    pub chunks: usize,
    pub chunk_size: usize,
    pub overlap: usize,
    pub duration_ms: u64,
    pub preview: Vec<ChunkPreview>,
}

/// Execute the ingest command
pub async fn execute(
    args: IngestArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let (chunk_size, overlap) = chunk_params(services, args.chunk_size, args.overlap);

    // Validate parameters before touching the document
    let pipeline = services.create_pipeline(chunk_size, overlap)?;

    let path = resolve_document(args.path.as_deref(), &services.config.storage.data_dir)?;
    let (chunks, stats) = pipeline.ingest(&path)?;

    let preview_count = args.preview.unwrap_or(services.config.indexing.preview);

    let response = IngestResponse {
        file: stats.source.clone(),
        pages: stats.pages,
        empty_pages: stats.empty_pages,
        chunks: chunks.len(),
        chunk_size: pipeline.chunker().chunk_size(),
        overlap: pipeline.chunker().overlap(),
        duration_ms: stats.duration_ms,
        preview: chunks.iter().take(preview_count).map(ChunkPreview::from).collect(),
    };

    print_output(&response, format, print_human)?;

    Ok(())
}

fn print_human(response: &IngestResponse) {
    println!("File: {}", colors::file_path(&response.file));
    println!(
        "Pages: {}{}",
        colors::number(&response.pages.to_string()),
        if response.empty_pages > 0 {
            format!(" ({} without text)", response.empty_pages)
        } else {
            String::new()
        }
    );
    println!(
        "Chunks: {} (chunk_size={}, overlap={})",
        colors::number(&response.chunks.to_string()),
        response.chunk_size,
        response.overlap
    );

    for chunk in &response.preview {
        println!();
        println!(
            "[{}] page {} {}",
            colors::chunk_id(&chunk.chunk_id),
            chunk.page,
            colors::dim(&format!("({} chars)", chunk.characters))
        );
        println!("    {}", chunk.text);
    }
}
