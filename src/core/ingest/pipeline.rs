//! Ingest pipeline orchestration.
//!
//! Coordinates the document-to-chunks workflow:
//! 1. Load raw page text
//! 2. Normalize each page
//! 3. Chunk the normalized pages

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::core::error::Result;
use crate::core::ingest::loader::DocumentLoader;
use crate::core::ingest::{normalize, Chunker};
use crate::core::types::{ChunkRecord, IngestStats};

/// Orchestrates load, normalize and chunk for one document
pub struct IngestPipeline {
    loader: Arc<dyn DocumentLoader>,
    chunker: Chunker,
}

impl fmt::Debug for IngestPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestPipeline")
            .field("chunker", &self.chunker)
            .finish_non_exhaustive()
    }
}

impl IngestPipeline {
    /// Create a new ingest pipeline
    ///
    /// # Arguments
    ///
    /// * `loader` - Source of raw page text
    /// * `chunk_size` - Size of chunks in characters
    /// * `overlap` - Overlap between chunks in characters
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the chunking parameters are out of range.
    /// Nothing is loaded in that case.
    pub fn new(loader: Arc<dyn DocumentLoader>, chunk_size: i64, overlap: i64) -> Result<Self> {
        let chunker = Chunker::new(chunk_size, overlap)?;
        Ok(Self { loader, chunker })
    }

    /// The validated chunker used by this pipeline
    pub fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    /// Ingest a document and return its chunks + stats
    ///
    /// The path's display string becomes the `source` of every chunk.
    /// Loader errors (missing file, unreadable PDF) propagate as-is.
    pub fn ingest(&self, path: &Path) -> Result<(Vec<ChunkRecord>, IngestStats)> {
        let start = Instant::now();
        let source = path.display().to_string();

        tracing::info!("Loading {:?}", path);
        let raw_pages = self.loader.load_pages(path)?;

        let (chunks, mut stats) = self.chunk_texts(&raw_pages, &source);
        stats.duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Ingest complete: {} pages ({} empty), {} chunks in {}ms",
            stats.pages,
            stats.empty_pages,
            stats.chunks_created,
            stats.duration_ms
        );

        Ok((chunks, stats))
    }

    /// Normalize and chunk pages that are already in memory
    pub fn chunk_texts<S: AsRef<str>>(
        &self,
        raw_pages: &[S],
        source: &str,
    ) -> (Vec<ChunkRecord>, IngestStats) {
        let start = Instant::now();

        let pages: Vec<String> = raw_pages.iter().map(|p| normalize(p.as_ref())).collect();

        let empty_pages = pages.iter().filter(|p| p.is_empty()).count();
        if empty_pages > 0 {
            tracing::warn!(
                "{} of {} pages have no extractable text",
                empty_pages,
                pages.len()
            );
        }

        let characters = pages.iter().map(|p| p.chars().count()).sum();
        let chunks = self.chunker.chunk_pages(&pages, source);

        let stats = IngestStats {
            pages: pages.len(),
            empty_pages,
            chunks_created: chunks.len(),
            characters,
            duration_ms: start.elapsed().as_millis() as u64,
            source: source.to_string(),
        };

        (chunks, stats)
    }
}
