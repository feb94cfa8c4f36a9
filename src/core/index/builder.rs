//! Index building.
//!
//! Converts chunk records into embeddable nodes, embeds them in
//! batches and assembles a [`VectorIndex`]. [`build_index_from_pdf`]
//! runs the whole chain from a PDF path to a persisted index.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::core::config::EmbeddingConfig;
use crate::core::embedding::{create_embedder, Embedder};
use crate::core::error::{FolioError, Result};
use crate::core::ingest::IngestPipeline;
use crate::core::storage::{IndexMetadata, IndexStore, VectorIndex, SCHEMA_VERSION};
use crate::core::types::{ChunkRecord, IndexStats, TextNode};

/// Convert chunk records to nodes, metadata copied unchanged
pub fn to_nodes(chunks: &[ChunkRecord]) -> Vec<TextNode> {
    chunks.iter().map(TextNode::from).collect()
}

/// Embeds nodes in batches and collects them into a vector index
pub struct IndexBuilder {
    embedder: Arc<dyn Embedder>,
    batch_size: usize,
}

impl IndexBuilder {
    pub fn new(embedder: Arc<dyn Embedder>, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(FolioError::InvalidParameter(
                "batch_size must be > 0".to_string(),
            ));
        }
        Ok(Self {
            embedder,
            batch_size,
        })
    }

    /// Embed every node and build the index, preserving node order
    pub async fn build(&self, nodes: Vec<TextNode>) -> Result<VectorIndex> {
        if let Some(empty) = nodes.iter().find(|n| n.text.is_empty()) {
            return Err(FolioError::InvalidParameter(format!(
                "node '{}' has empty text",
                empty.id
            )));
        }

        let total = nodes.len();
        let mut index = VectorIndex::with_capacity(self.embedder.dimensions(), total);
        let mut remaining = nodes.into_iter().peekable();
        let mut done = 0;

        while remaining.peek().is_some() {
            let batch: Vec<TextNode> = remaining.by_ref().take(self.batch_size).collect();
            let texts: Vec<&str> = batch.iter().map(|n| n.text.as_str()).collect();

            let embeddings = self.embedder.embed_batch(&texts).await?;
            if embeddings.len() != batch.len() {
                return Err(FolioError::EmbeddingFailed(format!(
                    "embedder returned {} vectors for {} texts",
                    embeddings.len(),
                    batch.len()
                )));
            }

            for (node, embedding) in batch.into_iter().zip(embeddings) {
                index.insert(node, embedding).map_err(|e| {
                    FolioError::EmbeddingFailed(format!("unexpected embedding shape: {e}"))
                })?;
            }

            done = index.len();
            tracing::debug!("Embedded {}/{} nodes", done, total);
        }

        tracing::info!(
            "Built index with {} nodes using {}",
            done,
            self.embedder.model()
        );
        Ok(index)
    }
}

/// Read a PDF, chunk it, embed the chunks and persist the index.
///
/// The credential check happens before the document is read, so a
/// missing API key fails fast with `MissingCredential`.
pub async fn build_index_from_pdf(
    pipeline: &IngestPipeline,
    pdf_path: &Path,
    persist_dir: &Path,
    embedding: &EmbeddingConfig,
) -> Result<(VectorIndex, IndexStats)> {
    let start = Instant::now();

    let embedder = create_embedder(embedding)?;
    let (chunks, ingest_stats) = pipeline.ingest(pdf_path)?;

    let nodes = to_nodes(&chunks);
    let builder = IndexBuilder::new(embedder, embedding.batch_size)?;
    let index = builder.build(nodes).await?;

    let chunker = pipeline.chunker();
    let metadata = IndexMetadata {
        source: ingest_stats.source.clone(),
        created_at: Utc::now(),
        chunk_size: chunker.chunk_size(),
        overlap: chunker.overlap(),
        pages: ingest_stats.pages,
        node_count: index.len(),
        embedding: embedding.clone(),
        schema_version: SCHEMA_VERSION,
    };

    let store = IndexStore::new(persist_dir);
    store.persist(&index, &metadata)?;

    let stats = IndexStats {
        pages: ingest_stats.pages,
        chunks_created: ingest_stats.chunks_created,
        nodes_stored: index.len(),
        dimensions: index.dimensions(),
        duration_ms: start.elapsed().as_millis() as u64,
        persist_dir: persist_dir.to_path_buf(),
        source: ingest_stats.source,
    };

    Ok((index, stats))
}
