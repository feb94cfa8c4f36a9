//! Core data types for Folio.
//!
//! This module defines the data structures that flow through the
//! pipeline: chunk records, embeddable nodes, statistics and search
//! results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single chunk of one page's normalized text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// The chunk text (at most `chunk_size` characters)
    pub text: String,

    /// 1-based page number the chunk was extracted from
    pub page: usize,

    /// `"<page>-<sequence>"`, sequence reset at every page
    pub chunk_id: String,

    /// Identifier of the originating document (may be empty)
    pub source: String,
}

/// Metadata carried by every node in the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMetadata {
    pub page: usize,
    pub chunk_id: String,
    pub source: String,
}

/// An embeddable unit: chunk text plus opaque metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextNode {
    /// Node identifier, unique within one index
    pub id: String,

    /// Text that gets embedded
    pub text: String,

    /// Metadata copied from the chunk record
    pub metadata: NodeMetadata,
}

impl From<&ChunkRecord> for TextNode {
    fn from(chunk: &ChunkRecord) -> Self {
        Self {
            id: chunk.chunk_id.clone(),
            text: chunk.text.clone(),
            metadata: NodeMetadata {
                page: chunk.page,
                chunk_id: chunk.chunk_id.clone(),
                source: chunk.source.clone(),
            },
        }
    }
}

/// Statistics from an ingest run (load, normalize, chunk)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestStats {
    /// Number of pages in the document
    pub pages: usize,

    /// Pages whose normalized text was empty
    pub empty_pages: usize,

    /// Total chunks created
    pub chunks_created: usize,

    /// Characters of normalized text across all pages
    pub characters: usize,

    /// Duration in milliseconds
    pub duration_ms: u64,

    /// Source identifier propagated into every chunk
    pub source: String,
}

/// Statistics from an index build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    pub pages: usize,
    pub chunks_created: usize,
    pub nodes_stored: usize,
    pub dimensions: usize,
    pub duration_ms: u64,
    pub persist_dir: PathBuf,
    pub source: String,
}

/// A ranked search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// 1-based rank
    pub rank: usize,

    /// Cosine similarity (higher = more similar)
    pub score: f32,

    pub text: String,
    pub page: usize,
    pub chunk_id: String,
    pub source: String,
}

/// Response from a search over a persisted index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Original query string
    pub query: String,

    /// Search results, best first
    pub results: Vec<SearchResult>,

    /// Number of results returned
    pub count: usize,

    /// Query duration in milliseconds
    pub duration_ms: u64,
}
