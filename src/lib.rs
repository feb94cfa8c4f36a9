//! Folio - PDF question-answering preprocessing
//!
//! Turns a PDF into a searchable vector index: extract text per page,
//! normalize whitespace, split pages into overlapping character
//! chunks, embed the chunks and persist them for similarity search.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - config, error, types, xdg
//!   - ingest (PDF loading, normalization, chunking)
//!   - embedding (OpenAI-compatible and local hashing backends)
//!   - index (index building)
//!   - storage (vector index, persisted store)
//!   - search (similarity queries)
//!   - services (unified service container)
//!
//! - **cli**: Command-line adapter (depends on core)
//!
//! # Key Features
//!
//! - UTF-8 safe chunking (character-based, never panics)
//! - Chunk ids of the form `"{page}-{seq}"` carried into the index
//! - Embedding provider passed explicitly, no global settings
//! - Exact cosine search over a JSON-persisted index

// Core domain logic
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{FolioError, Result};
pub use core::services::Services;
pub use core::types::*;
