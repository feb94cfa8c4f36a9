//! Document ingestion module.
//!
//! Turns a document into ordered chunk records. Key features:
//!
//! - Whitespace normalization per page
//! - UTF-8 safe character-based chunking
//! - Configurable chunk size and overlap, validated up front
//! - Pluggable page loading (PDF by default)
//!
//! # Safety
//!
//! The chunker slices via `char_indices()` so that chunk boundaries
//! always fall on character boundaries, whatever the script or emoji
//! content of the page.

pub mod chunker;
pub mod loader;
pub mod normalizer;
pub mod pipeline;

pub use chunker::{chunk, Chunker};
pub use loader::{find_first_pdf, resolve_document, DocumentLoader, PdfLoader};
pub use normalizer::{normalize, normalize_opt};
pub use pipeline::IngestPipeline;
