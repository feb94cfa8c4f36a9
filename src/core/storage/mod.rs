//! Storage layer for vector indexes.
//!
//! - **VectorIndex**: nodes + embeddings behind an HNSW graph (cosine)
//! - **IndexStore**: persists an index to a directory and loads it back
//! - **IndexMetadata**: build parameters and embedding settings

mod store;
mod vector;

pub use store::{IndexMetadata, IndexStore, SCHEMA_VERSION};
pub use vector::VectorIndex;
