//! Index build: chunk records to a persisted vector index.

pub mod builder;

pub use builder::{build_index_from_pdf, to_nodes, IndexBuilder};
