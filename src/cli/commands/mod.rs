//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a specific CLI command.

pub mod build_index;
pub mod completions;
pub mod config;
pub mod info;
pub mod ingest;
pub mod search;

// Re-export argument types for use in mod.rs
pub use build_index::BuildIndexArgs;
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use info::InfoArgs;
pub use ingest::IngestArgs;
pub use search::SearchArgs;

use crate::core::services::Services;

/// Command-line value if given, otherwise the configured default.
///
/// Signed so that negative command-line input reaches the chunker.
pub(crate) fn chunk_param(arg: Option<i64>, configured: usize) -> i64 {
    arg.unwrap_or_else(|| i64::try_from(configured).unwrap_or(i64::MAX))
}

/// Chunk size and overlap from the arguments or configuration
pub(crate) fn chunk_params(
    services: &Services,
    chunk_size: Option<i64>,
    overlap: Option<i64>,
) -> (i64, i64) {
    let indexing = &services.config.indexing;
    (
        chunk_param(chunk_size, indexing.chunk_size),
        chunk_param(overlap, indexing.overlap),
    )
}
