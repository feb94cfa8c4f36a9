//! Core domain logic (interface-agnostic)
//!
//! This module contains all logic that is independent of the
//! command-line front end.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **ingest**: PDF loading, normalization and chunking
//! - **embedding**: Embedding backends
//! - **index**: Turning chunks into a persisted vector index
//! - **storage**: Vector index and on-disk store
//! - **search**: Similarity search over a persisted index
//! - **services**: Unified service container

pub mod config;
pub mod embedding;
pub mod error;
pub mod index;
pub mod ingest;
pub mod search;
pub mod services;
pub mod storage;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{FolioError, Result};
pub use services::Services;
