//! Unified service container for Folio
//!
//! Provides shared access to all core services.

use crate::core::config::{Config, EmbeddingConfig, EmbeddingProvider};
use crate::core::error::Result;
use crate::core::ingest::{DocumentLoader, IngestPipeline, PdfLoader};
use crate::core::search::SearchService;
use crate::core::storage::IndexStore;
use std::path::Path;
use std::sync::Arc;

/// Unified services container
#[derive(Clone)]
pub struct Services {
    /// Search service for vector queries
    pub search: Arc<SearchService>,

    /// Application configuration
    pub config: Arc<Config>,

    /// Source of page text for ingest and index builds
    pub loader: Arc<dyn DocumentLoader>,
}

impl Services {
    /// Create services from configuration, reading PDFs
    pub fn new(config: Config) -> Self {
        Self::with_loader(config, Arc::new(PdfLoader::new()))
    }

    /// Create services with a custom document loader
    pub fn with_loader(config: Config, loader: Arc<dyn DocumentLoader>) -> Self {
        let search = Arc::new(SearchService::new(
            config.search.default_k,
            config.search.max_k,
        ));

        Self {
            search,
            config: Arc::new(config),
            loader,
        }
    }

    /// Create an IngestPipeline using the shared loader
    ///
    /// Pipelines are created per-request since chunk parameters can be
    /// overridden on the command line. Values are signed so negative
    /// input reaches the chunker and is rejected there.
    pub fn create_pipeline(&self, chunk_size: i64, overlap: i64) -> Result<IngestPipeline> {
        IngestPipeline::new(Arc::clone(&self.loader), chunk_size, overlap)
    }

    /// Store for the given persist directory, or the configured default
    pub fn store(&self, persist_dir: Option<&Path>) -> IndexStore {
        match persist_dir {
            Some(dir) => IndexStore::new(dir),
            None => IndexStore::new(self.config.storage.persist_dir.clone()),
        }
    }

    /// Embedding settings with optional per-request overrides
    ///
    /// Switching to the hashing provider keeps the configured dimensions
    /// and batch size. Hashing always reports its own model name.
    pub fn embedding_config(
        &self,
        provider: Option<EmbeddingProvider>,
        model: Option<&str>,
    ) -> EmbeddingConfig {
        let mut config = self.config.embedding.clone();

        if let Some(provider) = provider {
            if provider != config.provider && provider == EmbeddingProvider::Hashing {
                config = EmbeddingConfig {
                    batch_size: config.batch_size,
                    ..EmbeddingConfig::hashing(config.dimensions)
                };
            }
            config.provider = provider;
        }

        if let Some(model) = model {
            config.model = model.to_string();
        }
        config.pin_hashing_model();

        config
    }
}
