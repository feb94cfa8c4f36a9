//! Vector search service.

use crate::core::embedding::{create_embedder, Embedder};
use crate::core::error::{FolioError, Result};
use crate::core::storage::IndexStore;
use crate::core::types::{SearchResponse, SearchResult};
use std::time::Instant;

/// Similarity search over a persisted index
#[derive(Debug, Clone)]
pub struct SearchService {
    default_k: usize,
    max_k: usize,
}

impl SearchService {
    /// Create a new search service
    pub fn new(default_k: usize, max_k: usize) -> Self {
        Self { default_k, max_k }
    }

    /// Resolve the result limit: default when absent, clamped to `[1, max_k]`
    pub fn effective_k(&self, k: Option<usize>) -> usize {
        k.unwrap_or(self.default_k).clamp(1, self.max_k.max(1))
    }

    /// Search using the embedding model the index was built with
    pub async fn search(
        &self,
        store: &IndexStore,
        query: &str,
        k: Option<usize>,
    ) -> Result<SearchResponse> {
        Self::validate_query(query)?;

        let metadata = store.metadata()?;
        let embedder = create_embedder(&metadata.embedding)?;

        self.search_with_embedder(store, query, k, embedder.as_ref())
            .await
    }

    /// Search with an explicit embedder
    pub async fn search_with_embedder(
        &self,
        store: &IndexStore,
        query: &str,
        k: Option<usize>,
        embedder: &dyn Embedder,
    ) -> Result<SearchResponse> {
        let start = Instant::now();
        Self::validate_query(query)?;

        let k = self.effective_k(k);
        let (index, _metadata) = store.load()?;

        if embedder.dimensions() != index.dimensions() {
            return Err(FolioError::InvalidIndex(format!(
                "index has {}-dimensional vectors but the embedder produces {}",
                index.dimensions(),
                embedder.dimensions()
            )));
        }

        let query_vector = embedder
            .embed_batch(&[query])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| FolioError::EmbeddingFailed("no embedding for query".to_string()))?;

        let results: Vec<SearchResult> = index
            .query(&query_vector, k)?
            .into_iter()
            .enumerate()
            .map(|(i, (score, node))| SearchResult {
                rank: i + 1,
                score,
                text: node.text.clone(),
                page: node.metadata.page,
                chunk_id: node.metadata.chunk_id.clone(),
                source: node.metadata.source.clone(),
            })
            .collect();

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(
            "Query {:?} returned {} results in {}ms",
            query,
            results.len(),
            duration_ms
        );

        Ok(SearchResponse {
            query: query.to_string(),
            count: results.len(),
            results,
            duration_ms,
        })
    }

    fn validate_query(query: &str) -> Result<()> {
        if query.trim().is_empty() {
            return Err(FolioError::InvalidQuery(
                "Query cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
