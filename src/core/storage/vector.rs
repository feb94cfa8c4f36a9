//! In-memory vector index.
//!
//! Nodes and their embeddings are kept in insertion order (that is the
//! order the stores on disk use) and every embedding is also inserted
//! into an HNSW graph under cosine distance. The graph is not persisted;
//! [`IndexStore::load`](crate::core::storage::IndexStore::load) rebuilds
//! it from the vector store.

use std::fmt;

use anndists::dist::distances::DistCosine;
use hnsw_rs::hnsw::Hnsw;

use crate::core::error::{FolioError, Result};
use crate::core::types::TextNode;

/// Max connections per node per layer
const HNSW_M: usize = 16;
const HNSW_MAX_LAYER: usize = 16;
const HNSW_EF_CONSTRUCTION: usize = 200;
const HNSW_EF_SEARCH: usize = 100;

/// Capacity hint used by [`VectorIndex::new`]
const DEFAULT_CAPACITY: usize = 10_000;

/// Nodes and their embeddings, searchable by cosine similarity
pub struct VectorIndex {
    dimensions: usize,
    nodes: Vec<TextNode>,
    embeddings: Vec<Vec<f32>>,
    /// Graph ids are positions in `nodes`
    graph: Hnsw<'static, f32, DistCosine>,
}

impl VectorIndex {
    pub fn new(dimensions: usize) -> Self {
        Self::with_capacity(dimensions, DEFAULT_CAPACITY)
    }

    /// Create an index sized for roughly `capacity` nodes
    pub fn with_capacity(dimensions: usize, capacity: usize) -> Self {
        let graph = Hnsw::new(
            HNSW_M,
            capacity.max(1),
            HNSW_MAX_LAYER,
            HNSW_EF_CONSTRUCTION,
            DistCosine {},
        );

        Self {
            dimensions,
            nodes: Vec::with_capacity(capacity),
            embeddings: Vec::with_capacity(capacity),
            graph,
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[TextNode] {
        &self.nodes
    }

    pub fn embeddings(&self) -> &[Vec<f32>] {
        &self.embeddings
    }

    /// Add a node with its embedding
    pub fn insert(&mut self, node: TextNode, embedding: Vec<f32>) -> Result<()> {
        self.check_dimensions(&embedding)?;

        let id = self.nodes.len();
        self.graph.insert((embedding.as_slice(), id));
        self.nodes.push(node);
        self.embeddings.push(embedding);
        Ok(())
    }

    /// Return the `k` most similar nodes, best first, scored by cosine
    /// similarity.
    ///
    /// Ties keep insertion order. `k` larger than the index returns
    /// every node.
    pub fn query(&self, vector: &[f32], k: usize) -> Result<Vec<(f32, &TextNode)>> {
        self.check_dimensions(vector)?;

        if k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }

        let k = k.min(self.len());
        let ef_search = HNSW_EF_SEARCH.max(k);

        let mut scored: Vec<(usize, f32)> = self
            .graph
            .search(vector, k, ef_search)
            .into_iter()
            .filter(|neighbour| neighbour.d_id < self.nodes.len())
            .map(|neighbour| (neighbour.d_id, 1.0 - neighbour.distance))
            .collect();

        scored.sort_by_key(|(id, _)| *id);
        // Stable sort keeps insertion order for equal scores
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        Ok(scored
            .into_iter()
            .map(|(id, score)| (score, &self.nodes[id]))
            .collect())
    }

    fn check_dimensions(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimensions {
            return Err(FolioError::InvalidParameter(format!(
                "vector has {} dimensions, index expects {}",
                vector.len(),
                self.dimensions
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for VectorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorIndex")
            .field("dimensions", &self.dimensions)
            .field("len", &self.nodes.len())
            .finish_non_exhaustive()
    }
}
