//! Persisted index storage.
//!
//! This module writes a [`VectorIndex`] to a persist directory and
//! reads it back, checking that the pieces agree with each other.

use crate::core::config::EmbeddingConfig;
use crate::core::error::{FolioError, Result};
use crate::core::storage::vector::VectorIndex;
use crate::core::types::TextNode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Current on-disk layout version
pub const SCHEMA_VERSION: u32 = 1;

const DOCSTORE_FILE: &str = "docstore.json";
const VECTOR_STORE_FILE: &str = "vector_store.json";
const METADATA_FILE: &str = "index_meta.json";

/// Index metadata (Schema v1)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMetadata {
    /// Document the index was built from
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub chunk_size: usize,
    pub overlap: usize,
    pub pages: usize,
    pub node_count: usize,
    /// Embedding settings; queries must use the same model
    pub embedding: EmbeddingConfig,
    pub schema_version: u32,
}

#[derive(Serialize, Deserialize)]
struct DocStore {
    nodes: Vec<TextNode>,
}

#[derive(Serialize, Deserialize)]
struct VectorStore {
    dimensions: usize,
    embeddings: BTreeMap<String, Vec<f32>>,
}

/// Storage for one persisted index
///
/// ```text
/// {persist_dir}/
/// ├── docstore.json       # nodes: text + metadata, in chunk order
/// ├── vector_store.json   # node id -> embedding
/// └── index_meta.json     # build parameters and embedding settings
/// ```
#[derive(Debug, Clone)]
pub struct IndexStore {
    persist_dir: PathBuf,
}

impl IndexStore {
    /// Create a store rooted at `persist_dir`
    pub fn new(persist_dir: impl Into<PathBuf>) -> Self {
        Self {
            persist_dir: persist_dir.into(),
        }
    }

    pub fn persist_dir(&self) -> &Path {
        &self.persist_dir
    }

    fn metadata_path(&self) -> PathBuf {
        self.persist_dir.join(METADATA_FILE)
    }

    /// Check if an index has been persisted here
    pub fn exists(&self) -> bool {
        self.metadata_path().exists()
    }

    /// Write the index, replacing any previous one
    pub fn persist(&self, index: &VectorIndex, metadata: &IndexMetadata) -> Result<()> {
        if metadata.node_count != index.len() {
            return Err(FolioError::StorageError(format!(
                "metadata reports {} nodes, index holds {}",
                metadata.node_count,
                index.len()
            )));
        }

        fs::create_dir_all(&self.persist_dir)?;

        let docstore = DocStore {
            nodes: index.nodes().to_vec(),
        };
        let vector_store = VectorStore {
            dimensions: index.dimensions(),
            embeddings: index
                .nodes()
                .iter()
                .zip(index.embeddings())
                .map(|(node, embedding)| (node.id.clone(), embedding.clone()))
                .collect(),
        };

        if vector_store.embeddings.len() != index.len() {
            return Err(FolioError::StorageError(
                "node ids must be unique within an index".to_string(),
            ));
        }

        // Metadata marks a complete index: drop it before touching the
        // data files and write it again last
        match fs::remove_file(self.metadata_path()) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        self.write_json(DOCSTORE_FILE, &docstore)?;
        self.write_json(VECTOR_STORE_FILE, &vector_store)?;
        self.write_json(METADATA_FILE, metadata)?;

        tracing::info!(
            "Persisted {} nodes to {:?}",
            metadata.node_count,
            self.persist_dir
        );
        Ok(())
    }

    /// Read index metadata
    pub fn metadata(&self) -> Result<IndexMetadata> {
        if !self.exists() {
            return Err(FolioError::IndexNotFound(self.persist_dir.clone()));
        }

        let contents = fs::read_to_string(self.metadata_path())?;
        let metadata: IndexMetadata = serde_json::from_str(&contents)?;
        Ok(metadata)
    }

    /// Load and validate the persisted index
    pub fn load(&self) -> Result<(VectorIndex, IndexMetadata)> {
        let metadata = self.metadata()?;

        if metadata.schema_version != SCHEMA_VERSION {
            return Err(FolioError::InvalidIndex(format!(
                "index in {:?} uses schema version {} (current: v{}). Rebuild it with 'folio build-index'.",
                self.persist_dir, metadata.schema_version, SCHEMA_VERSION
            )));
        }

        let docstore: DocStore = self.read_json(DOCSTORE_FILE)?;
        let mut vector_store: VectorStore = self.read_json(VECTOR_STORE_FILE)?;

        if docstore.nodes.len() != metadata.node_count
            || vector_store.embeddings.len() != metadata.node_count
        {
            return Err(FolioError::InvalidIndex(format!(
                "inconsistent index: metadata={} nodes, docstore={}, vector store={}",
                metadata.node_count,
                docstore.nodes.len(),
                vector_store.embeddings.len()
            )));
        }

        // The HNSW graph is rebuilt from the stored vectors in node order
        let mut index =
            VectorIndex::with_capacity(vector_store.dimensions, metadata.node_count);
        for node in docstore.nodes {
            let embedding = vector_store.embeddings.remove(&node.id).ok_or_else(|| {
                FolioError::InvalidIndex(format!("node '{}' has no embedding", node.id))
            })?;
            index
                .insert(node, embedding)
                .map_err(|e| FolioError::InvalidIndex(e.to_string()))?;
        }

        tracing::debug!("Loaded {} nodes from {:?}", index.len(), self.persist_dir);
        Ok((index, metadata))
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(self.persist_dir.join(name), json)?;
        Ok(())
    }

    fn read_json<T: for<'de> Deserialize<'de>>(&self, name: &str) -> Result<T> {
        let path = self.persist_dir.join(name);
        let contents = fs::read_to_string(&path).map_err(|e| {
            FolioError::InvalidIndex(format!("failed to read {}: {e}", path.display()))
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Total size in bytes of the persisted files
    pub fn size_bytes(&self) -> u64 {
        [DOCSTORE_FILE, VECTOR_STORE_FILE, METADATA_FILE]
            .iter()
            .filter_map(|name| fs::metadata(self.persist_dir.join(name)).ok())
            .map(|m| m.len())
            .sum()
    }
}
