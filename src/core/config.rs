//! Configuration management for Folio.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.
//!
//! The embedding provider is part of this value and is handed to the
//! embedder factory explicitly; nothing is stored in process-wide
//! mutable state.

use crate::core::error::{FolioError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub indexing: IndexingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Chunking configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexingConfig {
    /// Characters per chunk (not bytes!)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Character overlap between consecutive chunks on a page
    #[serde(default = "default_overlap")]
    pub overlap: usize,

    /// Chunks printed by `folio ingest`
    #[serde(default = "default_preview")]
    pub preview: usize,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory the vector index is persisted to
    #[serde(default = "default_persist_dir")]
    pub persist_dir: PathBuf,

    /// Directory searched for a PDF when no path is given
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// Embedding backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// OpenAI-compatible `/v1/embeddings` endpoint
    OpenAi,
    /// Deterministic local feature hashing (no network)
    Hashing,
}

impl EmbeddingProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbeddingProvider::OpenAi => "openai",
            EmbeddingProvider::Hashing => "hashing",
        }
    }

    /// Whether this provider needs an API key
    pub fn requires_credential(&self) -> bool {
        matches!(self, EmbeddingProvider::OpenAi)
    }
}

impl fmt::Display for EmbeddingProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmbeddingProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(EmbeddingProvider::OpenAi),
            "hashing" => Ok(EmbeddingProvider::Hashing),
            other => Err(format!(
                "unknown embedding provider '{other}' (expected 'openai' or 'hashing')"
            )),
        }
    }
}

/// Model name reported by the hashing embedder
pub const HASHING_MODEL: &str = "feature-hashing";

/// Embedding configuration
///
/// Persisted alongside every index so queries are embedded with the
/// model the index was built with. The API key itself is never part
/// of this struct; only the name of the variable holding it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmbeddingConfig {
    #[serde(default = "default_provider")]
    pub provider: EmbeddingProvider,

    #[serde(default = "default_model")]
    pub model: String,

    /// Output vector length
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Texts sent per embedding request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Default number of results to return
    #[serde(default = "default_k")]
    pub default_k: usize,

    /// Maximum results per query
    #[serde(default = "default_max_k")]
    pub max_k: usize,
}

// Default value functions
fn default_chunk_size() -> usize {
    800
}

fn default_overlap() -> usize {
    120
}

fn default_preview() -> usize {
    1
}

fn default_persist_dir() -> PathBuf {
    PathBuf::from("./storage")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_provider() -> EmbeddingProvider {
    EmbeddingProvider::OpenAi
}

fn default_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_dimensions() -> usize {
    1536
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_batch_size() -> usize {
    64
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_k() -> usize {
    4
}

fn default_max_k() -> usize {
    50
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            overlap: default_overlap(),
            preview: default_preview(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            persist_dir: default_persist_dir(),
            data_dir: default_data_dir(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            dimensions: default_dimensions(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            batch_size: default_batch_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EmbeddingConfig {
    /// Offline configuration using the hashing embedder
    pub fn hashing(dimensions: usize) -> Self {
        Self {
            provider: EmbeddingProvider::Hashing,
            model: HASHING_MODEL.to_string(),
            dimensions,
            ..Self::default()
        }
    }

    /// The hashing provider has a single model; replace whatever name
    /// was configured with it.
    pub fn pin_hashing_model(&mut self) {
        if self.provider == EmbeddingProvider::Hashing {
            self.model = HASHING_MODEL.to_string();
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_k: default_k(),
            max_k: default_max_k(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| FolioError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// This method uses XDG Base Directory specification for file locations.
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. FOLIO_CONFIG env var
    /// 2. XDG config file (~/.config/folio/config.toml)
    /// 3. ./folio.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("FOLIO_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("folio.toml").exists() {
                Self::from_file("folio.toml")?
            } else {
                Self::default()
            }
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Indexing configuration
        if let Ok(chunk_size) = env::var("FOLIO_CHUNK_SIZE") {
            if let Ok(size) = chunk_size.parse() {
                self.indexing.chunk_size = size;
            }
        }
        if let Ok(overlap) = env::var("FOLIO_OVERLAP") {
            if let Ok(o) = overlap.parse() {
                self.indexing.overlap = o;
            }
        }

        // Storage configuration
        if let Ok(dir) = env::var("FOLIO_PERSIST_DIR") {
            self.storage.persist_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("FOLIO_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }

        // Embedding configuration
        if let Ok(provider) = env::var("FOLIO_EMBEDDING_PROVIDER") {
            if let Ok(p) = provider.parse() {
                self.embedding.provider = p;
            }
        }
        if let Ok(model) = env::var("FOLIO_EMBEDDING_MODEL") {
            self.embedding.model = model;
        }
        if let Ok(dims) = env::var("FOLIO_EMBEDDING_DIMENSIONS") {
            if let Ok(d) = dims.parse() {
                self.embedding.dimensions = d;
            }
        }
        if let Ok(url) = env::var("FOLIO_EMBEDDING_BASE_URL") {
            self.embedding.base_url = url;
        }
        if let Ok(batch) = env::var("FOLIO_EMBEDDING_BATCH_SIZE") {
            if let Ok(b) = batch.parse() {
                self.embedding.batch_size = b;
            }
        }
        self.embedding.pin_hashing_model();

        // Search configuration
        if let Ok(default_k) = env::var("FOLIO_DEFAULT_K") {
            if let Ok(k) = default_k.parse() {
                self.search.default_k = k;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.indexing.chunk_size == 0 {
            return Err(FolioError::ConfigError(
                "Chunk size must be non-zero".to_string(),
            ));
        }

        if self.indexing.overlap >= self.indexing.chunk_size {
            return Err(FolioError::ConfigError(
                "Overlap must be less than chunk size".to_string(),
            ));
        }

        if self.embedding.dimensions == 0 {
            return Err(FolioError::ConfigError(
                "Embedding dimensions must be non-zero".to_string(),
            ));
        }

        if self.embedding.batch_size == 0 {
            return Err(FolioError::ConfigError(
                "Embedding batch size must be non-zero".to_string(),
            ));
        }

        if self.embedding.model.trim().is_empty() {
            return Err(FolioError::ConfigError(
                "Embedding model must be set".to_string(),
            ));
        }

        if self.search.default_k == 0 {
            return Err(FolioError::ConfigError(
                "Default k must be non-zero".to_string(),
            ));
        }

        if self.search.default_k > self.search.max_k {
            return Err(FolioError::ConfigError(
                "Default k cannot exceed max k".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration (the API key is never part of the config)
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Chunk size: {} chars", self.indexing.chunk_size);
        tracing::info!("  Overlap: {} chars", self.indexing.overlap);
        tracing::info!("  Persist dir: {:?}", self.storage.persist_dir);
        tracing::info!("  Data dir: {:?}", self.storage.data_dir);
        tracing::info!(
            "  Embedding: {} / {} ({} dims)",
            self.embedding.provider,
            self.embedding.model,
            self.embedding.dimensions
        );
        tracing::info!("  Embedding batch size: {}", self.embedding.batch_size);
        tracing::info!("  Default k: {}", self.search.default_k);
        tracing::info!("  Max k: {}", self.search.max_k);
    }
}
