//! Embedding backends.
//!
//! The provider is selected from an explicit [`EmbeddingConfig`]
//! handed to [`create_embedder`]; two builds in the same process can
//! use different providers without touching shared state.

mod hashing;
mod openai;
mod traits;

pub use hashing::HashingEmbedder;
pub use openai::OpenAiEmbedder;
pub use traits::Embedder;

use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::core::config::{EmbeddingConfig, EmbeddingProvider};
use crate::core::error::{FolioError, Result};

/// Read the API key named by `config.api_key_env`.
///
/// Fails with `MissingCredential` when the variable is unset or blank.
pub fn resolve_api_key(config: &EmbeddingConfig) -> Result<String> {
    match env::var(&config.api_key_env) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(FolioError::MissingCredential(format!(
            "{} is not set. Export it before building an index, e.g. export {}='sk-...'",
            config.api_key_env, config.api_key_env
        ))),
    }
}

/// Check that the provider's credential is available without building it
pub fn check_credentials(config: &EmbeddingConfig) -> Result<()> {
    if config.provider.requires_credential() {
        resolve_api_key(config)?;
    }
    Ok(())
}

/// Build the embedder described by `config`
pub fn create_embedder(config: &EmbeddingConfig) -> Result<Arc<dyn Embedder>> {
    let embedder: Arc<dyn Embedder> = match config.provider {
        EmbeddingProvider::OpenAi => {
            let api_key = resolve_api_key(config)?;
            Arc::new(OpenAiEmbedder::new(
                api_key,
                config.model.clone(),
                Some(config.base_url.clone()),
                config.dimensions,
                Duration::from_secs(config.timeout_secs),
            ))
        }
        EmbeddingProvider::Hashing => Arc::new(HashingEmbedder::new(config.dimensions)?),
    };

    tracing::debug!(
        "Created {} embedder (model={}, dims={})",
        config.provider,
        embedder.model(),
        embedder.dimensions()
    );

    Ok(embedder)
}
