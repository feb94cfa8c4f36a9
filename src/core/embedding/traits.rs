use async_trait::async_trait;

use crate::core::error::Result;

/// Trait for embedding backends (OpenAI-compatible HTTP, local hashing)
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts, returning one vector per input text (in order).
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// The dimensionality of the output vectors.
    fn dimensions(&self) -> usize;

    /// Model name recorded in index metadata.
    fn model(&self) -> &str;
}
