use async_trait::async_trait;

use crate::domain::{DomainError, Embedding, EmbeddingConfig};

/// Generates fixed-length vector embeddings from text.
///
/// Embedding degrades rather than erroring: a failing text yields a zero
/// vector of the native dimension. In a batch the substitute is flagged on
/// the [`Embedding`] so ingestion never aborts on one bad input; a degraded
/// query vector leaves the search non-discriminative but still answered.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    async fn embed_query(&self, query: &str) -> Result<Vec<f32>, DomainError>;

    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Embedding>, DomainError>;

    fn config(&self) -> &EmbeddingConfig;
}
