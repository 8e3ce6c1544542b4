use async_trait::async_trait;

use crate::domain::{DomainError, Embedding, ProductDocument, ProductMatch, SearchQuery};

/// Vector storage and similarity search over product documents.
#[async_trait]
pub trait VectorRepository: Send + Sync {
    async fn save_batch(
        &self,
        documents: &[ProductDocument],
        embeddings: &[Embedding],
    ) -> Result<(), DomainError>;

    /// Return the `query.limit()` nearest documents by cosine similarity,
    /// ordered by descending score. When `query.candidates()` is present only
    /// documents whose `index` metadata is in that set are eligible.
    ///
    /// Tie order between equal-similarity documents is defined by the
    /// underlying index implementation and may differ between backends.
    ///
    /// Index or connection errors surface as
    /// [`DomainError::SearchUnavailable`].
    async fn search(
        &self,
        query_embedding: &[f32],
        query: &SearchQuery,
    ) -> Result<Vec<ProductMatch>, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}
