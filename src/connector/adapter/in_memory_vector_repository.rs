use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::VectorRepository;
use crate::domain::{DomainError, Embedding, ProductDocument, ProductMatch, SearchQuery};

/// In-memory vector store keyed by document `index`. Exhaustive cosine scan;
/// intended for tests and offline runs.
pub struct InMemoryVectorRepository {
    documents: Arc<Mutex<HashMap<i64, ProductDocument>>>,
    embeddings: Arc<Mutex<HashMap<i64, Embedding>>>,
}

impl InMemoryVectorRepository {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(Mutex::new(HashMap::new())),
            embeddings: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryVectorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorRepository for InMemoryVectorRepository {
    async fn save_batch(
        &self,
        documents: &[ProductDocument],
        embeddings: &[Embedding],
    ) -> Result<(), DomainError> {
        if documents.len() != embeddings.len() {
            return Err(DomainError::internal(
                "Document and embedding count mismatch",
            ));
        }

        let mut document_store = self.documents.lock().await;
        let mut embedding_store = self.embeddings.lock().await;

        for (document, embedding) in documents.iter().zip(embeddings.iter()) {
            document_store.insert(document.index(), document.clone());
            embedding_store.insert(document.index(), embedding.clone());
        }

        debug!("Saved {} documents to memory", documents.len());
        Ok(())
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        query: &SearchQuery,
    ) -> Result<Vec<ProductMatch>, DomainError> {
        let scored_indices: Vec<(i64, f32)> = {
            let embeddings = self.embeddings.lock().await;
            let mut scored: Vec<(i64, f32)> = embeddings
                .iter()
                .filter(|(index, _)| query.allows_index(**index))
                .map(|(index, embedding)| {
                    (*index, cosine_similarity(query_embedding, embedding.vector()))
                })
                .collect();

            scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
            scored
        };

        let document_store = self.documents.lock().await;
        let mut results = Vec::new();

        for (index, score) in scored_indices {
            if results.len() >= query.limit() {
                break;
            }

            if let Some(document) = document_store.get(&index) {
                results.push(ProductMatch::new(document.clone(), score));
            }
        }

        Ok(results)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let documents = self.documents.lock().await;
        Ok(documents.len() as u64)
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductMetadata;

    fn document(index: i64, content: &str) -> ProductDocument {
        ProductDocument::new(
            content.to_string(),
            ProductMetadata::new(format!("Product {index}"), index),
        )
    }

    fn unit(v: Vec<f32>) -> Embedding {
        Embedding::new(v, "mock-embedding")
    }

    async fn seeded_repo() -> InMemoryVectorRepository {
        let repo = InMemoryVectorRepository::new();
        let documents = vec![
            document(1, "Title: A\n"),
            document(2, "Title: B\n"),
            document(3, "Title: C\n"),
        ];
        let embeddings = vec![
            unit(vec![1.0, 0.0, 0.0]),
            unit(vec![0.9, 0.1, 0.0]),
            unit(vec![0.0, 0.0, 1.0]),
        ];
        repo.save_batch(&documents, &embeddings).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn search_orders_by_descending_similarity() {
        let repo = seeded_repo().await;
        let query = SearchQuery::new("a").with_limit(3);

        let matches = repo.search(&[1.0, 0.0, 0.0], &query).await.unwrap();

        let indices: Vec<i64> = matches.iter().map(|m| m.index()).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert!(matches[0].score() >= matches[1].score());
        assert!(matches[1].score() >= matches[2].score());
    }

    #[tokio::test]
    async fn search_respects_limit() {
        let repo = seeded_repo().await;
        let query = SearchQuery::new("a").with_limit(2);

        let matches = repo.search(&[1.0, 0.0, 0.0], &query).await.unwrap();
        assert_eq!(matches.len(), 2);
    }

    #[tokio::test]
    async fn candidate_filter_restricts_eligible_documents() {
        let repo = seeded_repo().await;
        let query = SearchQuery::new("a")
            .with_limit(3)
            .with_candidates([2, 3].into());

        let matches = repo.search(&[1.0, 0.0, 0.0], &query).await.unwrap();

        let indices: Vec<i64> = matches.iter().map(|m| m.index()).collect();
        assert_eq!(indices, vec![2, 3]);
    }

    #[tokio::test]
    async fn mismatched_batch_is_rejected() {
        let repo = InMemoryVectorRepository::new();
        let documents = vec![document(1, "x")];

        let result = repo.save_batch(&documents, &[]).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn count_reflects_saved_documents() {
        let repo = seeded_repo().await;
        assert_eq!(repo.count().await.unwrap(), 3);
    }
}
