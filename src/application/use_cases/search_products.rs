use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::application::{EmbeddingService, NegationClassifier, VectorRepository};
use crate::domain::{Category, DomainError, ProductMatch, SearchQuery, SearchResult};

/// Results returned for a direct (non-negated) search.
const DIRECT_K: usize = 5;
/// Candidate pool size for the broad search of the negated path.
const BROAD_K: usize = 10;
/// Exclusion candidates ranked against the negated attribute.
const EXCLUDE_K: usize = 5;

/// The retrieval orchestrator: classifies the query, runs one or two
/// similarity searches, and reconciles the result set.
///
/// Vector similarity has no native boolean negation, so a negated query is
/// approximated: a broad search on the rewritten positive query yields a
/// candidate pool, a second search ranks that pool's similarity to the
/// negated attribute, and the top matches to the forbidden attribute are
/// subtracted from the pool. The subtraction compares document identity
/// (the `index` metadata key), never content. This is a heuristic: when K is
/// small relative to the catalog, or the negated attribute is weakly
/// represented in the embedding space, false positives and negatives are
/// expected and tolerated.
pub struct SearchProductsUseCase {
    vector_repo: Arc<dyn VectorRepository>,
    embedding_service: Arc<dyn EmbeddingService>,
    classifier: Arc<dyn NegationClassifier>,
}

impl SearchProductsUseCase {
    pub fn new(
        vector_repo: Arc<dyn VectorRepository>,
        embedding_service: Arc<dyn EmbeddingService>,
        classifier: Arc<dyn NegationClassifier>,
    ) -> Self {
        Self {
            vector_repo,
            embedding_service,
            classifier,
        }
    }

    /// Search the catalog for `query`, returning at most 5 results on the
    /// direct path and at most 10 on the negated path.
    ///
    /// `category` is accepted for forward compatibility but does not
    /// constrain either search path.
    pub async fn execute(
        &self,
        query: &str,
        category: Option<Category>,
    ) -> Result<Vec<SearchResult>, DomainError> {
        if query.trim().is_empty() {
            return Err(DomainError::invalid_query("query text is empty"));
        }

        let start_time = Instant::now();

        let analysis = self.classifier.classify(query).await?;

        let results = if !analysis.is_negated() {
            info!("Direct search: {}", query);
            let matches = self.similarity_search(query, DIRECT_K, None, category).await?;
            matches
                .iter()
                .map(|m| SearchResult::from_document(m.document()))
                .collect::<Vec<_>>()
        } else {
            info!(
                "Negated search: \"{}\" minus \"{}\"",
                analysis.positive_query(),
                analysis.negated_clause()
            );
            self.negated_search(
                analysis.positive_query(),
                analysis.negated_clause(),
                category,
            )
            .await?
        };

        let duration = start_time.elapsed();
        info!(
            "Found {} results in {:.2}s",
            results.len(),
            duration.as_secs_f64()
        );
        for (i, result) in results.iter().enumerate() {
            info!("Result #{} link: {:?}", i + 1, result.link());
        }

        Ok(results)
    }

    /// Broad / exclude / subtract. The broad search on the positive query
    /// collects the candidate pool; the exclusion search ranks the pool
    /// against the negated attribute; survivors keep their broad-search
    /// order.
    async fn negated_search(
        &self,
        positive_query: &str,
        negated_clause: &str,
        category: Option<Category>,
    ) -> Result<Vec<SearchResult>, DomainError> {
        let broad = self
            .similarity_search(positive_query, BROAD_K, None, category)
            .await?;

        let candidate_pool: HashSet<i64> = broad.iter().map(|m| m.index()).collect();
        debug!("Candidate pool: {} documents", candidate_pool.len());

        let excluded = self
            .similarity_search(
                negated_clause,
                EXCLUDE_K,
                Some(candidate_pool),
                category,
            )
            .await?;

        for m in &excluded {
            debug!("Excluding: {}", m.document().title());
        }

        let excluded_indices: HashSet<i64> = excluded.iter().map(|m| m.index()).collect();

        Ok(broad
            .iter()
            .filter(|m| !excluded_indices.contains(&m.index()))
            .map(|m| SearchResult::from_document(m.document()))
            .collect())
    }

    async fn similarity_search(
        &self,
        text: &str,
        k: usize,
        candidates: Option<HashSet<i64>>,
        category: Option<Category>,
    ) -> Result<Vec<ProductMatch>, DomainError> {
        let mut search_query = SearchQuery::new(text).with_limit(k);
        if let Some(set) = candidates {
            search_query = search_query.with_candidates(set);
        }
        if let Some(cat) = category {
            search_query = search_query.with_category(cat);
        }

        let embedding = self.embedding_service.embed_query(text).await?;
        self.vector_repo.search(&embedding, &search_query).await
    }
}
