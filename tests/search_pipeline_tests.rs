//! End-to-end tests for the retrieval pipeline: negation classification,
//! dual-path similarity search, and result-set reconciliation.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use shopsearch::{
    Category, DomainError, Embedding, EmbeddingService, InMemoryVectorRepository, MockEmbedding,
    NegationAnalysis, NegationClassifier, ProductDocument, ProductMatch, ProductMetadata,
    RuleBasedNegationClassifier, SearchProductsUseCase, SearchQuery, VectorRepository,
};

fn product(index: i64) -> ProductDocument {
    ProductDocument::new(
        format!("Title: Product {index}\nPrice: ${index}9.99\n"),
        ProductMetadata::new(format!("Product {index}"), index)
            .with_product_url(format!("https://example.com/p/{index}")),
    )
}

/// Classifier returning a fixed analysis, counting invocations.
struct FixedClassifier {
    analysis: Result<NegationAnalysis, String>,
    calls: AtomicUsize,
}

impl FixedClassifier {
    fn not_negated() -> Self {
        Self {
            analysis: Ok(NegationAnalysis::not_negated()),
            calls: AtomicUsize::new(0),
        }
    }

    fn negated(clause: &str, positive: &str) -> Self {
        Self {
            analysis: Ok(NegationAnalysis::negated(clause, positive)),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(msg: &str) -> Self {
        Self {
            analysis: Err(msg.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NegationClassifier for FixedClassifier {
    async fn classify(&self, _query: &str) -> Result<NegationAnalysis, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.analysis
            .clone()
            .map_err(DomainError::classification_failed)
    }
}

/// Vector repository scripted by query text. Records every `SearchQuery` it
/// receives so tests can assert K values and candidate filters.
struct ScriptedRepo {
    responses: Vec<(String, Result<Vec<i64>, String>)>,
    seen: Mutex<Vec<SearchQuery>>,
}

impl ScriptedRepo {
    fn new(responses: Vec<(&str, Result<Vec<i64>, &str>)>) -> Self {
        Self {
            responses: responses
                .into_iter()
                .map(|(q, r)| (q.to_string(), r.map_err(String::from)))
                .collect(),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn seen_queries(&self) -> Vec<SearchQuery> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl VectorRepository for ScriptedRepo {
    async fn save_batch(
        &self,
        _documents: &[ProductDocument],
        _embeddings: &[Embedding],
    ) -> Result<(), DomainError> {
        unimplemented!("not used by search tests")
    }

    async fn search(
        &self,
        _query_embedding: &[f32],
        query: &SearchQuery,
    ) -> Result<Vec<ProductMatch>, DomainError> {
        self.seen.lock().unwrap().push(query.clone());

        let (_, response) = self
            .responses
            .iter()
            .find(|(text, _)| text == query.query())
            .unwrap_or_else(|| panic!("unexpected search query: {}", query.query()));

        match response {
            Ok(indices) => Ok(indices
                .iter()
                .enumerate()
                .map(|(rank, &index)| {
                    ProductMatch::new(product(index), 1.0 - rank as f32 * 0.01)
                })
                .collect()),
            Err(msg) => Err(DomainError::search_unavailable(msg.clone())),
        }
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(0)
    }
}

fn use_case(
    repo: Arc<dyn VectorRepository>,
    classifier: Arc<dyn NegationClassifier>,
) -> SearchProductsUseCase {
    SearchProductsUseCase::new(repo, Arc::new(MockEmbedding::new()), classifier)
}

#[tokio::test]
async fn direct_query_issues_one_search_with_k_five() {
    let repo = Arc::new(ScriptedRepo::new(vec![(
        "luggage wheels",
        Ok(vec![1, 2, 3, 4, 5]),
    )]));
    let search = use_case(repo.clone(), Arc::new(FixedClassifier::not_negated()));

    let results = search.execute("luggage wheels", None).await.unwrap();

    assert_eq!(results.len(), 5);
    assert_eq!(results[0].link(), Some("https://example.com/p/1"));

    let seen = repo.seen_queries();
    assert_eq!(seen.len(), 1, "direct path must issue exactly one search");
    assert_eq!(seen[0].limit(), 5);
    assert!(seen[0].candidates().is_none());
}

#[tokio::test]
async fn negated_query_subtracts_exclusion_candidates_in_broad_order() {
    let repo = Arc::new(ScriptedRepo::new(vec![
        ("jacket", Ok((1..=10).collect())),
        ("waterproof", Ok(vec![3, 7])),
    ]));
    let classifier = Arc::new(FixedClassifier::negated("waterproof", "jacket"));
    let search = use_case(repo.clone(), classifier);

    let results = search.execute("non-waterproof jacket", None).await.unwrap();

    let links: Vec<&str> = results.iter().filter_map(|r| r.link()).collect();
    let expected: Vec<String> = [1, 2, 4, 5, 6, 8, 9, 10]
        .iter()
        .map(|i| format!("https://example.com/p/{i}"))
        .collect();
    assert_eq!(links, expected, "broad order preserved, excluded dropped");

    let seen = repo.seen_queries();
    assert_eq!(seen.len(), 2);

    // Broad search: positive query, K=10, unfiltered.
    assert_eq!(seen[0].query(), "jacket");
    assert_eq!(seen[0].limit(), 10);
    assert!(seen[0].candidates().is_none());

    // Exclusion search: negated clause, K=5, restricted to the candidate pool.
    assert_eq!(seen[1].query(), "waterproof");
    assert_eq!(seen[1].limit(), 5);
    let pool: HashSet<i64> = (1..=10).collect();
    assert_eq!(seen[1].candidates(), Some(&pool));
}

#[tokio::test]
async fn broad_search_failure_aborts_with_search_unavailable() {
    let repo = Arc::new(ScriptedRepo::new(vec![(
        "jacket",
        Err("connection refused"),
    )]));
    let classifier = Arc::new(FixedClassifier::negated("waterproof", "jacket"));
    let search = use_case(repo.clone(), classifier);

    let err = search
        .execute("non-waterproof jacket", None)
        .await
        .unwrap_err();

    assert!(err.is_search_unavailable());
    assert_eq!(
        repo.seen_queries().len(),
        1,
        "no exclusion search after a failed broad search"
    );
}

#[tokio::test]
async fn empty_query_is_rejected_before_any_external_call() {
    let repo = Arc::new(ScriptedRepo::new(vec![]));
    let classifier = Arc::new(FixedClassifier::not_negated());
    let search = use_case(repo.clone(), classifier.clone());

    for query in ["", "   ", "\n"] {
        let err = search.execute(query, None).await.unwrap_err();
        assert!(err.is_invalid_query());
    }

    assert_eq!(classifier.call_count(), 0);
    assert!(repo.seen_queries().is_empty());
}

#[tokio::test]
async fn classification_failure_aborts_the_search() {
    let repo = Arc::new(ScriptedRepo::new(vec![]));
    let classifier = Arc::new(FixedClassifier::failing("model timeout"));
    let search = use_case(repo.clone(), classifier);

    let err = search.execute("not waterproof", None).await.unwrap_err();

    assert!(err.is_classification_failed());
    assert!(
        repo.seen_queries().is_empty(),
        "no similarity search after failed classification"
    );
}

#[tokio::test]
async fn category_is_accepted_but_does_not_constrain_results() {
    let repo = Arc::new(ScriptedRepo::new(vec![(
        "carry-on suitcase",
        Ok(vec![1, 2, 3]),
    )]));
    let search = use_case(repo.clone(), Arc::new(FixedClassifier::not_negated()));

    let with_category = search
        .execute("carry-on suitcase", Some(Category::SUITCASES))
        .await
        .unwrap();
    let without_category = search.execute("carry-on suitcase", None).await.unwrap();

    let links = |results: &[shopsearch::SearchResult]| -> Vec<String> {
        results
            .iter()
            .filter_map(|r| r.link().map(String::from))
            .collect()
    };
    assert_eq!(links(&with_category), links(&without_category));

    // Carried through for logging, never used as a filter.
    let seen = repo.seen_queries();
    assert_eq!(seen[0].category(), Some(Category::SUITCASES));
    assert!(seen[0].candidates().is_none());
}

#[tokio::test]
async fn repeated_searches_return_identical_ordered_results() {
    let repo = Arc::new(ScriptedRepo::new(vec![(
        "luggage wheels",
        Ok(vec![4, 2, 9]),
    )]));
    let search = use_case(repo, Arc::new(FixedClassifier::not_negated()));

    let first = search.execute("luggage wheels", None).await.unwrap();
    let second = search.execute("luggage wheels", None).await.unwrap();

    let links = |results: &[shopsearch::SearchResult]| -> Vec<String> {
        results
            .iter()
            .filter_map(|r| r.link().map(String::from))
            .collect()
    };
    assert_eq!(links(&first), links(&second));
}

/// Full offline stack: in-memory store, deterministic embeddings, rule-based
/// classification.
#[tokio::test]
async fn offline_stack_end_to_end() {
    let repo = Arc::new(InMemoryVectorRepository::new());
    let embedding_service = Arc::new(MockEmbedding::new());

    let documents: Vec<ProductDocument> = (0..20).map(product).collect();
    let texts: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
    let embeddings = embedding_service.embed_documents(&texts).await.unwrap();
    repo.save_batch(&documents, &embeddings).await.unwrap();

    let search = SearchProductsUseCase::new(
        repo,
        embedding_service,
        Arc::new(RuleBasedNegationClassifier::new()),
    );

    // Direct path: bounded by K=5.
    let direct = search.execute("travel suitcase", None).await.unwrap();
    assert!(direct.len() <= 5);
    assert!(!direct.is_empty());

    // Negated path: bounded by the broad K=10, and deterministic.
    let negated = search
        .execute("running shoes without laces", None)
        .await
        .unwrap();
    assert!(negated.len() <= 10);

    let repeat = search
        .execute("running shoes without laces", None)
        .await
        .unwrap();
    let links = |results: &[shopsearch::SearchResult]| -> Vec<String> {
        results
            .iter()
            .filter_map(|r| r.link().map(String::from))
            .collect()
    };
    assert_eq!(links(&negated), links(&repeat));
}
