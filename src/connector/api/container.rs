use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use crate::application::{
    CaptionService, EmbeddingService, IngestCatalogUseCase, NegationClassifier,
    SearchByImageUseCase, SearchProductsUseCase, VectorRepository,
};
use crate::connector::adapter::{
    AtlasVectorRepository, GeminiCaption, GeminiClient, GeminiEmbedding,
    InMemoryVectorRepository, LlmNegationClassifier, MockEmbedding,
    RuleBasedNegationClassifier,
};

pub struct ContainerConfig {
    /// Deterministic hash-seeded embeddings instead of the Gemini endpoint.
    pub mock_embeddings: bool,
    /// In-memory vector store instead of Atlas.
    pub memory_storage: bool,
    /// Marker-scan negation classifier instead of the LLM classifier.
    pub rule_based_negation: bool,
    pub mongo_uri: Option<String>,
    pub db_name: String,
    pub collection_name: String,
    pub index_name: String,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            mock_embeddings: false,
            memory_storage: false,
            rule_based_negation: false,
            mongo_uri: std::env::var("ATLAS_URI").ok(),
            db_name: std::env::var("DB_NAME").unwrap_or_else(|_| "product_search".to_string()),
            collection_name: std::env::var("COLLECTION_NAME")
                .unwrap_or_else(|_| "products".to_string()),
            index_name: std::env::var("INDEX_NAME")
                .unwrap_or_else(|_| "vector_index".to_string()),
        }
    }
}

/// Owns every external collaborator and hands out use cases wired against
/// them. All clients are built once here and passed down explicitly; nothing
/// in the crate holds process-wide state.
pub struct Container {
    embedding_service: Arc<dyn EmbeddingService>,
    classifier: Arc<dyn NegationClassifier>,
    caption_service: Option<Arc<dyn CaptionService>>,
    vector_repo: Arc<dyn VectorRepository>,
}

impl Container {
    pub async fn new(config: ContainerConfig) -> Result<Self> {
        let embedding_service: Arc<dyn EmbeddingService> = if config.mock_embeddings {
            debug!("Using mock embedding service");
            Arc::new(MockEmbedding::new())
        } else if let Some(gemini) = GeminiEmbedding::from_env() {
            debug!("Using Gemini embedding service");
            Arc::new(gemini)
        } else {
            warn!("GEMINI_API_KEY not set. Falling back to mock embeddings.");
            Arc::new(MockEmbedding::new())
        };

        let classifier: Arc<dyn NegationClassifier> = if config.rule_based_negation {
            debug!("Using rule-based negation classifier");
            Arc::new(RuleBasedNegationClassifier::new())
        } else if let Some(chat) = GeminiClient::from_env() {
            debug!("Using LLM negation classifier");
            Arc::new(LlmNegationClassifier::new(Arc::new(chat)))
        } else {
            warn!("GEMINI_API_KEY not set. Falling back to rule-based negation classifier.");
            Arc::new(RuleBasedNegationClassifier::new())
        };

        let caption_service: Option<Arc<dyn CaptionService>> =
            GeminiCaption::from_env().map(|c| Arc::new(c) as Arc<dyn CaptionService>);

        let vector_repo: Arc<dyn VectorRepository> = if config.memory_storage {
            debug!("Using in-memory vector storage");
            Arc::new(InMemoryVectorRepository::new())
        } else if let Some(uri) = config.mongo_uri.as_deref() {
            match AtlasVectorRepository::new(
                uri,
                &config.db_name,
                &config.collection_name,
                &config.index_name,
            )
            .await
            {
                Ok(atlas) => {
                    debug!(
                        "Connected to Atlas collection {}.{}",
                        config.db_name, config.collection_name
                    );
                    Arc::new(atlas)
                }
                Err(e) => {
                    warn!("Failed to connect to Atlas: {}. Falling back to in-memory storage.", e);
                    Arc::new(InMemoryVectorRepository::new())
                }
            }
        } else {
            warn!("ATLAS_URI not set. Falling back to in-memory storage.");
            Arc::new(InMemoryVectorRepository::new())
        };

        Ok(Self {
            embedding_service,
            classifier,
            caption_service,
            vector_repo,
        })
    }

    pub fn search_use_case(&self) -> Arc<SearchProductsUseCase> {
        Arc::new(SearchProductsUseCase::new(
            self.vector_repo.clone(),
            self.embedding_service.clone(),
            self.classifier.clone(),
        ))
    }

    pub fn ingest_use_case(&self) -> IngestCatalogUseCase {
        IngestCatalogUseCase::new(self.vector_repo.clone(), self.embedding_service.clone())
    }

    pub fn image_search_use_case(&self) -> Option<SearchByImageUseCase> {
        self.caption_service
            .as_ref()
            .map(|caption| SearchByImageUseCase::new(caption.clone(), self.search_use_case()))
    }

    pub fn vector_repo(&self) -> Arc<dyn VectorRepository> {
        self.vector_repo.clone()
    }
}
