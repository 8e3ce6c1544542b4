pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    CaptionService, EmbeddingService, IngestCatalogUseCase, IngestReport, NegationClassifier,
    ProductRecord, SearchByImageUseCase, SearchProductsUseCase, VectorRepository,
};

pub use connector::{
    AtlasVectorRepository, ChatClient, Container, ContainerConfig, GeminiCaption, GeminiClient,
    GeminiEmbedding, InMemoryVectorRepository, LlmNegationClassifier, MockEmbedding, Router,
    RuleBasedNegationClassifier,
};

pub use domain::{
    Category, DomainError, Embedding, EmbeddingConfig, NegationAnalysis, ProductDocument,
    ProductMatch, ProductMetadata, SearchQuery, SearchResult,
};
