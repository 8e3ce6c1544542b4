use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Classification failed: {0}")]
    ClassificationFailed(String),

    #[error("Search unavailable: {0}")]
    SearchUnavailable(String),

    #[error("Embedding error: {0}")]
    EmbeddingError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    pub fn classification_failed(msg: impl Into<String>) -> Self {
        Self::ClassificationFailed(msg.into())
    }

    pub fn search_unavailable(msg: impl Into<String>) -> Self {
        Self::SearchUnavailable(msg.into())
    }

    pub fn embedding(msg: impl Into<String>) -> Self {
        Self::EmbeddingError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_invalid_query(&self) -> bool {
        matches!(self, Self::InvalidQuery(_))
    }

    pub fn is_classification_failed(&self) -> bool {
        matches!(self, Self::ClassificationFailed(_))
    }

    pub fn is_search_unavailable(&self) -> bool {
        matches!(self, Self::SearchUnavailable(_))
    }
}
