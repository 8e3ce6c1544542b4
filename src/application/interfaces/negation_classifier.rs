use async_trait::async_trait;

use crate::domain::{DomainError, NegationAnalysis};

/// Decides whether a query contains negation and, if so, extracts the
/// negated attribute and a rewritten positive query.
///
/// A failed classification must surface as
/// [`DomainError::ClassificationFailed`], never as "not negated": silently
/// defaulting would invert the search semantics for the caller.
#[async_trait]
pub trait NegationClassifier: Send + Sync {
    async fn classify(&self, query: &str) -> Result<NegationAnalysis, DomainError>;
}
