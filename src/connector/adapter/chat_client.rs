use async_trait::async_trait;

use crate::domain::DomainError;

/// An interface for sending single-turn prompts to an LLM and receiving text
/// responses.
///
/// Implementors encapsulate transport, serialization, and vendor-specific
/// API details. Consumers (e.g. [`super::LlmNegationClassifier`]) remain
/// decoupled from any particular provider or HTTP client library.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send a prompt and return the model's response text.
    async fn complete(&self, prompt: &str) -> Result<String, DomainError>;
}
