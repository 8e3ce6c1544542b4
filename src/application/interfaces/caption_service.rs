use async_trait::async_trait;

use crate::domain::DomainError;

/// Produces a short text description of a product image. The caption is
/// concatenated with the user's text query and handed to the ordinary search
/// contract as plain query text.
#[async_trait]
pub trait CaptionService: Send + Sync {
    async fn caption(&self, image: &[u8], prompt: &str) -> Result<String, DomainError>;
}
