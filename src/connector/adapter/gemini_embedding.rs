use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use crate::application::EmbeddingService;
use crate::domain::{DomainError, Embedding, EmbeddingConfig};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const API_PATH: &str = "/v1beta/models";
/// Log batch progress every this many items.
const PROGRESS_EVERY: usize = 50;

#[derive(serde::Serialize)]
struct EmbedRequest<'a> {
    content: EmbedContent<'a>,
}

#[derive(serde::Serialize)]
struct EmbedContent<'a> {
    parts: Vec<EmbedPart<'a>>,
}

#[derive(serde::Serialize)]
struct EmbedPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

/// [`EmbeddingService`] backed by the Gemini `embedContent` endpoint.
///
/// Embedding never raises: a failed call yields a zero vector of the model's
/// native dimension instead. In a batch the substitute is flagged degraded so
/// a long catalog ingestion does not abort on one bad input; for a query the
/// search proceeds with non-discriminative similarity for that call.
pub struct GeminiEmbedding {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    config: EmbeddingConfig,
}

impl GeminiEmbedding {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            base_url: base.trim_end_matches('/').to_string(),
            config: EmbeddingConfig::default(),
        }
    }

    /// Reads `GEMINI_API_KEY` (required) and `GEMINI_BASE_URL` (optional).
    pub fn from_env() -> Option<Self> {
        let key = std::env::var("GEMINI_API_KEY").ok()?;
        let base =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Some(Self::new(key, base))
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{}/{}:embedContent",
            self.base_url,
            API_PATH,
            self.config.model_name()
        )
    }

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let request = EmbedRequest {
            content: EmbedContent {
                parts: vec![EmbedPart { text }],
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::embedding(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(DomainError::embedding(format!("API returned {status}")));
        }

        let api_response: EmbedResponse = response
            .json()
            .await
            .map_err(|e| DomainError::embedding(format!("failed to parse response: {e}")))?;

        Ok(api_response.embedding.values)
    }
}

#[async_trait]
impl EmbeddingService for GeminiEmbedding {
    async fn embed_query(&self, query: &str) -> Result<Vec<f32>, DomainError> {
        match self.embed_one(query).await {
            Ok(vector) => Ok(vector),
            Err(e) => {
                warn!("Error embedding query: {}. Using zero-vector fallback.", e);
                Ok(vec![0.0; self.config.dimensions()])
            }
        }
    }

    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Embedding>, DomainError> {
        let mut embeddings = Vec::with_capacity(texts.len());

        for (i, text) in texts.iter().enumerate() {
            let embedding = match self.embed_one(text).await {
                Ok(vector) => Embedding::new(vector, self.config.model_name()),
                Err(e) => {
                    warn!("Error embedding document {}: {}. Using zero-vector fallback.", i, e);
                    Embedding::degraded(self.config.dimensions(), self.config.model_name())
                }
            };
            embeddings.push(embedding);

            if (i + 1) % PROGRESS_EVERY == 0 {
                info!("Embedded {}/{} documents", i + 1, texts.len());
            }
        }

        Ok(embeddings)
    }

    fn config(&self) -> &EmbeddingConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Port 9 (discard) is not listening; requests fail immediately.
    fn unreachable_service() -> GeminiEmbedding {
        GeminiEmbedding::new("test-key", "http://127.0.0.1:9")
    }

    #[tokio::test]
    async fn query_embedding_falls_back_to_zero_vector() {
        let service = unreachable_service();

        let vector = service.embed_query("luggage wheels").await.unwrap();

        assert_eq!(vector.len(), 768);
        assert!(vector.iter().all(|&x| x == 0.0));
    }

    #[tokio::test]
    async fn batch_embedding_degrades_per_item_without_erroring() {
        let service = unreachable_service();
        let texts: Vec<String> = (0..3).map(|i| format!("Title: Product {i}\n")).collect();

        let embeddings = service.embed_documents(&texts).await.unwrap();

        assert_eq!(embeddings.len(), 3);
        for embedding in &embeddings {
            assert!(embedding.is_degraded());
            assert_eq!(embedding.dimensions(), 768);
            assert!(embedding.vector().iter().all(|&x| x == 0.0));
        }
    }
}
