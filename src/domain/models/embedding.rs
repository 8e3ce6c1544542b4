use serde::{Deserialize, Serialize};

/// Represents a vector embedding for a product document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Embedding {
    vector: Vec<f32>,
    model: String,
    /// True when the provider failed for this item and a zero vector was
    /// substituted. A quality flag, not an error: similarity against a zero
    /// vector is non-discriminative but the batch carries on.
    degraded: bool,
}

impl Embedding {
    pub fn new(vector: Vec<f32>, model: impl Into<String>) -> Self {
        Self {
            vector,
            model: model.into(),
            degraded: false,
        }
    }

    /// Zero-vector fallback of the model's native dimension.
    pub fn degraded(dimensions: usize, model: impl Into<String>) -> Self {
        Self {
            vector: vec![0.0; dimensions],
            model: model.into(),
            degraded: true,
        }
    }

    pub fn vector(&self) -> &[f32] {
        &self.vector
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn dimensions(&self) -> usize {
        self.vector.len()
    }
}

/// Configuration for the embedding model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    model_name: String,
    dimensions: usize,
}

impl EmbeddingConfig {
    pub fn new(model_name: impl Into<String>, dimensions: usize) -> Self {
        Self {
            model_name: model_name.into(),
            dimensions,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model_name: "embedding-001".to_string(),
            dimensions: 768,
        }
    }
}
