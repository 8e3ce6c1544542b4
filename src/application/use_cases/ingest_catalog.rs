use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::application::{EmbeddingService, VectorRepository};
use crate::domain::{DomainError, Embedding, ProductDocument, ProductMetadata};

/// Documents embedded per repository write.
const BATCH_SIZE: usize = 50;

/// One raw catalog record as loaded from the product feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,
    #[serde(default)]
    pub final_price: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub reviews_count: Option<u64>,
    #[serde(default)]
    pub categories: Option<i32>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ProductRecord {
    /// Assemble the description text that gets embedded and returned as
    /// result content.
    fn content(&self) -> String {
        let mut content = format!("Title: {}\n", self.title);
        if let Some(price) = self.final_price {
            content.push_str(&format!("Price: ${}\n", price));
        }
        if let Some(rating) = self.rating {
            content.push_str(&format!("Rating: {} stars\n", rating));
        }
        if let Some(reviews) = self.reviews_count {
            content.push_str(&format!("Reviews: {}\n", reviews));
        }
        if let Some(category) = self.categories {
            content.push_str(&format!("Categories: {}\n", category));
        }
        content
    }
}

#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub document_count: usize,
    /// Items whose embedding fell back to a zero vector. Quality signal only;
    /// the documents are still indexed.
    pub degraded_count: usize,
}

/// Loads catalog records into the vector repository: assigns sequential
/// `index` identities, embeds the assembled content in batches, and saves
/// documents alongside their vectors.
pub struct IngestCatalogUseCase {
    vector_repo: Arc<dyn VectorRepository>,
    embedding_service: Arc<dyn EmbeddingService>,
}

impl IngestCatalogUseCase {
    pub fn new(
        vector_repo: Arc<dyn VectorRepository>,
        embedding_service: Arc<dyn EmbeddingService>,
    ) -> Self {
        Self {
            vector_repo,
            embedding_service,
        }
    }

    pub async fn execute(&self, records: &[ProductRecord]) -> Result<IngestReport, DomainError> {
        info!("Ingesting {} catalog records", records.len());

        let documents: Vec<ProductDocument> = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let mut metadata = ProductMetadata::new(&record.title, index as i64);
                if let Some(price) = record.final_price {
                    metadata = metadata.with_price(price);
                }
                if let Some(ref url) = record.url {
                    metadata = metadata.with_product_url(url);
                }
                ProductDocument::new(record.content(), metadata)
            })
            .collect();

        let progress_bar = ProgressBar::new(documents.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );

        let mut report = IngestReport::default();

        for batch in documents.chunks(BATCH_SIZE) {
            let texts: Vec<String> = batch.iter().map(|d| d.content.clone()).collect();
            let embeddings: Vec<Embedding> = self.embedding_service.embed_documents(&texts).await?;

            let degraded = embeddings.iter().filter(|e| e.is_degraded()).count();
            if degraded > 0 {
                warn!("{} of {} embeddings degraded to zero vectors", degraded, batch.len());
            }
            report.degraded_count += degraded;

            self.vector_repo.save_batch(batch, &embeddings).await?;
            report.document_count += batch.len();
            progress_bar.inc(batch.len() as u64);
        }

        progress_bar.finish_with_message("done");
        info!(
            "Ingested {} documents ({} degraded embeddings)",
            report.document_count, report.degraded_count
        );

        Ok(report)
    }
}
