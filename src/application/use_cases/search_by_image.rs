use std::sync::Arc;

use tracing::{info, warn};

use crate::application::use_cases::SearchProductsUseCase;
use crate::application::CaptionService;
use crate::domain::{Category, DomainError, SearchResult};

const CAPTION_PROMPT_PREFIX: &str = "Describe this product in less than 50 words";

/// Image-driven search: caption the image, append the caption to the user's
/// text query, then run the ordinary search contract on the combined text.
pub struct SearchByImageUseCase {
    caption_service: Arc<dyn CaptionService>,
    search: Arc<SearchProductsUseCase>,
}

impl SearchByImageUseCase {
    pub fn new(caption_service: Arc<dyn CaptionService>, search: Arc<SearchProductsUseCase>) -> Self {
        Self {
            caption_service,
            search,
        }
    }

    /// Returns the combined query actually searched alongside the results,
    /// so callers can echo it back.
    pub async fn execute(
        &self,
        image: &[u8],
        query: &str,
        category: Option<Category>,
    ) -> Result<(String, Vec<SearchResult>), DomainError> {
        let query = if query.trim().is_empty() {
            "Find products like this"
        } else {
            query
        };

        let prompt = format!("{}: {}", CAPTION_PROMPT_PREFIX, query);

        // Captioning failure falls back to a text-only search rather than
        // failing the request.
        let combined_query = match self.caption_service.caption(image, &prompt).await {
            Ok(description) => {
                info!("Image description: {}", description);
                format!("{} {}", query, description)
            }
            Err(e) => {
                warn!("Image captioning failed: {}. Searching with text query only.", e);
                query.to_string()
            }
        };

        let results = self.search.execute(&combined_query, category).await?;
        Ok((combined_query, results))
    }
}
