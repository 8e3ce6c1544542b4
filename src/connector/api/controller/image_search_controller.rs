use anyhow::{Context, Result};

use crate::domain::Category;

use super::super::Container;
use super::search_controller::{format_search_results, usage_error};

pub struct ImageSearchController<'a> {
    container: &'a Container,
}

impl<'a> ImageSearchController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn search(
        &self,
        image_path: String,
        query: String,
        category: Option<i32>,
    ) -> Result<String> {
        let use_case = self
            .container
            .image_search_use_case()
            .ok_or_else(|| anyhow::anyhow!("image search requires GEMINI_API_KEY"))?;

        let image = tokio::fs::read(&image_path)
            .await
            .with_context(|| format!("failed to read image {image_path}"))?;

        let (combined_query, results) = use_case
            .execute(&image, &query, category.map(Category))
            .await
            .map_err(usage_error)?;

        Ok(format_search_results(&combined_query, &results))
    }
}
