use anyhow::Result;

use crate::cli::Commands;

use super::container::Container;
use super::controller::{
    ImageSearchController, IngestController, SearchController, StatsController,
};

pub struct Router<'a> {
    search_controller: SearchController<'a>,
    image_search_controller: ImageSearchController<'a>,
    ingest_controller: IngestController<'a>,
    stats_controller: StatsController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            search_controller: SearchController::new(container),
            image_search_controller: ImageSearchController::new(container),
            ingest_controller: IngestController::new(container),
            stats_controller: StatsController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Search { query, category } => {
                self.search_controller.search(query, category).await
            }
            Commands::ImageSearch {
                image,
                query,
                category,
            } => {
                self.image_search_controller
                    .search(image, query, category)
                    .await
            }
            Commands::Ingest { path, limit } => self.ingest_controller.ingest(path, limit).await,
            Commands::Stats => self.stats_controller.stats().await,
        }
    }
}
