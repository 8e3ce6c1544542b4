use anyhow::Result;

use super::super::Container;

pub struct StatsController<'a> {
    container: &'a Container,
}

impl<'a> StatsController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn stats(&self) -> Result<String> {
        let count = self.container.vector_repo().count().await?;

        Ok(format!(
            "ShopSearch Statistics\n=====================\nIndexed products: {}",
            count
        ))
    }
}
