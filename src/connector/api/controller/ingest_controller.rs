use anyhow::{Context, Result};

use crate::application::ProductRecord;

use super::super::Container;

pub struct IngestController<'a> {
    container: &'a Container,
}

impl<'a> IngestController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Ingest a JSON product feed (an array of records) into the vector store.
    pub async fn ingest(&self, path: String, limit: Option<usize>) -> Result<String> {
        let raw = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read catalog file {path}"))?;

        let mut records: Vec<ProductRecord> =
            serde_json::from_str(&raw).with_context(|| format!("failed to parse {path}"))?;

        if let Some(limit) = limit {
            records.truncate(limit);
        }

        let use_case = self.container.ingest_use_case();
        let report = use_case.execute(&records).await?;

        Ok(format!(
            "Ingested {} products ({} degraded embeddings)",
            report.document_count, report.degraded_count
        ))
    }
}
