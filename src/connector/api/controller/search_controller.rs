use anyhow::Result;

use crate::domain::{Category, DomainError, SearchResult};

use super::super::Container;

pub struct SearchController<'a> {
    container: &'a Container,
}

impl<'a> SearchController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn search(&self, query: String, category: Option<i32>) -> Result<String> {
        let use_case = self.container.search_use_case();
        let results = use_case
            .execute(&query, category.map(Category))
            .await
            .map_err(usage_error)?;

        Ok(format_search_results(&query, &results))
    }
}

/// Keep the error kind in the user-facing message; details stay in the logs.
pub(crate) fn usage_error(e: DomainError) -> anyhow::Error {
    match e {
        DomainError::InvalidQuery(msg) => anyhow::anyhow!("invalid query: {msg}"),
        DomainError::ClassificationFailed(_) => {
            anyhow::anyhow!("classification failed; try again or use --rule-based-negation")
        }
        DomainError::SearchUnavailable(_) => anyhow::anyhow!("search index unavailable"),
        other => other.into(),
    }
}

pub(crate) fn format_search_results(query: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return format!("No results found for \"{}\".", query);
    }

    let mut output = format!("Found {} results for \"{}\":\n\n", results.len(), query);

    for (i, result) in results.iter().enumerate() {
        output.push_str(&format!(
            "{}. {}\n",
            i + 1,
            result.link().unwrap_or("(no link)")
        ));

        let preview: String = result
            .content()
            .lines()
            .map(|l| format!("   | {}", l))
            .collect::<Vec<_>>()
            .join("\n");
        output.push_str(&preview);
        output.push_str("\n\n");
    }

    output
}
