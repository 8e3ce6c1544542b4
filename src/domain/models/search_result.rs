use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Category, ProductDocument};

/// Read-only projection of a [`ProductDocument`] handed back to callers.
/// Recreated per query, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    content: String,
    link: Option<String>,
}

impl SearchResult {
    pub fn new(content: impl Into<String>, link: Option<String>) -> Self {
        Self {
            content: content.into(),
            link,
        }
    }

    pub fn from_document(document: &ProductDocument) -> Self {
        Self {
            content: document.content.clone(),
            link: document.link().map(|l| l.to_string()),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }
}

/// Parameters for one similarity search against the vector index.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    query: String,
    limit: usize,
    candidates: Option<HashSet<i64>>,
    category: Option<Category>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: 5,
            candidates: None,
            category: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        // Ensure at least 1 result is requested
        self.limit = limit.max(1);
        self
    }

    /// Restrict the search to documents whose `index` metadata is in the
    /// given set. Used by the exclusion step of the negated path.
    pub fn with_candidates(mut self, candidates: HashSet<i64>) -> Self {
        self.candidates = Some(candidates);
        self
    }

    /// Reserved: the category is carried through for logging but is not
    /// applied as a filter to either search path.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn candidates(&self) -> Option<&HashSet<i64>> {
        self.candidates.as_ref()
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn allows_index(&self, index: i64) -> bool {
        self.candidates
            .as_ref()
            .is_none_or(|set| set.contains(&index))
    }
}
