use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One indexed catalog item: assembled description text plus the metadata
/// needed to render and cross-reference a result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDocument {
    pub id: String,
    pub content: String,
    pub metadata: ProductMetadata,
}

impl ProductDocument {
    pub fn new(content: String, metadata: ProductMetadata) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content,
            metadata,
        }
    }

    /// Stable integer identity used for set-membership comparisons between
    /// separate searches. Two documents are the same document iff their
    /// `index` values match, regardless of content equality.
    pub fn index(&self) -> i64 {
        self.metadata.index
    }

    pub fn link(&self) -> Option<&str> {
        self.metadata.product_url.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductMetadata {
    pub title: String,
    pub price: Option<f64>,
    pub product_url: Option<String>,
    pub source: String,
    /// Unique per catalog; the document identity key.
    pub index: i64,
}

impl ProductMetadata {
    pub fn new(title: impl Into<String>, index: i64) -> Self {
        Self {
            title: title.into(),
            price: None,
            product_url: None,
            source: "amazon_products".to_string(),
            index,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_product_url(mut self, url: impl Into<String>) -> Self {
        self.product_url = Some(url.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

/// A document returned from a similarity search together with its score.
#[derive(Debug, Clone)]
pub struct ProductMatch {
    document: ProductDocument,
    score: f32,
}

impl ProductMatch {
    pub fn new(document: ProductDocument, score: f32) -> Self {
        Self { document, score }
    }

    pub fn document(&self) -> &ProductDocument {
        &self.document
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn index(&self) -> i64 {
        self.document.index()
    }
}

/// Catalog category identifier. Advisory: accepted on the search contract
/// but not applied as a filter to either search path (reserved).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(pub i32);

impl Category {
    pub const SUITCASES: Category = Category(104);
    pub const MENS_CLOTHING: Category = Category(110);

    pub fn name(&self) -> Option<&'static str> {
        match self.0 {
            104 => Some("Suitcases"),
            110 => Some("Men's Clothing"),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", name, self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_identity_is_the_index_field() {
        let meta = ProductMetadata::new("Carry-on", 7);
        let a = ProductDocument::new("Title: Carry-on\n".to_string(), meta.clone());
        let b = ProductDocument::new("Title: Carry-on\n".to_string(), meta);

        // Identical content, distinct uuids, same identity key.
        assert_ne!(a.id, b.id);
        assert_eq!(a.index(), b.index());
    }

    #[test]
    fn known_category_names() {
        assert_eq!(Category::SUITCASES.name(), Some("Suitcases"));
        assert_eq!(Category::MENS_CLOTHING.name(), Some("Men's Clothing"));
        assert_eq!(Category(999).name(), None);
    }

    #[test]
    fn metadata_builder() {
        let meta = ProductMetadata::new("Jacket", 3)
            .with_price(59.99)
            .with_product_url("https://example.com/p/3");

        assert_eq!(meta.price, Some(59.99));
        assert_eq!(meta.product_url.as_deref(), Some("https://example.com/p/3"));
        assert_eq!(meta.source, "amazon_products");
    }
}
