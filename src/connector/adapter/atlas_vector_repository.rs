use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, from_document, to_bson, Document};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::VectorRepository;
use crate::domain::{
    DomainError, Embedding, ProductDocument, ProductMatch, ProductMetadata, SearchQuery,
};

const DEFAULT_DB_NAME: &str = "product_search";
const DEFAULT_COLLECTION: &str = "products";
const DEFAULT_INDEX_NAME: &str = "vector_index";

/// Oversampling factor for the approximate nearest-neighbor stage.
const NUM_CANDIDATES_FACTOR: usize = 20;

/// Stored shape of one product in the collection. Field names match the
/// catalog feed so the same Atlas index serves both this service and the
/// ingestion pipeline.
#[derive(Debug, Serialize, Deserialize)]
struct StoredProduct {
    id: String,
    content: String,
    embedding: Vec<f32>,
    metadata: StoredMetadata,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredMetadata {
    title: String,
    #[serde(default)]
    price: Option<f64>,
    #[serde(rename = "productURL", default)]
    product_url: Option<String>,
    source: String,
    index: i64,
}

impl StoredProduct {
    fn from_domain(document: &ProductDocument, embedding: &Embedding) -> Self {
        Self {
            id: document.id.clone(),
            content: document.content.clone(),
            embedding: embedding.vector().to_vec(),
            metadata: StoredMetadata {
                title: document.metadata.title.clone(),
                price: document.metadata.price,
                product_url: document.metadata.product_url.clone(),
                source: document.metadata.source.clone(),
                index: document.metadata.index,
            },
        }
    }

    fn into_domain(self) -> ProductDocument {
        ProductDocument {
            id: self.id,
            content: self.content,
            metadata: ProductMetadata {
                title: self.metadata.title,
                price: self.metadata.price,
                product_url: self.metadata.product_url,
                source: self.metadata.source,
                index: self.metadata.index,
            },
        }
    }
}

/// Row shape produced by the `$vectorSearch` pipeline: the stored product
/// plus the similarity score from the `$meta` projection.
#[derive(Debug, Deserialize)]
struct ScoredRow {
    #[serde(flatten)]
    product: StoredProduct,
    score: f64,
}

/// [`VectorRepository`] backed by MongoDB Atlas Vector Search.
///
/// Searches run a `$vectorSearch` aggregation over the cosine-similarity
/// index; the candidate-set filter of the exclusion step becomes a
/// `metadata.index $in` pre-filter inside the same stage. Tie order between
/// equal scores is whatever Atlas returns.
pub struct AtlasVectorRepository {
    collection: Collection<StoredProduct>,
    index_name: String,
}

impl AtlasVectorRepository {
    pub async fn new(
        uri: &str,
        db_name: &str,
        collection_name: &str,
        index_name: &str,
    ) -> Result<Self, DomainError> {
        let client = Client::with_uri_str(uri).await.map_err(|e| {
            DomainError::search_unavailable(format!("failed to connect to MongoDB: {e}"))
        })?;

        let collection = client
            .database(db_name)
            .collection::<StoredProduct>(collection_name);

        debug!(
            "Using Atlas collection {}.{} (index {})",
            db_name, collection_name, index_name
        );

        Ok(Self {
            collection,
            index_name: index_name.to_string(),
        })
    }

    /// Connect with the deployment defaults for database, collection, and
    /// search index names.
    pub async fn with_defaults(uri: &str) -> Result<Self, DomainError> {
        Self::new(uri, DEFAULT_DB_NAME, DEFAULT_COLLECTION, DEFAULT_INDEX_NAME).await
    }

    fn vector_search_stage(
        &self,
        query_embedding: &[f32],
        query: &SearchQuery,
    ) -> Result<Document, DomainError> {
        let query_vector = to_bson(&query_embedding)
            .map_err(|e| DomainError::internal(format!("failed to encode query vector: {e}")))?;

        let mut stage = doc! {
            "index": &self.index_name,
            "path": "embedding",
            "queryVector": query_vector,
            "numCandidates": (query.limit() * NUM_CANDIDATES_FACTOR) as i32,
            "limit": query.limit() as i32,
        };

        if let Some(candidates) = query.candidates() {
            let indices: Vec<i64> = candidates.iter().copied().collect();
            stage.insert("filter", doc! { "metadata.index": { "$in": indices } });
        }

        Ok(doc! { "$vectorSearch": stage })
    }
}

#[async_trait]
impl VectorRepository for AtlasVectorRepository {
    async fn save_batch(
        &self,
        documents: &[ProductDocument],
        embeddings: &[Embedding],
    ) -> Result<(), DomainError> {
        if documents.is_empty() {
            return Ok(());
        }

        if documents.len() != embeddings.len() {
            return Err(DomainError::internal(
                "Document and embedding count mismatch",
            ));
        }

        let rows: Vec<StoredProduct> = documents
            .iter()
            .zip(embeddings.iter())
            .map(|(document, embedding)| StoredProduct::from_domain(document, embedding))
            .collect();

        self.collection
            .insert_many(rows)
            .await
            .map_err(|e| DomainError::search_unavailable(format!("insert failed: {e}")))?;

        debug!("Saved {} documents to Atlas", documents.len());
        Ok(())
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        query: &SearchQuery,
    ) -> Result<Vec<ProductMatch>, DomainError> {
        let pipeline = vec![
            self.vector_search_stage(query_embedding, query)?,
            doc! { "$addFields": { "score": { "$meta": "vectorSearchScore" } } },
            doc! { "$project": { "_id": 0 } },
        ];

        let mut cursor = self
            .collection
            .aggregate(pipeline)
            .await
            .map_err(|e| DomainError::search_unavailable(format!("vector search failed: {e}")))?;

        let mut matches = Vec::new();
        while let Some(row) = cursor
            .try_next()
            .await
            .map_err(|e| DomainError::search_unavailable(format!("cursor error: {e}")))?
        {
            let scored: ScoredRow = from_document(row)
                .map_err(|e| DomainError::internal(format!("malformed search row: {e}")))?;
            matches.push(ProductMatch::new(
                scored.product.into_domain(),
                scored.score as f32,
            ));
        }

        Ok(matches)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        self.collection
            .estimated_document_count()
            .await
            .map_err(|e| DomainError::search_unavailable(format!("count failed: {e}")))
    }
}
