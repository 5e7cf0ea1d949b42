//! Vector store abstraction for ytrag.
//!
//! Provides a trait-based interface for different vector database backends.
//! Every store instance is bound to one named collection.

mod memory;
mod sqlite;

pub use memory::MemoryVectorStore;
pub use sqlite::SqliteVectorStore;

use crate::config::Settings;
use crate::error::{Result, YtragError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// A document stored in the vector database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document ID.
    pub id: Uuid,
    /// Collection this document belongs to.
    pub collection: String,
    /// Path of the source document.
    pub source: String,
    /// Text content of this chunk.
    pub content: String,
    /// Order of this chunk in the source.
    pub chunk_order: i32,
    /// Embedding vector.
    pub embedding: Vec<f32>,
    /// When this document was indexed.
    pub indexed_at: DateTime<Utc>,
}

impl Document {
    /// Create a new document.
    pub fn new(
        collection: String,
        source: String,
        content: String,
        chunk_order: i32,
        embedding: Vec<f32>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            collection,
            source,
            content,
            chunk_order,
            embedding,
            indexed_at: Utc::now(),
        }
    }
}

/// A search result with score.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The matched document.
    pub document: Document,
    /// Similarity score (higher is better).
    pub score: f32,
}

/// Trait for vector store implementations.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Name of the collection this store reads and writes.
    fn collection(&self) -> &str;

    /// Bulk upsert documents. Documents must belong to this store's collection.
    async fn upsert_batch(&self, docs: &[Document]) -> Result<usize>;

    /// Search for the `limit` most similar documents.
    async fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>>;

    /// Remove every document in the collection.
    async fn clear(&self) -> Result<usize>;

    /// Get total document count.
    async fn document_count(&self) -> Result<usize>;
}

/// Open the store selected by `[vector_store] provider`.
pub fn open_store(settings: &Settings) -> Result<Arc<dyn VectorStore>> {
    let collection = &settings.vector_store.collection;
    match settings.vector_store.provider.to_lowercase().as_str() {
        "memory" => Ok(Arc::new(MemoryVectorStore::new(collection))),
        "sqlite" => Ok(Arc::new(SqliteVectorStore::new(
            &settings.sqlite_path(),
            collection,
        )?)),
        other => Err(YtragError::Config(format!(
            "Unknown vector store provider: {}",
            other
        ))),
    }
}

/// Reject documents addressed to another collection.
fn check_collection(expected: &str, docs: &[Document]) -> Result<()> {
    match docs.iter().find(|d| d.collection != expected) {
        Some(doc) => Err(YtragError::VectorStore(format!(
            "Document {} belongs to collection '{}', not '{}'",
            doc.id, doc.collection, expected
        ))),
        None => Ok(()),
    }
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Score documents against a query and keep the best `limit`, highest first.
fn rank(
    query_embedding: &[f32],
    docs: impl IntoIterator<Item = Document>,
    limit: usize,
) -> Vec<SearchResult> {
    let mut results: Vec<SearchResult> = docs
        .into_iter()
        .map(|doc| {
            let score = cosine_similarity(query_embedding, &doc.embedding);
            SearchResult { document: doc, score }
        })
        .collect();

    // Stable sort keeps chunk order among equal scores.
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    results.truncate(limit);
    results
}
