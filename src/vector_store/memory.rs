//! In-memory vector store implementation.
//!
//! The default store: the index lives only as long as the process.

use super::{check_collection, rank, Document, SearchResult, VectorStore};
use crate::error::{Result, YtragError};
use async_trait::async_trait;
use std::sync::RwLock;

/// In-memory vector store.
pub struct MemoryVectorStore {
    collection: String,
    documents: RwLock<Vec<Document>>,
}

impl MemoryVectorStore {
    /// Create an empty store for the named collection.
    pub fn new(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            documents: RwLock::new(Vec::new()),
        }
    }

    fn lock_error<T>(e: std::sync::PoisonError<T>) -> YtragError {
        YtragError::VectorStore(format!("Failed to acquire lock: {}", e))
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    fn collection(&self) -> &str {
        &self.collection
    }

    async fn upsert_batch(&self, docs: &[Document]) -> Result<usize> {
        check_collection(&self.collection, docs)?;

        let mut store = self.documents.write().map_err(Self::lock_error)?;
        for doc in docs {
            match store.iter_mut().find(|existing| existing.id == doc.id) {
                Some(existing) => *existing = doc.clone(),
                None => store.push(doc.clone()),
            }
        }
        Ok(docs.len())
    }

    async fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>> {
        let docs = self.documents.read().map_err(Self::lock_error)?;
        Ok(rank(query_embedding, docs.iter().cloned(), limit))
    }

    async fn clear(&self) -> Result<usize> {
        let mut docs = self.documents.write().map_err(Self::lock_error)?;
        let removed = docs.len();
        docs.clear();
        Ok(removed)
    }

    async fn document_count(&self) -> Result<usize> {
        let docs = self.documents.read().map_err(Self::lock_error)?;
        Ok(docs.len())
    }
}
