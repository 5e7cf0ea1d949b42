//! Text chunking for indexing extracted documents.

mod recursive;

pub use recursive::RecursiveCharacterSplitter;

use serde::{Deserialize, Serialize};

/// A chunk of document text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Text content of this chunk.
    pub content: String,
    /// Position of this chunk in the document.
    pub order: i32,
    /// Path of the document the chunk came from.
    pub source: String,
}

impl TextChunk {
    pub fn new(content: String, order: i32, source: String) -> Self {
        Self {
            content,
            order,
            source,
        }
    }
}
