//! Document text extraction.

use crate::error::{Result, YtragError};
use std::path::Path;
use tracing::{debug, instrument};

/// Loads the text content of a document for indexing.
pub trait DocumentLoader: Send + Sync {
    /// Extract all text from the document at `path`.
    fn load(&self, path: &Path) -> Result<String>;
}

/// Extracts text from PDF files.
pub struct PdfLoader;

impl PdfLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentLoader for PdfLoader {
    #[instrument(skip(self))]
    fn load(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|e| {
            YtragError::DocumentLoad(format!("Failed to read PDF file {:?}: {}", path, e))
        })?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            YtragError::DocumentLoad(format!("Failed to extract text from PDF {:?}: {}", path, e))
        })?;

        if text.trim().is_empty() {
            return Err(YtragError::DocumentLoad(format!(
                "PDF file {:?} contains no extractable text",
                path
            )));
        }

        debug!("Extracted {} characters", text.len());
        Ok(text)
    }
}
