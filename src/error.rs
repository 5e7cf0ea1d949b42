//! Error types for ytrag.

use thiserror::Error;

/// Library-level error type for ytrag operations.
#[derive(Error, Debug)]
pub enum YtragError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Subtitle download failed: {0}")]
    SubtitleDownload(String),

    #[error("Subtitles not found: {0}")]
    SubtitlesNotFound(String),

    #[error("PDF rendering failed: {0}")]
    PdfRender(String),

    #[error("Document loading failed: {0}")]
    DocumentLoad(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("Chat model error: {0}")]
    Llm(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Ollama API error: {0}")]
    Ollama(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for ytrag operations.
pub type Result<T> = std::result::Result<T, YtragError>;
