//! Configuration module for ytrag.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, RagPrompts};
pub use settings::{
    ArtifactSettings, DEFAULT_FONT_FILE, ChunkingSettings, EmbeddingSettings, GeneralSettings, OllamaSettings,
    PdfSettings, PromptSettings, RagSettings, Settings, VectorStoreSettings, YoutubeSettings,
};
