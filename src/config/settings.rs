//! Configuration settings for ytrag.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Unicode font picked up from the work directory when no font is configured.
pub const DEFAULT_FONT_FILE: &str = "DejaVuSans.ttf";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub youtube: YoutubeSettings,
    pub artifacts: ArtifactSettings,
    pub pdf: PdfSettings,
    pub ollama: OllamaSettings,
    pub embedding: EmbeddingSettings,
    pub chunking: ChunkingSettings,
    pub vector_store: VectorStoreSettings,
    pub rag: RagSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory the pipeline artifacts are written to.
    pub work_dir: String,
    /// Log level when no -v flag is given (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            work_dir: ".".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Subtitle acquisition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// Subtitle language requested from yt-dlp.
    pub language: String,
    /// Accept auto-generated subtitles.
    pub auto_subtitles: bool,
    /// yt-dlp executable.
    pub ytdlp_path: String,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            auto_subtitles: true,
            ytdlp_path: "yt-dlp".to_string(),
        }
    }
}

/// File names of the artifacts passed between stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactSettings {
    /// Output template for the downloaded subtitles; yt-dlp appends `.<lang>.vtt`.
    pub subtitle_stem: String,
    /// Cleaned transcript text file.
    pub cleaned_transcript: String,
    /// Rendered PDF.
    pub pdf: String,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            subtitle_stem: "subtitle_file".to_string(),
            cleaned_transcript: "transcript_cleaned.txt".to_string(),
            pdf: "transcript.pdf".to_string(),
        }
    }
}

/// PDF rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfSettings {
    /// TrueType font to embed. When unset, `DejaVuSans.ttf` in the work
    /// directory is used if present, else built-in Helvetica.
    pub font_path: Option<String>,
    /// Font size in points.
    pub font_size: f32,
    /// Line height in millimetres.
    pub line_height_mm: f32,
    /// Left, right and top margin in millimetres.
    pub margin_mm: f32,
    /// Document title.
    pub title: String,
}

impl Default for PdfSettings {
    fn default() -> Self {
        Self {
            font_path: None,
            font_size: 12.0,
            line_height_mm: 10.0,
            margin_mm: 10.0,
            title: "Transcript".to_string(),
        }
    }
}

/// Ollama server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaSettings {
    /// Base URL of the Ollama server.
    pub host: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            host: "http://localhost:11434".to_string(),
            timeout_secs: 300,
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding model served by Ollama.
    pub model: String,
    /// Pull the model before indexing.
    pub pull_model: bool,
    /// Texts sent per embedding request.
    pub batch_size: usize,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: "nomic-embed-text".to_string(),
            pull_model: true,
            batch_size: 32,
        }
    }
}

/// Text splitting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks.
    pub chunk_overlap: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_size: 1200,
            chunk_overlap: 300,
        }
    }
}

/// Vector store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorStoreSettings {
    /// Vector store provider (memory, sqlite).
    pub provider: String,
    /// Collection the transcript is indexed into.
    pub collection: String,
    /// Path to SQLite database (for sqlite provider).
    pub sqlite_path: String,
}

impl Default for VectorStoreSettings {
    fn default() -> Self {
        Self {
            provider: "memory".to_string(),
            collection: "simple-rag".to_string(),
            sqlite_path: "~/.ytrag/vectors.db".to_string(),
        }
    }
}

/// RAG (Retrieval-Augmented Generation) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagSettings {
    /// Chat model used for query expansion and answers.
    pub model: String,
    /// Documents retrieved per generated query.
    pub retrieval_k: usize,
    /// Also retrieve with the user's original question.
    pub include_original: bool,
    /// Sampling temperature; the model default when unset.
    pub temperature: Option<f32>,
}

impl Default for RagSettings {
    fn default() -> Self {
        Self {
            model: "youtube-agent".to_string(),
            retrieval_k: 4,
            include_original: false,
            temperature: None,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::YtragError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ytrag")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded working directory.
    pub fn work_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.work_dir)
    }

    /// Output template handed to yt-dlp.
    pub fn subtitle_stem_path(&self) -> PathBuf {
        self.work_dir().join(&self.artifacts.subtitle_stem)
    }

    /// Path of the cleaned transcript.
    pub fn cleaned_transcript_path(&self) -> PathBuf {
        self.work_dir().join(&self.artifacts.cleaned_transcript)
    }

    /// Path of the rendered PDF.
    pub fn pdf_path(&self) -> PathBuf {
        self.work_dir().join(&self.artifacts.pdf)
    }

    /// Font to embed in the PDF: the configured one, else `DejaVuSans.ttf`
    /// from the work directory when present. `None` means built-in Helvetica.
    pub fn pdf_font_path(&self) -> Option<PathBuf> {
        match &self.pdf.font_path {
            Some(font) => Some(Self::expand_path(font)),
            None => {
                let bundled = self.work_dir().join(DEFAULT_FONT_FILE);
                bundled.is_file().then_some(bundled)
            }
        }
    }

    /// Get the expanded SQLite database path.
    pub fn sqlite_path(&self) -> PathBuf {
        Self::expand_path(&self.vector_store.sqlite_path)
    }

    /// Base URL of Ollama's OpenAI-compatible API.
    pub fn openai_api_base(&self) -> String {
        format!("{}/v1", self.ollama.host.trim_end_matches('/'))
    }
}
