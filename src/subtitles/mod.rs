//! Subtitle acquisition and cleanup.
//!
//! Provides a trait-based interface for fetching subtitle files and the line
//! filter that turns them into plain text.

mod cleaner;
mod youtube;

pub use cleaner::{CleanedTranscript, LineKind, SubtitleCleaner};
pub use youtube::{normalize_video_url, YtDlpFetcher};

use crate::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// What to download and where to put it.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleRequest {
    /// Video URL.
    pub url: String,
    /// Output template without extension.
    pub output_stem: PathBuf,
    /// Subtitle language code.
    pub language: String,
    /// Accept auto-generated subtitles when no uploaded ones exist.
    pub auto_generated: bool,
}

impl SubtitleRequest {
    /// File the downloader writes, `<stem>.<lang>.vtt`.
    pub fn expected_path(&self) -> PathBuf {
        let mut name = self.output_stem.as_os_str().to_os_string();
        name.push(format!(".{}.vtt", self.language));
        PathBuf::from(name)
    }
}

/// Trait for subtitle download providers.
#[async_trait]
pub trait SubtitleFetcher: Send + Sync {
    /// Download subtitles and return the path of the written file.
    async fn fetch(&self, request: &SubtitleRequest) -> Result<PathBuf>;
}
