//! YouTube subtitle download via yt-dlp.

use super::{SubtitleFetcher, SubtitleRequest};
use crate::error::{Result, YtragError};
use async_trait::async_trait;
use regex::Regex;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, instrument};

/// Fetches subtitles by shelling out to yt-dlp. The video itself is never downloaded.
pub struct YtDlpFetcher {
    program: String,
}

impl YtDlpFetcher {
    pub fn new() -> Self {
        Self::with_program("yt-dlp")
    }

    /// Use a specific yt-dlp executable.
    pub fn with_program(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    fn args(request: &SubtitleRequest) -> Vec<String> {
        let mut args = vec![
            "--skip-download".to_string(),
            "--write-subs".to_string(),
        ];
        if request.auto_generated {
            args.push("--write-auto-subs".to_string());
        }
        args.extend([
            "--sub-langs".to_string(),
            request.language.clone(),
            "--sub-format".to_string(),
            "vtt".to_string(),
            "--force-overwrites".to_string(),
            "--no-warnings".to_string(),
            "--output".to_string(),
            request.output_stem.to_string_lossy().into_owned(),
            request.url.clone(),
        ]);
        args
    }
}

impl Default for YtDlpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubtitleFetcher for YtDlpFetcher {
    #[instrument(skip(self), fields(url = %request.url))]
    async fn fetch(&self, request: &SubtitleRequest) -> Result<PathBuf> {
        if let Some(parent) = request.output_stem.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // A file left by an earlier video must never be mistaken for this one.
        let path = request.expected_path();
        if path.exists() {
            debug!("Removing stale subtitle file {:?}", path);
            std::fs::remove_file(&path)?;
        }

        info!("Downloading {} subtitles", request.language);

        let result = Command::new(&self.program)
            .args(Self::args(request))
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await;

        let output = match result {
            Ok(o) => o,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(YtragError::ToolNotFound(self.program.clone()));
            }
            Err(e) => {
                return Err(YtragError::SubtitleDownload(format!("yt-dlp execution failed: {e}")));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(YtragError::SubtitleDownload(format!("yt-dlp failed: {stderr}")));
        }

        if !path.exists() {
            return Err(YtragError::SubtitlesNotFound(format!(
                "no '{}' subtitles were written for {} (expected {:?})",
                request.language, request.url, path
            )));
        }

        Ok(path)
    }
}

/// Turn user input into a URL yt-dlp can fetch.
///
/// YouTube links and bare video IDs become a canonical watch URL; other
/// http(s) URLs are passed through for yt-dlp's other extractors.
pub fn normalize_video_url(input: &str) -> Result<String> {
    // Matches various YouTube URL formats and bare video IDs
    let video_id_regex = Regex::new(
        r"(?x)
        (?:
            (?:https?://)?
            (?:www\.|m\.)?
            (?:youtube\.com/watch\?(?:.*&)?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/shorts/|youtube\.com/v/)
            ([a-zA-Z0-9_-]{11})
        )
        |
        ^([a-zA-Z0-9_-]{11})$
    ",
    )
    .expect("Invalid regex");

    let input = input.trim();
    if let Some(caps) = video_id_regex.captures(input) {
        if let Some(id) = caps.get(1).or_else(|| caps.get(2)) {
            return Ok(format!("https://www.youtube.com/watch?v={}", id.as_str()));
        }
    }

    match url::Url::parse(input) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(input.to_string()),
        _ => Err(YtragError::InvalidInput(format!(
            "Not a YouTube URL or video ID: {}",
            input
        ))),
    }
}
