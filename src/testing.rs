//! In-process fakes for the external collaborators.

use crate::embedding::Embedder;
use crate::error::{Result, YtragError};
use crate::llm::ChatModel;
use crate::pdf::DocumentLoader;
use crate::subtitles::{SubtitleFetcher, SubtitleRequest};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Shared, ordered record of calls across fakes.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

fn record(log: &CallLog, entry: String) {
    log.lock().unwrap().push(entry);
}

/// Embeds text as keyword counts, one dimension per keyword.
pub struct KeywordEmbedder {
    keywords: Vec<String>,
    log: CallLog,
}

impl KeywordEmbedder {
    pub fn new(keywords: &[&str], log: CallLog) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            log,
        }
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        let mut v: Vec<f32> = self
            .keywords
            .iter()
            .map(|k| lower.matches(k.as_str()).count() as f32)
            .collect();
        // Keeps the norm non-zero for texts with no keyword.
        v.push(0.01);
        v
    }
}

#[async_trait]
impl Embedder for KeywordEmbedder {
    async fn prepare(&self) -> Result<()> {
        record(&self.log, "embedder.prepare".to_string());
        Ok(())
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        record(&self.log, format!("embedder.embed:{}", text));
        Ok(self.vector(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        record(&self.log, format!("embedder.embed_batch:{}", texts.len()));
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn model(&self) -> &str {
        "nomic-embed-text"
    }
}

/// Replies with scripted answers in order and remembers every prompt.
pub struct ScriptedChat {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    log: CallLog,
}

impl ScriptedChat {
    pub fn new(replies: &[&str], log: CallLog) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
            log,
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedChat {
    async fn complete(&self, prompt: &str) -> Result<String> {
        record(&self.log, "chat.complete".to_string());
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| YtragError::Llm("no scripted reply left".to_string()))
    }

    fn model(&self) -> &str {
        "youtube-agent"
    }
}

/// Writes a canned VTT file where yt-dlp would.
pub struct CannedFetcher {
    vtt: String,
    log: CallLog,
}

impl CannedFetcher {
    pub fn new(vtt: &str, log: CallLog) -> Self {
        Self {
            vtt: vtt.to_string(),
            log,
        }
    }
}

#[async_trait]
impl SubtitleFetcher for CannedFetcher {
    async fn fetch(&self, request: &SubtitleRequest) -> Result<PathBuf> {
        record(&self.log, format!("fetcher.fetch:{}", request.url));
        let path = request.expected_path();
        std::fs::write(&path, &self.vtt)?;
        Ok(path)
    }
}

/// Returns fixed text instead of parsing the PDF.
pub struct FixedLoader {
    text: String,
    log: CallLog,
}

impl FixedLoader {
    pub fn new(text: &str, log: CallLog) -> Self {
        Self {
            text: text.to_string(),
            log,
        }
    }
}

impl DocumentLoader for FixedLoader {
    fn load(&self, path: &Path) -> Result<String> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        record(&self.log, format!("loader.load:{}", name));
        if !path.exists() {
            return Err(YtragError::DocumentLoad(format!("{} does not exist", name)));
        }
        Ok(self.text.clone())
    }
}
