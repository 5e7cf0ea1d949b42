//! Pipeline orchestrator for ytrag.
//!
//! Runs the stages in order: subtitles, cleaned transcript, PDF, vector index.
//! Each stage writes a fixed artifact that the next one reads back.

use crate::chunking::RecursiveCharacterSplitter;
use crate::config::{Prompts, Settings};
use crate::embedding::{Embedder, OllamaEmbedder};
use crate::error::{Result, YtragError};
use crate::llm::{ChatModel, OllamaChat};
use crate::pdf::{DocumentLoader, PdfLoader, PdfRenderer};
use crate::rag::{MultiQueryRetriever, RagChain};
use crate::subtitles::{
    normalize_video_url, SubtitleCleaner, SubtitleFetcher, SubtitleRequest, YtDlpFetcher,
};
use crate::vector_store::{open_store, Document, VectorStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

/// External collaborators of the pipeline.
pub struct Components {
    pub fetcher: Arc<dyn SubtitleFetcher>,
    pub loader: Arc<dyn DocumentLoader>,
    pub embedder: Arc<dyn Embedder>,
    pub vector_store: Arc<dyn VectorStore>,
    pub chat: Arc<dyn ChatModel>,
}

/// The main orchestrator for the ytrag pipeline.
pub struct Orchestrator {
    settings: Settings,
    prompts: Prompts,
    cleaner: SubtitleCleaner,
    renderer: PdfRenderer,
    splitter: RecursiveCharacterSplitter,
    fetcher: Arc<dyn SubtitleFetcher>,
    loader: Arc<dyn DocumentLoader>,
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
    chat: Arc<dyn ChatModel>,
}

impl Orchestrator {
    /// Create an orchestrator backed by yt-dlp and Ollama.
    pub fn new(settings: Settings) -> Result<Self> {
        let components = Components {
            fetcher: Arc::new(YtDlpFetcher::with_program(&settings.youtube.ytdlp_path)),
            loader: Arc::new(PdfLoader::new()),
            embedder: Arc::new(OllamaEmbedder::from_settings(&settings)?),
            vector_store: open_store(&settings)?,
            chat: Arc::new(OllamaChat::from_settings(&settings)?),
        };

        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        Self::with_components(settings, prompts, components)
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        prompts: Prompts,
        components: Components,
    ) -> Result<Self> {
        let splitter = RecursiveCharacterSplitter::new(
            settings.chunking.chunk_size,
            settings.chunking.chunk_overlap,
        )?;
        let renderer = PdfRenderer::from_settings(&settings);

        Ok(Self {
            settings,
            prompts,
            cleaner: SubtitleCleaner::new(),
            renderer,
            splitter,
            fetcher: components.fetcher,
            loader: components.loader,
            embedder: components.embedder,
            vector_store: components.vector_store,
            chat: components.chat,
        })
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get a reference to the vector store.
    pub fn vector_store(&self) -> Arc<dyn VectorStore> {
        self.vector_store.clone()
    }

    /// Get a reference to the embedder.
    pub fn embedder(&self) -> Arc<dyn Embedder> {
        self.embedder.clone()
    }

    /// Download the video's subtitles. Returns the path of the VTT file.
    #[instrument(skip(self))]
    pub async fn fetch_subtitles(&self, url: &str) -> Result<PathBuf> {
        let url = normalize_video_url(url)?;
        std::fs::create_dir_all(self.settings.work_dir())?;

        let request = SubtitleRequest {
            url,
            output_stem: self.settings.subtitle_stem_path(),
            language: self.settings.youtube.language.clone(),
            auto_generated: self.settings.youtube.auto_subtitles,
        };

        eprintln!("  Downloading subtitles...");
        let path = self.fetcher.fetch(&request).await?;
        eprintln!("  Subtitle file downloaded: {}", path.display());
        Ok(path)
    }

    /// Strip timing and markup from a subtitle file. Returns the transcript path.
    #[instrument(skip(self))]
    pub fn clean_subtitles(&self, subtitle_path: &Path) -> Result<PathBuf> {
        let output = self.settings.cleaned_transcript_path();
        let transcript = self.cleaner.clean_file(subtitle_path, &output)?;
        eprintln!(
            "  Transcript cleaned and saved to {} ({} lines)",
            output.display(),
            transcript.len()
        );
        Ok(output)
    }

    /// Typeset the cleaned transcript. Returns the PDF path.
    #[instrument(skip(self))]
    pub fn render_pdf(&self, transcript_path: &Path) -> Result<PathBuf> {
        let output = self.settings.pdf_path();
        let pages = self.renderer.render_file(transcript_path, &output)?;
        eprintln!("  {} created ({} pages)", output.display(), pages);
        Ok(output)
    }

    /// Load, split, embed and index a document into a freshly emptied collection.
    #[instrument(skip(self))]
    pub async fn index_document(&self, path: &Path) -> Result<usize> {
        let text = self.loader.load(path)?;
        eprintln!("  Loaded {} characters", text.chars().count());

        let source = path.display().to_string();
        let chunks = self.splitter.split_document(&text, &source);
        eprintln!("  Split into {} chunks", chunks.len());

        self.embedder.prepare().await?;
        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        if embeddings.len() != chunks.len() {
            return Err(YtragError::Embedding(format!(
                "Expected {} embeddings, got {}",
                chunks.len(),
                embeddings.len()
            )));
        }

        let collection = self.vector_store.collection().to_string();
        let documents: Vec<Document> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| {
                Document::new(
                    collection.clone(),
                    chunk.source,
                    chunk.content,
                    chunk.order,
                    embedding,
                )
            })
            .collect();

        self.vector_store.clear().await?;
        let count = if documents.is_empty() {
            0
        } else {
            self.vector_store.upsert_batch(&documents).await?
        };

        info!(
            "Indexed {} chunks into '{}' with {}",
            count,
            collection,
            self.embedder.model()
        );
        eprintln!("  Added {} chunks to the vector database", count);
        Ok(count)
    }

    /// Run every stage for one video, leaving the collection ready to query.
    #[instrument(skip(self))]
    pub async fn prepare(&self, url: &str) -> Result<PrepareResult> {
        let subtitle_path = self.fetch_subtitles(url).await?;
        let transcript_path = self.clean_subtitles(&subtitle_path)?;
        let pdf_path = self.render_pdf(&transcript_path)?;
        let chunks_indexed = self.index_document(&pdf_path).await?;

        Ok(PrepareResult {
            subtitle_path,
            transcript_path,
            pdf_path,
            chunks_indexed,
        })
    }

    /// Build the question-answering chain over the indexed collection.
    pub fn query_chain(&self) -> RagChain {
        let retriever = MultiQueryRetriever::new(
            self.vector_store.clone(),
            self.embedder.clone(),
            self.chat.clone(),
        )
        .with_k(self.settings.rag.retrieval_k)
        .with_original(self.settings.rag.include_original)
        .with_prompts(self.prompts.clone());

        RagChain::new(retriever, self.chat.clone()).with_prompts(self.prompts.clone())
    }
}

/// Artifacts produced by [`Orchestrator::prepare`].
#[derive(Debug)]
pub struct PrepareResult {
    /// Downloaded VTT file.
    pub subtitle_path: PathBuf,
    /// Cleaned transcript text.
    pub transcript_path: PathBuf,
    /// Rendered PDF.
    pub pdf_path: PathBuf,
    /// Number of chunks indexed.
    pub chunks_indexed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        call_log, CallLog, CannedFetcher, FixedLoader, KeywordEmbedder, ScriptedChat,
    };
    use crate::vector_store::MemoryVectorStore;

    const VTT: &str = "WEBVTT\nKind: captions\nLanguage: en\n\n\
        00:00:00.000 --> 00:00:02.000 align:start position:0%\n\
        welcome to the rust talk\n\n\
        00:00:02.000 --> 00:00:04.000 align:start position:0%\n\
        welcome to the rust talk\n\
        today<00:00:02.500><c> we</c><00:00:02.900><c> cover</c>\n\
        today we cover ownership\n";

    const PDF_TEXT: &str = "welcome to the rust talk today we cover ownership and \
        borrowing in rust. the borrow checker keeps references valid.";

    struct Harness {
        orchestrator: Orchestrator,
        log: CallLog,
        chat: Arc<ScriptedChat>,
        store: Arc<MemoryVectorStore>,
        _dir: tempfile::TempDir,
    }

    fn harness(replies: &[&str]) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.general.work_dir = dir.path().to_string_lossy().to_string();
        settings.chunking.chunk_size = 40;
        settings.chunking.chunk_overlap = 10;

        let log = call_log();
        let chat = Arc::new(ScriptedChat::new(replies, log.clone()));
        let store = Arc::new(MemoryVectorStore::new(&settings.vector_store.collection));

        let components = Components {
            fetcher: Arc::new(CannedFetcher::new(VTT, log.clone())),
            loader: Arc::new(FixedLoader::new(PDF_TEXT, log.clone())),
            embedder: Arc::new(KeywordEmbedder::new(&["rust", "borrow"], log.clone())),
            vector_store: store.clone(),
            chat: chat.clone(),
        };

        let orchestrator =
            Orchestrator::with_components(settings, Prompts::default(), components).unwrap();

        Harness {
            orchestrator,
            log,
            chat,
            store,
            _dir: dir,
        }
    }

    #[tokio::test]
    async fn test_prepare_writes_fixed_artifacts_in_order() {
        let h = harness(&[]);
        let work_dir = h.orchestrator.settings().work_dir();

        let result = h.orchestrator.prepare("https://youtu.be/dQw4w9WgXcQ").await.unwrap();

        assert_eq!(result.subtitle_path, work_dir.join("subtitle_file.en.vtt"));
        assert_eq!(result.transcript_path, work_dir.join("transcript_cleaned.txt"));
        assert_eq!(result.pdf_path, work_dir.join("transcript.pdf"));

        let cleaned = std::fs::read_to_string(&result.transcript_path).unwrap();
        assert_eq!(cleaned, "welcome to the rust talk today we cover ownership");

        let pdf = std::fs::read(&result.pdf_path).unwrap();
        assert!(pdf.starts_with(b"%PDF"));

        let expected_chunks = RecursiveCharacterSplitter::new(40, 10)
            .unwrap()
            .split_text(PDF_TEXT)
            .len();
        assert!(expected_chunks > 1);
        assert_eq!(result.chunks_indexed, expected_chunks);
        assert_eq!(h.store.document_count().await.unwrap(), expected_chunks);

        assert_eq!(
            *h.log.lock().unwrap(),
            vec![
                "fetcher.fetch:https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
                "loader.load:transcript.pdf".to_string(),
                "embedder.prepare".to_string(),
                format!("embedder.embed_batch:{}", expected_chunks),
            ]
        );
    }

    #[tokio::test]
    async fn test_reindexing_replaces_collection() {
        let h = harness(&[]);
        h.orchestrator.prepare("dQw4w9WgXcQ").await.unwrap();
        let count = h.orchestrator.prepare("dQw4w9WgXcQ").await.unwrap().chunks_indexed;

        assert_eq!(h.store.document_count().await.unwrap(), count);
    }

    #[tokio::test]
    async fn test_invalid_url_stops_before_fetching() {
        let h = harness(&[]);
        let err = h.orchestrator.prepare("not a url").await.unwrap_err();

        assert!(matches!(err, YtragError::InvalidInput(_)));
        assert!(h.log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_pdf_fails_index() {
        let h = harness(&[]);
        let missing = h.orchestrator.settings().work_dir().join("absent.pdf");

        let err = h.orchestrator.index_document(&missing).await.unwrap_err();
        assert!(matches!(err, YtragError::DocumentLoad(_)));
        assert_eq!(h.store.document_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_query_chain_uses_configured_models() {
        let h = harness(&["how does the borrow checker work", "It keeps references valid."]);
        h.orchestrator.prepare("dQw4w9WgXcQ").await.unwrap();

        let chain = h.orchestrator.query_chain();
        assert_eq!(chain.model(), "youtube-agent");
        assert_eq!(h.orchestrator.embedder().model(), "nomic-embed-text");
        assert_eq!(h.orchestrator.vector_store().collection(), "simple-rag");

        let answer = chain.invoke("what does the borrow checker do?").await.unwrap();
        assert_eq!(answer, "It keeps references valid.");

        let prompts = h.chat.prompts();
        assert!(prompts[1].starts_with("Answer the question based ONLY"));
        assert!(prompts[1].contains("borrow"));
        assert!(prompts[1].ends_with("Question: what does the borrow checker do?\n"));
    }
}
