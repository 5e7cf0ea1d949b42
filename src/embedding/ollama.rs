//! Ollama embeddings implementation.

use super::Embedder;
use crate::config::Settings;
use crate::error::{Result, YtragError};
use crate::ollama::{create_client, create_http_client, pull_model};
use async_openai::types::{CreateEmbeddingRequestArgs, EmbeddingInput};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Embedder backed by a model served from Ollama.
pub struct OllamaEmbedder {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    http: reqwest::Client,
    host: String,
    model: String,
    batch_size: usize,
    pull_model: bool,
}

impl OllamaEmbedder {
    /// Create an embedder from the `[ollama]` and `[embedding]` settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            client: create_client(settings)?,
            http: create_http_client(settings)?,
            host: settings.ollama.host.clone(),
            model: settings.embedding.model.clone(),
            batch_size: settings.embedding.batch_size.max(1),
            pull_model: settings.embedding.pull_model,
        })
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn prepare(&self) -> Result<()> {
        if self.pull_model {
            pull_model(&self.http, &self.host, &self.model).await?;
        }
        Ok(())
    }

    #[instrument(skip(self, text))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| YtragError::Embedding("Empty embedding response".to_string()))
    }

    #[instrument(skip(self, texts), fields(count = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Generating embeddings for {} texts", texts.len());

        let mut all_embeddings = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(self.batch_size) {
            let request = CreateEmbeddingRequestArgs::default()
                .model(&self.model)
                .input(EmbeddingInput::StringArray(chunk.to_vec()))
                .build()
                .map_err(|e| YtragError::Embedding(format!("Failed to build request: {}", e)))?;

            let response = self.client.embeddings().create(request).await.map_err(|e| {
                YtragError::Ollama(format!("Embedding API error: {}", e))
            })?;

            if response.data.len() != chunk.len() {
                return Err(YtragError::Embedding(format!(
                    "Requested {} embeddings, received {}",
                    chunk.len(),
                    response.data.len()
                )));
            }

            // Sort by index to ensure correct order
            let mut embeddings: Vec<_> = response.data.into_iter().collect();
            embeddings.sort_by_key(|e| e.index);

            all_embeddings.extend(embeddings.into_iter().map(|e| e.embedding));
        }

        debug!("Generated {} embeddings", all_embeddings.len());
        Ok(all_embeddings)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
