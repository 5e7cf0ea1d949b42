//! Retrieval through several rephrasings of one question.

use crate::config::Prompts;
use crate::embedding::Embedder;
use crate::error::Result;
use crate::llm::ChatModel;
use crate::vector_store::{Document, VectorStore};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Asks the chat model for alternative phrasings of a question and retrieves
/// documents for each of them.
pub struct MultiQueryRetriever {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
    chat: Arc<dyn ChatModel>,
    prompts: Prompts,
    k: usize,
    include_original: bool,
}

impl MultiQueryRetriever {
    /// Create a retriever returning up to four documents per query.
    pub fn new(
        store: Arc<dyn VectorStore>,
        embedder: Arc<dyn Embedder>,
        chat: Arc<dyn ChatModel>,
    ) -> Self {
        Self {
            store,
            embedder,
            chat,
            prompts: Prompts::default(),
            k: 4,
            include_original: false,
        }
    }

    /// Set the number of documents retrieved per query.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Also search with the question as asked.
    pub fn with_original(mut self, include_original: bool) -> Self {
        self.include_original = include_original;
        self
    }

    /// Set custom prompts.
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Generate the queries to search with.
    #[instrument(skip(self))]
    pub async fn generate_queries(&self, question: &str) -> Result<Vec<String>> {
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), question.to_string());
        let prompt = self
            .prompts
            .render_with_custom(&self.prompts.rag.multi_query, &vars);

        let reply = self.chat.complete(&prompt).await?;
        let mut queries = parse_queries(&reply);

        if queries.is_empty() {
            debug!("Model returned no alternative queries, using the question");
            queries.push(question.to_string());
        } else if self.include_original && !queries.iter().any(|q| q == question) {
            queries.push(question.to_string());
        }

        info!("Generated queries: {:?}", queries);
        Ok(queries)
    }

    /// Retrieve the unique union of documents for every generated query.
    #[instrument(skip(self))]
    pub async fn retrieve(&self, question: &str) -> Result<Vec<Document>> {
        let queries = self.generate_queries(question).await?;

        let mut seen = HashSet::new();
        let mut documents = Vec::new();

        for query in &queries {
            let embedding = self.embedder.embed(query).await?;
            for result in self.store.search(&embedding, self.k).await? {
                if seen.insert(result.document.id) {
                    documents.push(result.document);
                }
            }
        }

        debug!(
            "Retrieved {} unique documents for {} queries",
            documents.len(),
            queries.len()
        );
        Ok(documents)
    }
}

/// One query per non-empty line.
pub fn parse_queries(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
