//! Question answering over retrieved transcript chunks.

use super::{format_context, MultiQueryRetriever};
use crate::config::Prompts;
use crate::error::Result;
use crate::llm::ChatModel;
use crate::vector_store::Document;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Retrieval followed by a single answer completion.
pub struct RagChain {
    retriever: MultiQueryRetriever,
    chat: Arc<dyn ChatModel>,
    prompts: Prompts,
}

impl RagChain {
    /// Create a chain answering with `chat` from what `retriever` finds.
    pub fn new(retriever: MultiQueryRetriever, chat: Arc<dyn ChatModel>) -> Self {
        Self {
            retriever,
            chat,
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts.
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Name of the model producing answers.
    pub fn model(&self) -> &str {
        self.chat.model()
    }

    /// Build the answer prompt for `question` over `documents`.
    pub fn answer_prompt(&self, question: &str, documents: &[Document]) -> String {
        let mut vars = HashMap::new();
        vars.insert("context".to_string(), format_context(documents));
        vars.insert("question".to_string(), question.to_string());
        self.prompts.render_with_custom(&self.prompts.rag.answer, &vars)
    }

    /// Answer a question from the indexed transcript.
    #[instrument(skip(self))]
    pub async fn invoke(&self, question: &str) -> Result<String> {
        let documents = self.retriever.retrieve(question).await?;
        info!("Answering with {} context chunks", documents.len());

        let prompt = self.answer_prompt(question, &documents);
        self.chat.complete(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::Embedder;
    use crate::testing::{call_log, KeywordEmbedder, ScriptedChat};
    use crate::vector_store::{MemoryVectorStore, VectorStore};

    #[tokio::test]
    async fn test_invoke_assembles_answer_prompt() {
        let log = call_log();
        let embedder = Arc::new(KeywordEmbedder::new(&["rust", "python"], log.clone()));
        let store = Arc::new(MemoryVectorStore::new("simple-rag"));
        let content = "rust has no garbage collector";
        store
            .upsert_batch(&[Document::new(
                "simple-rag".into(),
                "transcript.pdf".into(),
                content.into(),
                0,
                embedder.embed(content).await.unwrap(),
            )])
            .await
            .unwrap();

        let chat = Arc::new(ScriptedChat::new(
            &["does rust collect garbage?", "It does not."],
            log.clone(),
        ));
        let retriever = MultiQueryRetriever::new(store, embedder, chat.clone());
        let chain = RagChain::new(retriever, chat.clone());

        let answer = chain.invoke("Is rust garbage collected?").await.unwrap();
        assert_eq!(answer, "It does not.");

        let prompts = chat.prompts();
        assert_eq!(prompts.len(), 2);
        assert_eq!(
            prompts[1],
            "Answer the question based ONLY on the following context:\n\
             rust has no garbage collector\n\
             Question: Is rust garbage collected?\n"
        );
    }

    #[test]
    fn test_answer_prompt_with_no_context() {
        let log = call_log();
        let chat = Arc::new(ScriptedChat::new(&[], log.clone()));
        let retriever = MultiQueryRetriever::new(
            Arc::new(MemoryVectorStore::new("simple-rag")),
            Arc::new(KeywordEmbedder::new(&[], log)),
            chat.clone(),
        );
        let chain = RagChain::new(retriever, chat);

        assert_eq!(chain.model(), "youtube-agent");
        assert_eq!(
            chain.answer_prompt("why?", &[]),
            "Answer the question based ONLY on the following context:\n\nQuestion: why?\n"
        );
    }
}
