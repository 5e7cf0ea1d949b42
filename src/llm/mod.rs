//! Chat model access.

mod ollama;

pub use ollama::OllamaChat;

use crate::error::Result;
use async_trait::async_trait;

/// A model that turns a single prompt into a text completion.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send `prompt` as one user message and return the reply text.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Name of the model answering requests.
    fn model(&self) -> &str;
}
