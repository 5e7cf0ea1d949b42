//! Chat completions against an Ollama-served model.

use super::ChatModel;
use crate::config::Settings;
use crate::error::{Result, YtragError};
use crate::ollama::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Chat model served by Ollama through its OpenAI-compatible endpoint.
pub struct OllamaChat {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl OllamaChat {
    /// Create a chat model using the `[rag]` model and temperature.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            client: create_client(settings)?,
            model: settings.rag.model.clone(),
            temperature: settings.rag.temperature,
        })
    }

    /// Use a different model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn build_request(
        &self,
        prompt: &str,
    ) -> Result<async_openai::types::CreateChatCompletionRequest> {
        let messages: Vec<ChatCompletionRequestMessage> =
            vec![ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.to_string())
                .build()
                .map_err(|e| YtragError::Llm(e.to_string()))?
                .into()];

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model).messages(messages);
        if let Some(temperature) = self.temperature {
            args.temperature(temperature);
        }

        args.build().map_err(|e| YtragError::Llm(e.to_string()))
    }
}

#[async_trait]
impl ChatModel for OllamaChat {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = self.build_request(prompt)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            YtragError::Ollama(format!("Failed to generate response: {}", e))
        })?;

        let answer = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| YtragError::Llm("Empty response from chat model".to_string()))?
            .clone();

        debug!("Received {} characters", answer.len());
        Ok(answer)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
