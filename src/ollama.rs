//! Ollama client configuration.
//!
//! Chat and embeddings go through Ollama's OpenAI-compatible `/v1` API, so the
//! regular OpenAI client works unchanged. Model management (`/api/pull`,
//! `/api/tags`) only exists on the native API and uses plain HTTP.

use crate::config::Settings;
use crate::error::{Result, YtragError};
use async_openai::{config::OpenAIConfig, Client};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Ollama ignores the key, but the client requires one.
const PLACEHOLDER_API_KEY: &str = "ollama";

/// Create an OpenAI-compatible client pointed at the configured Ollama server.
pub fn create_client(settings: &Settings) -> Result<Client<OpenAIConfig>> {
    let http_client = create_http_client(settings)?;
    let config = OpenAIConfig::new()
        .with_api_base(settings.openai_api_base())
        .with_api_key(PLACEHOLDER_API_KEY);

    Ok(Client::with_config(config).with_http_client(http_client))
}

/// Plain HTTP client with the configured timeout.
pub fn create_http_client(settings: &Settings) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.ollama.timeout_secs))
        .build()
        .map_err(YtragError::from)
}

#[derive(Serialize)]
struct PullRequest<'a> {
    model: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct PullResponse {
    status: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

/// Download a model into the local Ollama store. A no-op when it is already present.
#[instrument(skip(http))]
pub async fn pull_model(http: &reqwest::Client, host: &str, model: &str) -> Result<()> {
    let url = format!("{}/api/pull", host.trim_end_matches('/'));
    info!("Pulling model {}", model);

    let resp = http
        .post(&url)
        .json(&PullRequest { model, stream: false })
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(YtragError::Ollama(format!(
            "Pulling {} returned {}: {}",
            model, status, body
        )));
    }

    let body: PullResponse = resp.json().await?;
    if body.status != "success" {
        return Err(YtragError::Ollama(format!(
            "Pulling {} ended with status '{}'",
            model, body.status
        )));
    }

    debug!("Model {} is available", model);
    Ok(())
}

/// Names of the models installed on the server.
pub async fn list_models(http: &reqwest::Client, host: &str) -> Result<Vec<String>> {
    let url = format!("{}/api/tags", host.trim_end_matches('/'));
    let resp = http.get(&url).send().await?;

    if !resp.status().is_success() {
        return Err(YtragError::Ollama(format!(
            "Listing models returned {}",
            resp.status()
        )));
    }

    let body: TagsResponse = resp.json().await?;
    Ok(body.models.into_iter().map(|m| m.name).collect())
}

/// Whether `name` is installed, treating `model` and `model:latest` as the same.
pub fn has_model(installed: &[String], name: &str) -> bool {
    installed.iter().any(|m| {
        m == name || m.strip_suffix(":latest").is_some_and(|base| base == name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_model() {
        let installed = vec![
            "nomic-embed-text:latest".to_string(),
            "youtube-agent:7b".to_string(),
        ];

        assert!(has_model(&installed, "nomic-embed-text"));
        assert!(has_model(&installed, "nomic-embed-text:latest"));
        assert!(has_model(&installed, "youtube-agent:7b"));
        assert!(!has_model(&installed, "youtube-agent"));
    }

    #[test]
    fn test_pull_request_body() {
        let body = serde_json::to_value(PullRequest {
            model: "nomic-embed-text",
            stream: false,
        })
        .unwrap();
        assert_eq!(body["model"], "nomic-embed-text");
        assert_eq!(body["stream"], false);
    }

    #[test]
    fn test_create_client() {
        assert!(create_client(&Settings::default()).is_ok());
    }
}
