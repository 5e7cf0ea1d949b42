//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and services are available
//! before starting operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{Result, YtragError};
use crate::ollama::{create_http_client, list_models};
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// The full pipeline needs yt-dlp and Ollama.
    Pipeline,
    /// Indexing a PDF and answering questions needs Ollama.
    Query,
    /// Cleaning and rendering run locally.
    Local,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub async fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Pipeline => {
            check_tool(&settings.youtube.ytdlp_path)?;
            check_ollama(settings).await?;
        }
        Operation::Query => {
            check_ollama(settings).await?;
        }
        Operation::Local => {}
    }
    Ok(())
}

/// Check that the Ollama server answers.
async fn check_ollama(settings: &Settings) -> Result<()> {
    let http = create_http_client(settings)?;
    list_models(&http, &settings.ollama.host)
        .await
        .map(|_| ())
        .map_err(|e| {
            YtragError::Ollama(format!(
                "Ollama is not reachable at {} ({}). Start it with: ollama serve",
                settings.ollama.host, e
            ))
        })
}

/// Check if an external tool is available.
fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(YtragError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(YtragError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(YtragError::ToolNotFound(format!("{}: {}", name, e))),
    }
}
